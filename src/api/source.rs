use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    api::{ApiError, pages},
    error::CatalogError,
    info,
    management::CredentialManager,
    oauth,
    server::AppState,
    session::Session,
    spotify::SpotifyClient,
    success,
    types::{CallbackParams, Provider},
    warning,
};

const PROVIDER: Provider = Provider::Source;

pub async fn login(State(state): State<AppState>, session: Session) -> Result<Redirect, ApiError> {
    let url = oauth::start_login(&state.config.spotify, PROVIDER, &session)
        .await
        .map_err(|e| ApiError::Auth(PROVIDER, e))?;
    info!("Redirecting to {} login", PROVIDER);

    Ok(Redirect::to(url.as_str()))
}

pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<Redirect, ApiError> {
    oauth::handle_callback(
        &state.http,
        &state.config.spotify,
        PROVIDER,
        &session,
        &params,
    )
    .await
    .map_err(|e| ApiError::Auth(PROVIDER, e))?;
    success!("{} connected", PROVIDER);

    Ok(Redirect::to("/"))
}

/// Playlist picker. A rejected token sends the user back through the login.
pub async fn playlists(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, ApiError> {
    let credentials = CredentialManager::new(session);
    let Some(credential) = credentials.load(PROVIDER).await else {
        return Ok(Redirect::to(PROVIDER.login_path()).into_response());
    };

    let client = SpotifyClient::new(state.http.clone(), &state.config.spotify.api_url, &credential);
    match client.list_playlists().await {
        Ok(playlists) => Ok(Html(pages::playlists(&playlists)).into_response()),
        Err(CatalogError::Unauthorized) => {
            warning!("{} token rejected, logging in again", PROVIDER);
            credentials.clear(PROVIDER).await;
            Ok(Redirect::to(PROVIDER.login_path()).into_response())
        }
        Err(e) => Err(ApiError::Catalog(PROVIDER, e)),
    }
}
