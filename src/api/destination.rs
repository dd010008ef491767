use axum::{
    Form,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    api::{ApiError, pages},
    error::MigrationError,
    info,
    management::CredentialManager,
    migration, oauth,
    server::AppState,
    session::Session,
    spotify::SpotifyClient,
    success,
    types::{CallbackParams, MigrateForm, MigrationRequest, Provider},
    warning,
    youtube::YoutubeClient,
};

const PROVIDER: Provider = Provider::Destination;

pub async fn login(State(state): State<AppState>, session: Session) -> Result<Redirect, ApiError> {
    let url = oauth::start_login(&state.config.youtube, PROVIDER, &session)
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
        &state.config.youtube,
        PROVIDER,
        &session,
        &params,
    )
    .await
    .map_err(|e| ApiError::Auth(PROVIDER, e))?;
    success!("{} connected", PROVIDER);

    Ok(Redirect::to("/"))
}

pub async fn migrate(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<MigrateForm>,
) -> Result<Response, ApiError> {
    let credentials = CredentialManager::new(session);
    let Some(source_credential) = credentials.load(Provider::Source).await else {
        return Ok(Redirect::to(Provider::Source.login_path()).into_response());
    };
    let Some(destination_credential) = credentials.load(Provider::Destination).await else {
        return Ok(Redirect::to(Provider::Destination.login_path()).into_response());
    };

    let source = SpotifyClient::new(
        state.http.clone(),
        &state.config.spotify.api_url,
        &source_credential,
    );
    let destination = YoutubeClient::new(
        state.http.clone(),
        &state.config.youtube.api_url,
        &destination_credential,
    );

    let request = MigrationRequest::from(form);
    info!(
        "Migrating playlist {} to \"{}\"",
        request.source_playlist_id,
        request.destination_playlist_title
    );

    match migration::migrate(&source, &destination, &request).await {
        Ok(result) => {
            success!(
                "Playlist {} migrated into {}",
                request.source_playlist_id,
                result.created_playlist_id
            );
            Ok(Html(pages::migration_result(&result)).into_response())
        }
        Err(MigrationError::SourceUnauthorized) => {
            warning!("{} token rejected, logging in again", Provider::Source);
            credentials.clear(Provider::Source).await;
            Ok(Redirect::to(Provider::Source.login_path()).into_response())
        }
        Err(MigrationError::DestinationUnauthorized) => {
            warning!("{} token rejected, logging in again", Provider::Destination);
            credentials.clear(Provider::Destination).await;
            Ok(Redirect::to(Provider::Destination.login_path()).into_response())
        }
        Err(e) => Err(ApiError::Migration(e)),
    }
}
