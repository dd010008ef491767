use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use reqwest::Client;
use tower_cookies::CookieManagerLayer;

use crate::{Res, api, config::Config, session::SessionStore, success};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: SessionStore,
    pub http: Client,
}

impl AppState {
    /// Every outbound provider call shares this client and its timeout.
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.request_timeout).build()?;
        let sessions = SessionStore::new(config.session_idle_timeout);

        Ok(Self {
            config: Arc::new(config),
            sessions,
            http,
        })
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/logout", get(api::logout))
        .route("/source/login", get(api::source::login))
        .route("/source/callback", get(api::source::callback))
        .route("/source/playlists", get(api::source::playlists))
        .route("/destination/login", get(api::destination::login))
        .route("/destination/callback", get(api::destination::callback))
        .route("/destination/migrate", post(api::destination::migrate))
        .layer(CookieManagerLayer::new())
        .with_state(state)
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = state.config.server_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    success!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
