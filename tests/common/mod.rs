#![allow(dead_code)]

use std::collections::HashMap;

use axum::Router;
use jamjump::{
    config::Config,
    server::AppState,
    session::Session,
    types::{Credential, Provider},
};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn test_vars() -> HashMap<&'static str, String> {
    HashMap::from([
        ("SPOTIFY_CLIENT_ID", "spotify-id".to_string()),
        ("SPOTIFY_CLIENT_SECRET", "spotify-secret".to_string()),
        (
            "SPOTIFY_REDIRECT_URI",
            "http://127.0.0.1:5000/source/callback".to_string(),
        ),
        ("GOOGLE_CLIENT_ID", "google-id".to_string()),
        ("GOOGLE_CLIENT_SECRET", "google-secret".to_string()),
        (
            "GOOGLE_REDIRECT_URI",
            "http://127.0.0.1:5000/destination/callback".to_string(),
        ),
    ])
}

/// Configuration whose provider endpoints all point at `upstream`.
pub fn test_config(upstream: &str) -> Config {
    let mut vars = test_vars();
    vars.insert("SPOTIFY_API_URL", format!("{}/spotify/v1", upstream));
    vars.insert("SPOTIFY_TOKEN_URL", format!("{}/spotify/token", upstream));
    vars.insert("YOUTUBE_API_URL", format!("{}/youtube/v3", upstream));
    vars.insert("GOOGLE_TOKEN_URL", format!("{}/google/token", upstream));
    vars.insert("REQUEST_TIMEOUT_SECS", "5".to_string());
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn test_state(upstream: &str) -> AppState {
    AppState::new(test_config(upstream)).unwrap()
}

pub fn credential(provider: Provider) -> Credential {
    Credential {
        provider,
        access_token: format!("{}-access", provider.credential_key()),
        refresh_token: None,
        token_uri: "http://127.0.0.1/token".to_string(),
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        scopes: vec!["scope".to_string()],
        expires_at: None,
    }
}

/// Opens a fresh session in `state` and returns it with its cookie header value.
pub async fn new_session(state: &AppState) -> (Session, String) {
    let session = state.sessions.create().await;
    let cookie = format!("jamjump_session={}", session.id());
    (session, cookie)
}

pub async fn store_credential(session: &Session, provider: Provider) {
    session
        .insert(provider.credential_key(), &credential(provider))
        .await
        .unwrap();
}
