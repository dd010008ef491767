mod common;

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    body::Body,
    extract::Query,
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use jamjump::{
    server::{AppState, router},
    types::Provider,
};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn send(state: &AppState, request: Request<Body>) -> Response {
    router(state.clone()).oneshot(request).await.unwrap()
}

fn get_request(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn form_request(uri: &str, cookie: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Spotify and YouTube stand-ins. `created` counts created playlists.
fn upstream_router(created: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/spotify/v1/me/playlists",
            get(|| async {
                Json(json!({
                    "items": [
                        { "id": "pl1", "name": "Rock & Roll <3", "tracks": { "total": 12 } },
                        { "id": "pl2", "name": "Chill", "tracks": { "total": 3 } }
                    ]
                }))
            }),
        )
        .route(
            "/spotify/v1/playlists/{id}/tracks",
            get(
                |axum::extract::Path(id): axum::extract::Path<String>| async move {
                    if id != "pl2" {
                        return (
                            StatusCode::NOT_FOUND,
                            r#"{"error":{"status":404,"message":"Invalid playlist Id"}}"#,
                        )
                            .into_response();
                    }
                    Json(json!({
                        "items": [
                            { "track": { "name": "One More Time", "artists": [{ "name": "Daft Punk" }] } },
                            { "track": null },
                            { "track": { "name": "Obscure", "artists": [{ "name": "Unknown Band" }] } }
                        ]
                    }))
                    .into_response()
                },
            ),
        )
        .route(
            "/youtube/v3/channels",
            get(|headers: HeaderMap| async move {
                if bearer(&headers) == "Bearer youtube_token-access" {
                    Json(json!({ "items": [{ "id": "UC1" }] })).into_response()
                } else {
                    StatusCode::UNAUTHORIZED.into_response()
                }
            }),
        )
        .route(
            "/youtube/v3/playlists",
            post(move |Json(body): Json<Value>| {
                let created = created.clone();
                async move {
                    if body["status"]["privacyStatus"] != "private" {
                        return StatusCode::BAD_REQUEST.into_response();
                    }
                    created.fetch_add(1, Ordering::SeqCst);
                    Json(json!({ "id": "PLnew" })).into_response()
                }
            }),
        )
        .route(
            "/youtube/v3/search",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                if query.get("maxResults").map(String::as_str) != Some("1")
                    || query.get("type").map(String::as_str) != Some("video")
                {
                    return StatusCode::BAD_REQUEST.into_response();
                }
                let q = query.get("q").cloned().unwrap_or_default();
                if q == "Daft Punk One More Time official audio" {
                    Json(json!({ "items": [{ "id": { "kind": "youtube#video", "videoId": "FGBhQbmPwH8" } }] }))
                        .into_response()
                } else {
                    Json(json!({ "items": [] })).into_response()
                }
            }),
        )
        .route(
            "/youtube/v3/playlistItems",
            post(|Json(body): Json<Value>| async move {
                if body["snippet"]["playlistId"] != "PLnew"
                    || body["snippet"]["resourceId"]["kind"] != "youtube#video"
                {
                    return StatusCode::BAD_REQUEST.into_response();
                }
                Json(json!({ "id": "item1" })).into_response()
            }),
        )
}

async fn upstream_state() -> (AppState, Arc<AtomicUsize>) {
    let created = Arc::new(AtomicUsize::new(0));
    let upstream = common::spawn_stub(upstream_router(created.clone())).await;
    (common::test_state(&upstream), created)
}

#[tokio::test]
async fn test_health() {
    let state = common::test_state("http://127.0.0.1:1");
    let response = send(&state, get_request("/health", "")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_new_visitor_gets_session_cookie() {
    let state = common::test_state("http://127.0.0.1:1");
    let response = send(&state, get_request("/", "")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("jamjump_session="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_text(response).await;
    assert!(body.contains("Login to Spotify"));
    assert!(body.contains("Login to YouTube"));
    assert!(body.contains("Please connect both services"));
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| value.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_unknown_session_id_is_replaced() {
    let state = common::test_state("http://127.0.0.1:1");
    let forged = format!("{}i", "0".repeat(63));

    let response = send(
        &state,
        get_request("/", &format!("jamjump_session={}", forged)),
    )
    .await;

    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with("jamjump_session="));
    assert!(!cookie.contains(&forged));
    assert_eq!(state.sessions.len().await, 1);
    assert!(state.sessions.resume(&forged).await.is_none());
}

#[tokio::test]
async fn test_forged_session_does_not_reach_credentials() {
    let state = common::test_state("http://127.0.0.1:1");
    let (victim, _) = common::new_session(&state).await;
    common::store_credential(&victim, Provider::Source).await;
    common::store_credential(&victim, Provider::Destination).await;

    let forged = format!("jamjump_session={}", "a".repeat(64));
    let response = send(&state, get_request("/source/playlists", &forged)).await;

    assert_eq!(location(&response), "/source/login");
    assert!(set_cookie(&response).is_some());
}

#[tokio::test]
async fn test_known_session_keeps_its_cookie() {
    let state = common::test_state("http://127.0.0.1:1");
    let (_, cookie) = common::new_session(&state).await;

    let response = send(&state, get_request("/", &cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).is_none());
    assert_eq!(state.sessions.len().await, 1);
}

#[tokio::test]
async fn test_index_when_both_connected() {
    let state = common::test_state("http://127.0.0.1:1");
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;
    common::store_credential(&session, Provider::Destination).await;

    let response = send(&state, get_request("/", &cookie)).await;

    let body = body_text(response).await;
    assert!(body.contains("Spotify connected!"));
    assert!(body.contains("YouTube connected!"));
    assert!(body.contains("/source/playlists"));
}

#[tokio::test]
async fn test_source_login_redirects_with_state() {
    let state = common::test_state("http://127.0.0.1:1");
    let (session, cookie) = common::new_session(&state).await;

    let response = send(&state, get_request("/source/login", &cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = url::Url::parse(location(&response)).unwrap();
    assert_eq!(target.host_str(), Some("accounts.spotify.com"));
    let query: HashMap<String, String> = target.query_pairs().into_owned().collect();
    let stored: String = session.get(Provider::Source.state_key()).await.unwrap();
    assert_eq!(query["state"], stored);
}

#[tokio::test]
async fn test_destination_callback_csrf_mismatch() {
    let state = common::test_state("http://127.0.0.1:1");
    let (session, cookie) = common::new_session(&state).await;
    session
        .insert(Provider::Destination.state_key(), &"issued".to_string())
        .await
        .unwrap();

    let response = send(
        &state,
        get_request("/destination/callback?code=abc&state=forged", &cookie),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response).await.contains("does not match"));
    assert!(!session.contains(Provider::Destination.credential_key()).await);
}

#[tokio::test]
async fn test_playlists_without_credential_redirects_to_login() {
    let state = common::test_state("http://127.0.0.1:1");
    let (_, cookie) = common::new_session(&state).await;

    let response = send(&state, get_request("/source/playlists", &cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/source/login");
}

#[tokio::test]
async fn test_playlists_with_expired_credential() {
    let upstream = common::spawn_stub(Router::new().route(
        "/spotify/v1/me/playlists",
        get(|| async { (StatusCode::UNAUTHORIZED, "The access token expired") }),
    ))
    .await;
    let state = common::test_state(&upstream);
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;

    let response = send(&state, get_request("/source/playlists", &cookie)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/source/login");
    assert!(!session.contains(Provider::Source.credential_key()).await);
}

#[tokio::test]
async fn test_playlists_picker() {
    let (state, _) = upstream_state().await;
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;

    let response = send(&state, get_request("/source/playlists", &cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Rock &amp; Roll &lt;3"));
    assert!(body.contains("name=\"source_playlist_id\" value=\"pl2\""));
    assert!(body.contains("action=\"/destination/migrate\""));
}

#[tokio::test]
async fn test_migrate_requires_both_credentials() {
    let state = common::test_state("http://127.0.0.1:1");
    let (session, cookie) = common::new_session(&state).await;
    let form = "source_playlist_id=pl2&playlist_name=Chill";

    let response = send(&state, form_request("/destination/migrate", &cookie, form)).await;
    assert_eq!(location(&response), "/source/login");

    common::store_credential(&session, Provider::Source).await;
    let response = send(&state, form_request("/destination/migrate", &cookie, form)).await;
    assert_eq!(location(&response), "/destination/login");
}

#[tokio::test]
async fn test_migrate_missing_field() {
    let (state, created) = upstream_state().await;
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;
    common::store_credential(&session, Provider::Destination).await;

    let response = send(
        &state,
        form_request("/destination/migrate", &cookie, "source_playlist_id=pl2"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(created.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_migrate_end_to_end() {
    let (state, created) = upstream_state().await;
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;
    common::store_credential(&session, Provider::Destination).await;

    let response = send(
        &state,
        form_request(
            "/destination/migrate",
            &cookie,
            "source_playlist_id=pl2&playlist_name=Chill",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(created.load(Ordering::SeqCst), 1);
    let body = body_text(response).await;
    // The removed track is skipped, so two tracks are attempted
    assert!(body.contains("Successfully moved 1 of 2 songs"));
    assert!(body.contains("list=PLnew"));
    assert!(body.contains("unmatched"));
}

#[tokio::test]
async fn test_migrate_with_rejected_destination_token() {
    let (state, created) = upstream_state().await;
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;
    let mut stale = common::credential(Provider::Destination);
    stale.access_token = "revoked".to_string();
    session
        .insert(Provider::Destination.credential_key(), &stale)
        .await
        .unwrap();

    let response = send(
        &state,
        form_request(
            "/destination/migrate",
            &cookie,
            "source_playlist_id=pl2&playlist_name=Chill",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/destination/login");
    assert_eq!(created.load(Ordering::SeqCst), 0);
    assert!(!session.contains(Provider::Destination.credential_key()).await);
    assert!(session.contains(Provider::Source.credential_key()).await);
}

#[tokio::test]
async fn test_migrate_surfaces_source_error() {
    let (state, created) = upstream_state().await;
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;
    common::store_credential(&session, Provider::Destination).await;

    let response = send(
        &state,
        form_request(
            "/destination/migrate",
            &cookie,
            "source_playlist_id=missing&playlist_name=Chill",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(created.load(Ordering::SeqCst), 0);
    let body = body_text(response).await;
    assert!(body.contains("Invalid playlist Id"));
}

#[tokio::test]
async fn test_expired_credential_is_treated_as_absent() {
    let state = common::test_state("http://127.0.0.1:1");
    let (session, cookie) = common::new_session(&state).await;
    let mut expired = common::credential(Provider::Source);
    expired.expires_at = Some(jamjump::utils::now_timestamp() - 10);
    session
        .insert(Provider::Source.credential_key(), &expired)
        .await
        .unwrap();

    let response = send(&state, get_request("/source/playlists", &cookie)).await;

    assert_eq!(location(&response), "/source/login");
    assert!(!session.contains(Provider::Source.credential_key()).await);
}

#[tokio::test]
async fn test_logout_forgets_credentials() {
    let state = common::test_state("http://127.0.0.1:1");
    let (session, cookie) = common::new_session(&state).await;
    common::store_credential(&session, Provider::Source).await;
    common::store_credential(&session, Provider::Destination).await;

    let response = send(&state, get_request("/logout", &cookie)).await;

    assert_eq!(location(&response), "/");
    assert!(!session.contains(Provider::Source.credential_key()).await);
    assert!(!session.contains(Provider::Destination.credential_key()).await);
}
