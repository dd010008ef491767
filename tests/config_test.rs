mod common;

use std::{net::SocketAddr, time::Duration};

use jamjump::{config::Config, error::ConfigError, types::Provider};

#[test]
fn test_defaults() {
    let vars = common::test_vars();
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

    assert_eq!(
        config.server_addr,
        "127.0.0.1:5000".parse::<SocketAddr>().unwrap()
    );
    assert_eq!(config.request_timeout, Duration::from_secs(10));
    assert_eq!(config.session_idle_timeout, Duration::from_secs(3600));

    assert_eq!(config.spotify.auth_url, "https://accounts.spotify.com/authorize");
    assert_eq!(config.spotify.api_url, "https://api.spotify.com/v1");
    assert_eq!(
        config.spotify.scopes,
        vec!["playlist-read-private", "playlist-read-collaborative"]
    );

    assert_eq!(
        config.youtube.token_url,
        "https://oauth2.googleapis.com/token"
    );
    assert_eq!(
        config.youtube.scopes,
        vec!["https://www.googleapis.com/auth/youtube.force-ssl"]
    );
    assert!(
        config
            .youtube
            .extra_auth_params
            .contains(&("access_type".to_string(), "offline".to_string()))
    );
}

#[test]
fn test_provider_lookup() {
    let vars = common::test_vars();
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

    assert_eq!(config.provider(Provider::Source).client_id, "spotify-id");
    assert_eq!(config.provider(Provider::Destination).client_id, "google-id");
}

#[test]
fn test_missing_required_variable() {
    let mut vars = common::test_vars();
    vars.remove("GOOGLE_CLIENT_SECRET");

    match Config::from_lookup(|key| vars.get(key).cloned()) {
        Err(ConfigError::Missing(var)) => assert_eq!(var, "GOOGLE_CLIENT_SECRET"),
        other => panic!("expected missing variable, got {:?}", other),
    }
}

#[test]
fn test_blank_required_variable_counts_as_missing() {
    let mut vars = common::test_vars();
    vars.insert("SPOTIFY_CLIENT_ID", "   ".to_string());

    assert!(matches!(
        Config::from_lookup(|key| vars.get(key).cloned()),
        Err(ConfigError::Missing(_))
    ));
}

#[test]
fn test_invalid_values() {
    let mut vars = common::test_vars();
    vars.insert("SERVER_ADDRESS", "localhost".to_string());
    assert!(matches!(
        Config::from_lookup(|key| vars.get(key).cloned()),
        Err(ConfigError::Invalid { .. })
    ));

    let mut vars = common::test_vars();
    vars.insert("REQUEST_TIMEOUT_SECS", "soon".to_string());
    assert!(matches!(
        Config::from_lookup(|key| vars.get(key).cloned()),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn test_overrides() {
    let mut vars = common::test_vars();
    vars.insert("SERVER_ADDRESS", "0.0.0.0:8080".to_string());
    vars.insert("SPOTIFY_SCOPE", "playlist-read-private".to_string());
    vars.insert("SESSION_IDLE_SECS", "600".to_string());
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();

    assert_eq!(config.session_idle_timeout, Duration::from_secs(600));

    assert_eq!(config.server_addr.port(), 8080);
    assert_eq!(config.spotify.scopes, vec!["playlist-read-private"]);
}
