//! Configuration management for Jam Jump.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including the OAuth client registrations of both providers, the
//! API endpoints they are reached at, and server settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::{error::ConfigError, types::Provider};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 3600;

const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const SPOTIFY_SCOPE: &str = "playlist-read-private playlist-read-collaborative";

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

/// Loads environment variables from `.env` files.
///
/// Reads a `.env` file from the current working directory first and then from
/// the platform-specific local data directory under `jamjump/.env`. Variables
/// already present in the process environment are never overwritten, so the
/// real environment always wins over either file. Missing files are not an
/// error; the data directory is created so users know where to put one.
///
/// # Directory Structure
///
/// The function looks for the data directory `.env` file in:
/// - Linux: `~/.local/share/jamjump/.env`
/// - macOS: `~/Library/Application Support/jamjump/.env`
/// - Windows: `%LOCALAPPDATA%/jamjump/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The parent directory cannot be created
/// - An existing `.env` file cannot be parsed
///
/// # Example
///
/// ```
/// use jamjump::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("jamjump/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    for candidate in [PathBuf::from(".env"), path] {
        if !candidate.is_file() {
            continue;
        }
        dotenv::from_path(&candidate)
            .map_err(|e| format!("Failed to load {}: {}", candidate.display(), e))?;
    }

    Ok(())
}

/// OAuth client registration and API location of one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Provider specific parameters appended to the authorization URL.
    pub extra_auth_params: Vec<(String, String)>,
}

/// Complete runtime configuration of the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub request_timeout: Duration,
    /// Sessions not seen for this long are dropped together with their credentials.
    pub session_idle_timeout: Duration,
    pub spotify: ProviderConfig,
    pub youtube: ProviderConfig,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] beforehand so `.env` files are taken into account.
    ///
    /// # Required Variables
    ///
    /// - `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET`, `SPOTIFY_REDIRECT_URI`
    /// - `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REDIRECT_URI`
    ///
    /// # Optional Variables
    ///
    /// - `SERVER_ADDRESS` (default `127.0.0.1:5000`)
    /// - `REQUEST_TIMEOUT_SECS` (default `10`)
    /// - `SESSION_IDLE_SECS` (default `3600`)
    /// - `SPOTIFY_SCOPE`, `SPOTIFY_AUTH_URL`, `SPOTIFY_TOKEN_URL`, `SPOTIFY_API_URL`
    /// - `YOUTUBE_SCOPE`, `GOOGLE_AUTH_URL`, `GOOGLE_TOKEN_URL`, `YOUTUBE_API_URL`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an unset required variable and
    /// [`ConfigError::Invalid`] for values that do not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let server_addr = vars.or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr =
            SocketAddr::from_str(&server_addr).map_err(|e| ConfigError::Invalid {
                var: "SERVER_ADDRESS".to_string(),
                reason: e.to_string(),
            })?;

        let timeout = vars.secs("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?;
        let session_idle_timeout = vars.secs("SESSION_IDLE_SECS", DEFAULT_SESSION_IDLE_SECS)?;

        Ok(Self {
            server_addr,
            request_timeout: timeout,
            session_idle_timeout,
            spotify: spotify(&vars)?,
            youtube: youtube(&vars)?,
        })
    }

    pub fn provider(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::Source => &self.spotify,
            Provider::Destination => &self.youtube,
        }
    }
}

struct Vars<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Vars<'_, F> {
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn or(&self, key: &str, default: &str) -> String {
        (self.0)(key)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    fn secs(&self, key: &str, default: u64) -> Result<Duration, ConfigError> {
        self.or(key, &default.to_string())
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::Invalid {
                var: key.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Spotify registration. `show_dialog` forces the consent screen so switching
/// accounts works after a logout.
fn spotify<F: Fn(&str) -> Option<String>>(vars: &Vars<'_, F>) -> Result<ProviderConfig, ConfigError> {
    Ok(ProviderConfig {
        client_id: vars.required("SPOTIFY_CLIENT_ID")?,
        client_secret: vars.required("SPOTIFY_CLIENT_SECRET")?,
        redirect_uri: vars.required("SPOTIFY_REDIRECT_URI")?,
        scopes: split_scopes(&vars.or("SPOTIFY_SCOPE", SPOTIFY_SCOPE)),
        auth_url: vars.or("SPOTIFY_AUTH_URL", SPOTIFY_AUTH_URL),
        token_url: vars.or("SPOTIFY_TOKEN_URL", SPOTIFY_TOKEN_URL),
        api_url: vars.or("SPOTIFY_API_URL", SPOTIFY_API_URL),
        extra_auth_params: vec![("show_dialog".to_string(), "true".to_string())],
    })
}

/// Google registration. Offline access makes Google hand out a refresh token.
fn youtube<F: Fn(&str) -> Option<String>>(vars: &Vars<'_, F>) -> Result<ProviderConfig, ConfigError> {
    Ok(ProviderConfig {
        client_id: vars.required("GOOGLE_CLIENT_ID")?,
        client_secret: vars.required("GOOGLE_CLIENT_SECRET")?,
        redirect_uri: vars.required("GOOGLE_REDIRECT_URI")?,
        scopes: split_scopes(&vars.or("YOUTUBE_SCOPE", YOUTUBE_SCOPE)),
        auth_url: vars.or("GOOGLE_AUTH_URL", GOOGLE_AUTH_URL),
        token_url: vars.or("GOOGLE_TOKEN_URL", GOOGLE_TOKEN_URL),
        api_url: vars.or("YOUTUBE_API_URL", YOUTUBE_API_URL),
        extra_auth_params: vec![
            ("access_type".to_string(), "offline".to_string()),
            ("include_granted_scopes".to_string(), "true".to_string()),
        ],
    })
}

fn split_scopes(scope: &str) -> Vec<String> {
    scope.split_whitespace().map(str::to_string).collect()
}
