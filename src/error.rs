//! Error taxonomy.
//!
//! Failures are split by how they are recovered: [`CatalogError::Unauthorized`]
//! clears the stored credential and restarts the provider login,
//! per-track failures are recorded in the migration result, and everything
//! else aborts the current request and is shown to the user verbatim.

use reqwest::{Response, StatusCode};
use thiserror::Error;

/// Failures of the OAuth2 authorization-code flow.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The user declined, or the provider returned no authorization code.
    #[error("authorization was not granted: {0}")]
    UserDenied(String),

    /// The token endpoint refused to exchange the authorization code.
    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),

    /// The returned `state` does not match the one issued for this session.
    #[error("authorization state does not match this session")]
    CsrfMismatch,

    /// Login data could not be written to the session.
    #[error("could not store login data in the session: {0}")]
    Session(String),

    #[error("invalid authorization endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Failures of a single call against a provider catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP 401: the access token expired or was revoked.
    #[error("access token was rejected")]
    Unauthorized,

    /// Any other non-success answer, or a transport failure.
    #[error("upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The response did not have the shape we rely on.
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

impl CatalogError {
    /// Passes successful responses through and classifies the rest.
    pub async fn ensure_success(response: Response) -> Result<Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(CatalogError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(CatalogError::Upstream {
            status: status.as_u16(),
            body,
        })
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return CatalogError::Decode(err.to_string());
        }

        let status = if err.is_timeout() {
            StatusCode::GATEWAY_TIMEOUT
        } else {
            err.status().unwrap_or(StatusCode::BAD_GATEWAY)
        };

        CatalogError::Upstream {
            status: status.as_u16(),
            body: err.to_string(),
        }
    }
}

/// Reasons a migration stops before producing a result.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("Spotify session expired")]
    SourceUnauthorized,

    #[error("YouTube session expired")]
    DestinationUnauthorized,

    #[error("Spotify error: {0}")]
    Source(CatalogError),

    #[error("YouTube error: {0}")]
    Destination(CatalogError),
}

impl MigrationError {
    pub(crate) fn from_source(err: CatalogError) -> Self {
        match err {
            CatalogError::Unauthorized => MigrationError::SourceUnauthorized,
            other => MigrationError::Source(other),
        }
    }

    pub(crate) fn from_destination(err: CatalogError) -> Self {
        match err {
            CatalogError::Unauthorized => MigrationError::DestinationUnauthorized,
            other => MigrationError::Destination(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: String, reason: String },
}
