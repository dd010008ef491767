use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    api::pages,
    error::{AuthError, CatalogError, MigrationError},
    types::Provider,
    warning,
};

/// Failure of a request handler, rendered as an HTML error page.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} login failed: {1}")]
    Auth(Provider, AuthError),

    #[error("{0} request failed: {1}")]
    Catalog(Provider, CatalogError),

    #[error("Migration failed: {0}")]
    Migration(MigrationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(_, AuthError::UserDenied(_) | AuthError::CsrfMismatch) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Auth(_, AuthError::ExchangeFailed(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Auth(_, AuthError::InvalidEndpoint(_) | AuthError::Session(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Catalog(_, err) => catalog_status(err),
            ApiError::Migration(MigrationError::BadRequest(_)) => StatusCode::BAD_REQUEST,
            ApiError::Migration(
                MigrationError::SourceUnauthorized | MigrationError::DestinationUnauthorized,
            ) => StatusCode::UNAUTHORIZED,
            ApiError::Migration(MigrationError::Source(err) | MigrationError::Destination(err)) => {
                catalog_status(err)
            }
        }
    }

    fn title(&self) -> &'static str {
        match self {
            ApiError::Auth(_, AuthError::CsrfMismatch) => "Login rejected",
            ApiError::Auth(..) => "Login failed",
            ApiError::Catalog(..) => "Provider error",
            ApiError::Migration(MigrationError::BadRequest(_)) => "Invalid request",
            ApiError::Migration(_) => "Migration failed",
        }
    }
}

fn catalog_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::Unauthorized => StatusCode::UNAUTHORIZED,
        CatalogError::InvalidEndpoint(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CatalogError::Upstream { .. } | CatalogError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        warning!("{}", message);

        (status, Html(pages::error(self.title(), &message))).into_response()
    }
}
