//! # API Module
//!
//! This module provides the HTTP endpoints of the Jam Jump web server. It
//! connects the browser to the provider login flows, the playlist picker and
//! the migration itself.
//!
//! ## Endpoints
//!
//! ### Overview
//!
//! - [`index`] - Connection status of both providers and the entry point to the picker
//! - [`logout`] - Forgets both credentials of the session
//! - [`health`] - Health check returning application name and version
//!
//! ### Spotify (source)
//!
//! - [`source::login`] - Redirects to the Spotify authorization page
//! - [`source::callback`] - Completes the Spotify login
//! - [`source::playlists`] - Playlist picker
//!
//! ### YouTube (destination)
//!
//! - [`destination::login`] - Redirects to the Google authorization page
//! - [`destination::callback`] - Completes the Google login
//! - [`destination::migrate`] - Runs a migration from the picker form
//!
//! ## Session Handling
//!
//! Every handler that touches credentials takes a [`crate::session::Session`]
//! extractor. Whenever a provider rejects a stored token, the handler removes
//! that credential and redirects to the provider's login instead of showing an
//! error.
//!
//! ## Errors
//!
//! Handlers return [`ApiError`], which renders an HTML page with a status code
//! matching the failure and the upstream message verbatim.

pub mod destination;
mod error;
mod health;
mod index;
pub mod pages;
pub mod source;

pub use error::ApiError;
pub use health::health;
pub use index::{index, logout};
