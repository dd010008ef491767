//! # Spotify Integration Module
//!
//! This module provides the read side of a migration: access to the user's
//! playlists and their tracks through the Spotify Web API. It is the source
//! catalog of Jam Jump and implements [`SourceCatalog`] for the orchestrator.
//!
//! ## Architecture
//!
//! ```text
//! HTTP handlers / Migration orchestrator
//!          ↓
//! SpotifyClient (bearer token + shared reqwest::Client)
//!     └── Playlist Operations (list playlists, list tracks)
//!          ↓
//! Spotify Web API
//! ```
//!
//! Authentication is not handled here; the authorization-code flow lives in
//! [`crate::oauth`] and hands over a [`Credential`].
//!
//! ## API Coverage
//!
//! - `GET /me/playlists` - Playlists shown in the picker
//! - `GET /playlists/{playlist_id}/tracks` - Tracks of the playlist to migrate
//!
//! Both requests read a single page of at most [`PAGE_LIMIT`] items.
//!
//! ## Error Handling
//!
//! All calls return [`CatalogError`]:
//! - **401 Unauthorized** - [`CatalogError::Unauthorized`]; the caller clears the
//!   stored credential and restarts the Spotify login
//! - **Other non-2xx** - [`CatalogError::Upstream`] carrying status and body verbatim
//! - **Timeouts** - reported as [`CatalogError::Upstream`] with status 504
//! - **Unexpected JSON** - [`CatalogError::Decode`]
//!
//! There are no retries.

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::CatalogError,
    migration::SourceCatalog,
    types::{Credential, PlaylistSummary, Track},
};

pub mod playlists;

/// Maximum number of items requested per call.
pub const PAGE_LIMIT: u32 = 50;

/// Spotify Web API client bound to one user's access token.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    token: String,
}

impl SpotifyClient {
    /// Creates a client for the API at `api_url` using `credential`'s access token.
    ///
    /// # Arguments
    ///
    /// * `http` - Shared HTTP client; its timeout bounds every call
    /// * `api_url` - Base URL of the Web API, e.g. `https://api.spotify.com/v1`
    /// * `credential` - Stored Spotify credential of the current session
    pub fn new(http: Client, api_url: impl Into<String>, credential: &Credential) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token: credential.access_token.clone(),
        }
    }

    /// Lists the current user's playlists (first page).
    pub async fn list_playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        playlists::get_user_playlists(&self.http, &self.api_url, &self.token, PAGE_LIMIT).await
    }
}

#[async_trait]
impl SourceCatalog for SpotifyClient {
    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, CatalogError> {
        playlists::get_playlist_tracks(
            &self.http,
            &self.api_url,
            &self.token,
            playlist_id,
            PAGE_LIMIT,
        )
        .await
    }
}
