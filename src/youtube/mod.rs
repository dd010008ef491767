//! # YouTube Integration Module
//!
//! Write side of a migration, backed by the YouTube Data API v3. The
//! [`YoutubeClient`] implements [`DestinationCatalog`] for the orchestrator.
//!
//! ## API Coverage
//!
//! - `GET /channels?mine=true` - Authentication probe
//! - `POST /playlists` - Create the destination playlist (always private)
//! - `GET /search` - Top video hit for a query
//! - `POST /playlistItems` - Append a video to the playlist
//!
//! ## Error Handling
//!
//! A 401 on any call yields [`CatalogError::Unauthorized`]; other failures are
//! [`CatalogError::Upstream`] with the response body kept verbatim. Quota
//! exhaustion surfaces as a 403 upstream error.

use async_trait::async_trait;
use reqwest::Client;

use crate::{error::CatalogError, migration::DestinationCatalog, types::Credential};

pub mod channels;
pub mod playlists;
pub mod search;

#[derive(Clone)]
pub struct YoutubeClient {
    http: Client,
    api_url: String,
    token: String,
}

impl YoutubeClient {
    pub fn new(http: Client, api_url: impl Into<String>, credential: &Credential) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token: credential.access_token.clone(),
        }
    }
}

#[async_trait]
impl DestinationCatalog for YoutubeClient {
    async fn probe(&self) -> Result<(), CatalogError> {
        channels::get_my_channel(&self.http, &self.api_url, &self.token)
            .await
            .map(|_| ())
    }

    async fn create_playlist(
        &self,
        title: &str,
        description: &str,
    ) -> Result<String, CatalogError> {
        playlists::create(&self.http, &self.api_url, &self.token, title, description).await
    }

    async fn find_best_match(&self, query: &str) -> Result<Option<String>, CatalogError> {
        search::top_video(&self.http, &self.api_url, &self.token, query).await
    }

    async fn append_item(&self, playlist_id: &str, item_id: &str) -> Result<(), CatalogError> {
        playlists::add_video(&self.http, &self.api_url, &self.token, playlist_id, item_id)
            .await
            .map(|_| ())
    }
}
