use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two platforms a migration moves data between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    /// Spotify, where playlists are read from.
    Source,
    /// YouTube, where the migrated playlist is created.
    Destination,
}

impl Provider {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Source => "Spotify",
            Provider::Destination => "YouTube",
        }
    }

    /// Session key holding this provider's [`Credential`].
    pub fn credential_key(&self) -> &'static str {
        match self {
            Provider::Source => "spotify_token",
            Provider::Destination => "youtube_token",
        }
    }

    /// Session key holding the pending CSRF state of a login in progress.
    pub fn state_key(&self) -> &'static str {
        match self {
            Provider::Source => "spotify_oauth_state",
            Provider::Destination => "youtube_oauth_state",
        }
    }

    pub fn login_path(&self) -> &'static str {
        match self {
            Provider::Source => "/source/login",
            Provider::Destination => "/destination/login",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Bearer-token material authorizing calls to one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub provider: Provider,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Vec<String>,
    /// Unix timestamp (seconds) after which the access token is no longer valid.
    pub expires_at: Option<i64>,
}

/// Raw token endpoint answer of an authorization-code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub scope: Option<String>,
}

/// Query parameters a provider appends when redirecting back to us.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub artist_name: String,
    pub title: String,
}

impl Track {
    pub fn new(artist_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            artist_name: artist_name.into(),
            title: title.into(),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.artist_name.is_empty() {
            f.write_str(&self.title)
        } else {
            write!(f, "{} - {}", self.artist_name, self.title)
        }
    }
}

/// A text query sent to the destination search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn new(query: String) -> Self {
        Self(query)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fields of the migrate form, as submitted by the playlist picker.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MigrateForm {
    pub source_playlist_id: Option<String>,
    pub playlist_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationRequest {
    pub source_playlist_id: String,
    pub destination_playlist_title: String,
}

impl From<MigrateForm> for MigrationRequest {
    fn from(form: MigrateForm) -> Self {
        Self {
            source_playlist_id: form.source_playlist_id.unwrap_or_default(),
            destination_playlist_title: form.playlist_name.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// Found on the destination and appended to the new playlist.
    Matched { item_id: String },
    /// The destination search returned no candidate.
    Unmatched,
    /// The destination search itself failed for this track.
    SearchFailed { reason: String },
    /// A candidate was found but appending it failed.
    AddFailed { reason: String },
}

impl TrackOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            TrackOutcome::Matched { .. } => "matched",
            TrackOutcome::Unmatched => "unmatched",
            TrackOutcome::SearchFailed { .. } => "search-failed",
            TrackOutcome::AddFailed { .. } => "add-failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackReport {
    pub track: Track,
    pub query: SearchQuery,
    pub outcome: TrackOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationResult {
    pub created_playlist_id: String,
    pub attempted_count: usize,
    pub success_count: usize,
    pub outcomes: Vec<TrackReport>,
}

/// A playlist as shown in the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub track_count: u64,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<SpotifyPlaylist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    pub tracks: Option<SpotifyPlaylistTracksRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistTracksRef {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetPlaylistTracksResponse {
    pub items: Vec<PlaylistTrackItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrackItem {
    /// `null` when the underlying track was removed from the catalog.
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

// YouTube Data API payloads

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelItem {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    pub snippet: PlaylistSnippet,
    pub status: PlaylistStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSnippet {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistStatus {
    pub privacy_status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsertPlaylistItemRequest {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    pub playlist_id: String,
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub kind: String,
    pub video_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemResponse {
    pub id: String,
}
