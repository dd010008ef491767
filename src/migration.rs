//! # Playlist Migration
//!
//! Copies one page of a source playlist into a new, private destination
//! playlist. The orchestrator only talks to the two catalogs through the
//! [`SourceCatalog`] and [`DestinationCatalog`] traits, which the Spotify and
//! YouTube clients implement.
//!
//! ## Sequence
//!
//! ```text
//! validate request
//!     ↓
//! probe destination credential
//!     ↓
//! fetch source tracks          (nothing created yet)
//!     ↓
//! create destination playlist  (no tracks attempted on failure)
//!     ↓
//! for each track: query → search → append
//! ```
//!
//! Every step runs once, strictly forward. Only the per-track loop repeats and
//! it never stops on a single track: a missing match, a failed search or a
//! failed append is recorded in the result and the next track is processed.
//! A rejected destination token is the exception, since every later call
//! would be rejected as well.

use async_trait::async_trait;

use crate::{
    error::{CatalogError, MigrationError},
    info, matcher, success,
    types::{MigrationRequest, MigrationResult, Track, TrackOutcome, TrackReport},
    warning,
};

/// Suffix marking playlists created by a migration.
pub const IMPORTED_SUFFIX: &str = "(Imported)";
pub const PLAYLIST_DESCRIPTION: &str = "Migrated from Spotify by Jam Jump";

/// Read side of a migration.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// Returns the first page of tracks of `playlist_id`.
    async fn list_tracks(&self, playlist_id: &str) -> Result<Vec<Track>, CatalogError>;
}

/// Write side of a migration.
#[async_trait]
pub trait DestinationCatalog: Send + Sync {
    /// Cheap authenticated call used to detect a stale credential early.
    async fn probe(&self) -> Result<(), CatalogError>;

    /// Creates a private playlist and returns its id.
    async fn create_playlist(&self, title: &str, description: &str)
    -> Result<String, CatalogError>;

    /// Returns the id of the top search hit for `query`, if any.
    async fn find_best_match(&self, query: &str) -> Result<Option<String>, CatalogError>;

    async fn append_item(&self, playlist_id: &str, item_id: &str) -> Result<(), CatalogError>;
}

impl MigrationRequest {
    /// Both fields must carry something other than whitespace.
    pub fn validate(&self) -> Result<(), MigrationError> {
        if self.source_playlist_id.trim().is_empty() {
            return Err(MigrationError::BadRequest(
                "source_playlist_id is required".to_string(),
            ));
        }
        if self.destination_playlist_title.trim().is_empty() {
            return Err(MigrationError::BadRequest(
                "playlist_name is required".to_string(),
            ));
        }
        Ok(())
    }
}

pub fn destination_title(requested: &str) -> String {
    format!("{} {}", requested.trim(), IMPORTED_SUFFIX)
}

/// Runs a migration.
///
/// # Arguments
///
/// * `source` - Catalog the tracks are read from
/// * `destination` - Catalog the new playlist is created in
/// * `request` - Playlist to copy and title of the copy
///
/// # Errors
///
/// - [`MigrationError::BadRequest`] - a request field is empty
/// - [`MigrationError::DestinationUnauthorized`] - the probe, or any later destination call, got a 401
/// - [`MigrationError::SourceUnauthorized`] - fetching the source tracks got a 401
/// - [`MigrationError::Source`] / [`MigrationError::Destination`] - any other fatal upstream failure
///
/// Per-track failures are not errors; they are reported in
/// [`MigrationResult::outcomes`].
pub async fn migrate<S, D>(
    source: &S,
    destination: &D,
    request: &MigrationRequest,
) -> Result<MigrationResult, MigrationError>
where
    S: SourceCatalog + ?Sized,
    D: DestinationCatalog + ?Sized,
{
    request.validate()?;

    destination
        .probe()
        .await
        .map_err(MigrationError::from_destination)?;

    let source_playlist_id = request.source_playlist_id.trim();
    let tracks = source
        .list_tracks(source_playlist_id)
        .await
        .map_err(MigrationError::from_source)?;
    info!(
        "Fetched {} tracks from playlist {}",
        tracks.len(),
        source_playlist_id
    );

    let playlist_id = destination
        .create_playlist(
            &destination_title(&request.destination_playlist_title),
            PLAYLIST_DESCRIPTION,
        )
        .await
        .map_err(MigrationError::from_destination)?;
    info!("Created destination playlist {}", playlist_id);

    let mut outcomes = Vec::with_capacity(tracks.len());
    for track in tracks {
        let query = matcher::build_search_query(&track);
        let outcome = migrate_track(destination, &playlist_id, query.as_str()).await?;
        outcomes.push(TrackReport {
            track,
            query,
            outcome,
        });
    }

    let success_count = outcomes
        .iter()
        .filter(|report| matches!(report.outcome, TrackOutcome::Matched { .. }))
        .count();
    let result = MigrationResult {
        created_playlist_id: playlist_id,
        attempted_count: outcomes.len(),
        success_count,
        outcomes,
    };

    success!(
        "Migration finished: {}/{} tracks added",
        result.success_count,
        result.attempted_count
    );
    Ok(result)
}

async fn migrate_track<D>(
    destination: &D,
    playlist_id: &str,
    query: &str,
) -> Result<TrackOutcome, MigrationError>
where
    D: DestinationCatalog + ?Sized,
{
    let item_id = match destination.find_best_match(query).await {
        Ok(Some(item_id)) => item_id,
        Ok(None) => {
            warning!("No match for {}", query);
            return Ok(TrackOutcome::Unmatched);
        }
        Err(CatalogError::Unauthorized) => return Err(MigrationError::DestinationUnauthorized),
        Err(e) => {
            warning!("Search failed for {}: {}", query, e);
            return Ok(TrackOutcome::SearchFailed {
                reason: e.to_string(),
            });
        }
    };

    match destination.append_item(playlist_id, &item_id).await {
        Ok(()) => {
            info!("Added: {}", query);
            Ok(TrackOutcome::Matched { item_id })
        }
        Err(CatalogError::Unauthorized) => Err(MigrationError::DestinationUnauthorized),
        Err(e) => {
            warning!("Failed to add {}: {}", query, e);
            Ok(TrackOutcome::AddFailed {
                reason: e.to_string(),
            })
        }
    }
}
