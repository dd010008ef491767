use reqwest::Client;

use crate::{
    error::CatalogError,
    types::{GetPlaylistTracksResponse, GetUserPlaylistsResponse, PlaylistSummary, Track},
    utils,
};

/// Retrieves a page of the current user's playlists from the Spotify Web API.
///
/// # Arguments
///
/// * `http` - HTTP client used for the request
/// * `api_url` - Base URL of the Spotify Web API
/// * `token` - Valid access token for Spotify API authentication
/// * `limit` - Maximum number of playlists to return (1-50)
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<PlaylistSummary>)` - Id, name and track count of every playlist on the page
/// - `Err(CatalogError)` - Rejected token, API error, or malformed response
///
/// # Example
///
/// ```
/// let playlists = get_user_playlists(&http, "https://api.spotify.com/v1", token, 50).await?;
/// for playlist in playlists {
///     println!("{} ({} tracks)", playlist.name, playlist.track_count);
/// }
/// ```
pub async fn get_user_playlists(
    http: &Client,
    api_url: &str,
    token: &str,
    limit: u32,
) -> Result<Vec<PlaylistSummary>, CatalogError> {
    let mut url = utils::endpoint(api_url, &["me", "playlists"])?;
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string());

    let response = http.get(url).bearer_auth(token).send().await?;
    let response = CatalogError::ensure_success(response).await?;
    let json = response.json::<GetUserPlaylistsResponse>().await?;

    Ok(json
        .items
        .into_iter()
        .map(|playlist| PlaylistSummary {
            id: playlist.id,
            name: playlist.name,
            track_count: playlist.tracks.map_or(0, |tracks| tracks.total),
        })
        .collect())
}

/// Retrieves the first page of tracks of a playlist.
///
/// Fetches up to `limit` playlist entries and converts them into [`Track`]s in
/// playlist order. Entries whose track is `null` (removed from the catalog or
/// otherwise unavailable) are skipped. The artist is the first credited artist,
/// or an empty string when the entry credits none.
///
/// # Arguments
///
/// * `http` - HTTP client used for the request
/// * `api_url` - Base URL of the Spotify Web API
/// * `token` - Valid access token for Spotify API authentication
/// * `playlist_id` - Id of the playlist to read; it is not checked to belong to the user
/// * `limit` - Maximum number of entries to return (1-50)
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Track>)` - Tracks of the first page
/// - `Err(CatalogError::Unauthorized)` - The access token was rejected (401)
/// - `Err(CatalogError::Upstream)` - Any other non-success status, body included
///
/// # Pagination
///
/// Only the first page is read. Playlists longer than `limit` are truncated.
pub async fn get_playlist_tracks(
    http: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    limit: u32,
) -> Result<Vec<Track>, CatalogError> {
    let mut url = utils::endpoint(api_url, &["playlists", playlist_id, "tracks"])?;
    url.query_pairs_mut()
        .append_pair("limit", &limit.to_string());

    let response = http.get(url).bearer_auth(token).send().await?;
    let response = CatalogError::ensure_success(response).await?;
    let json = response.json::<GetPlaylistTracksResponse>().await?;

    Ok(json
        .items
        .into_iter()
        .filter_map(|item| item.track)
        .map(|track| {
            let artist_name = track
                .artists
                .into_iter()
                .next()
                .map(|artist| artist.name)
                .unwrap_or_default();
            Track::new(artist_name, track.name)
        })
        .collect())
}
