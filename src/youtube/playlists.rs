use reqwest::Client;

use crate::{
    error::CatalogError,
    types::{
        CreatePlaylistRequest, CreatePlaylistResponse, InsertPlaylistItemRequest,
        PlaylistItemResponse, PlaylistItemSnippet, PlaylistSnippet, PlaylistStatus, ResourceId,
    },
    utils,
};

/// Privacy of every playlist this crate creates. Not configurable.
pub const PRIVACY_STATUS: &str = "private";
pub const VIDEO_KIND: &str = "youtube#video";

/// Creates a private playlist on the authenticated user's channel.
///
/// # Arguments
///
/// * `http` - HTTP client used for the request
/// * `api_url` - Base URL of the YouTube Data API
/// * `token` - Valid access token for the YouTube Data API
/// * `title` - Playlist title
/// * `description` - Playlist description
///
/// # Returns
///
/// The id of the new playlist.
///
/// # Privacy
///
/// The playlist is always created with privacy status `private`; making it
/// public is left to the user on YouTube.
pub async fn create(
    http: &Client,
    api_url: &str,
    token: &str,
    title: &str,
    description: &str,
) -> Result<String, CatalogError> {
    let mut url = utils::endpoint(api_url, &["playlists"])?;
    url.query_pairs_mut().append_pair("part", "snippet,status");

    let body = CreatePlaylistRequest {
        snippet: PlaylistSnippet {
            title: title.to_string(),
            description: description.to_string(),
        },
        status: PlaylistStatus {
            privacy_status: PRIVACY_STATUS.to_string(),
        },
    };

    let response = http.post(url).bearer_auth(token).json(&body).send().await?;
    let response = CatalogError::ensure_success(response).await?;
    let json = response.json::<CreatePlaylistResponse>().await?;

    Ok(json.id)
}

/// Appends a video to the end of a playlist and returns the playlist item id.
pub async fn add_video(
    http: &Client,
    api_url: &str,
    token: &str,
    playlist_id: &str,
    video_id: &str,
) -> Result<String, CatalogError> {
    let mut url = utils::endpoint(api_url, &["playlistItems"])?;
    url.query_pairs_mut().append_pair("part", "snippet");

    let body = InsertPlaylistItemRequest {
        snippet: PlaylistItemSnippet {
            playlist_id: playlist_id.to_string(),
            resource_id: ResourceId {
                kind: VIDEO_KIND.to_string(),
                video_id: video_id.to_string(),
            },
        },
    };

    let response = http.post(url).bearer_auth(token).json(&body).send().await?;
    let response = CatalogError::ensure_success(response).await?;
    let json = response.json::<PlaylistItemResponse>().await?;

    Ok(json.id)
}
