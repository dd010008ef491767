use reqwest::Client;

use crate::{error::CatalogError, matcher, types::SearchListResponse, utils};

/// Searches videos for `query`, asking for the top candidate only.
///
/// Returns `Ok(None)` when the search has no result.
pub async fn top_video(
    http: &Client,
    api_url: &str,
    token: &str,
    query: &str,
) -> Result<Option<String>, CatalogError> {
    let mut url = utils::endpoint(api_url, &["search"])?;
    url.query_pairs_mut()
        .append_pair("part", "id")
        .append_pair("q", query)
        .append_pair("maxResults", "1")
        .append_pair("type", "video");

    let response = http.get(url).bearer_auth(token).send().await?;
    let response = CatalogError::ensure_success(response).await?;
    let json = response.json::<SearchListResponse>().await?;

    Ok(matcher::pick_first(&json.items))
}
