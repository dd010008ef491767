use reqwest::Client;

use crate::{error::CatalogError, types::ChannelListResponse, utils};

/// Fetches the id of the authenticated user's channel.
///
/// Used as a cheap credential check before a migration starts. Accounts
/// without a channel answer successfully with no items, hence the `Option`.
pub async fn get_my_channel(
    http: &Client,
    api_url: &str,
    token: &str,
) -> Result<Option<String>, CatalogError> {
    let mut url = utils::endpoint(api_url, &["channels"])?;
    url.query_pairs_mut()
        .append_pair("part", "id")
        .append_pair("mine", "true");

    let response = http.get(url).bearer_auth(token).send().await?;
    let response = CatalogError::ensure_success(response).await?;
    let json = response.json::<ChannelListResponse>().await?;

    Ok(json.items.into_iter().next().map(|channel| channel.id))
}
