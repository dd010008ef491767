//! Maps source tracks onto destination search queries.
//!
//! Matching is deliberately naive: the query is built from the artist and
//! title only, and the first candidate the destination search returns is
//! accepted as is. Covers, live versions and lyric videos can win over the
//! original recording; there is no ranking to prevent that.

use crate::types::{SearchQuery, SearchResult, Track};

/// Descriptor appended to every query to bias results towards studio recordings.
pub const QUERY_SUFFIX: &str = "official audio";

/// Builds the search query for `track`: artist, then title, then [`QUERY_SUFFIX`].
///
/// Empty parts are left out so a track without an artist still yields a
/// single-spaced query.
///
/// # Example
///
/// ```
/// let query = build_search_query(&Track::new("Daft Punk", "One More Time"));
/// assert_eq!(query.as_str(), "Daft Punk One More Time official audio");
/// ```
pub fn build_search_query(track: &Track) -> SearchQuery {
    let query = [track.artist_name.trim(), track.title.trim(), QUERY_SUFFIX]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    SearchQuery::new(query)
}

/// Returns the id of the first candidate that refers to a video.
pub fn pick_first(candidates: &[SearchResult]) -> Option<String> {
    candidates
        .iter()
        .find_map(|candidate| candidate.id.video_id.clone())
}
