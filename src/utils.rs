use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};

pub const SESSION_ID_LENGTH: usize = 64;
const STATE_TOKEN_BYTES: usize = 32;

pub fn generate_session_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Random single-use value binding an authorization redirect to a session.
pub fn generate_state_token() -> String {
    let mut bytes = [0u8; STATE_TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LENGTH && id.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn now_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Joins `segments` onto `base`, percent-encoding each one.
///
/// Ids taken from user input end up as path segments, so they must never be
/// able to add segments or a query of their own.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<url::Url, url::ParseError> {
    let mut url = url::Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
