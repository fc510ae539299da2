use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;

/// Spotify rejects playlist descriptions longer than this.
pub const MAX_DESCRIPTION_CHARS: usize = 300;

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// `Authorization` header value for client-credential authentication at the
/// token endpoint.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

pub fn playlist_description(found: &[String], requested: &[String]) -> String {
    let description = format!(
        "Mixed playlist featuring {}. Requested: {}.",
        found.join(", "),
        requested.join(", ")
    );
    truncate_chars(&description, MAX_DESCRIPTION_CHARS)
}

/// Truncates on a char boundary, marking the cut with an ellipsis.
pub fn truncate_chars(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Pulls `(code, state)` out of whatever the user pasted: either the bare
/// authorization code or the full redirect URL Spotify sent them to.
pub fn code_from_input(input: &str) -> Option<(String, Option<String>)> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    match Url::parse(input) {
        Ok(url) => {
            let mut code = None;
            let mut state = None;
            for (key, value) in url.query_pairs() {
                match key.as_ref() {
                    "code" => code = Some(value.into_owned()),
                    "state" => state = Some(value.into_owned()),
                    _ => {}
                }
            }
            code.filter(|c| !c.is_empty()).map(|c| (c, state))
        }
        Err(_) => Some((input.to_string(), None)),
    }
}

pub fn playlist_web_url(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", playlist_id)
}
