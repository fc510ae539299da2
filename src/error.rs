//! Error taxonomy shared by every layer of the mixer.
//!
//! Per-artist `NotFound` and `Remote` failures are absorbed while mixing; all
//! other variants abort the request they occur in. Transports translate a
//! [`MixerError`] into their own response shape using [`MixerError::code`].

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MixerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Not authenticated with Spotify. Complete the authorization flow first.")]
    Unauthenticated,

    #[error("No artist found for '{0}'")]
    NotFound(String),

    #[error("Spotify API error: {0}")]
    Remote(String),

    #[error("None of the requested artists produced any tracks")]
    NoTracksFound,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl MixerError {
    /// Stable machine-readable code used in HTTP and MCP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            MixerError::Config(_) => "config_error",
            MixerError::Auth(_) => "auth_error",
            MixerError::Unauthenticated => "unauthenticated",
            MixerError::NotFound(_) => "not_found",
            MixerError::Remote(_) => "remote_error",
            MixerError::NoTracksFound => "no_tracks_found",
            MixerError::InvalidRequest(_) => "invalid_request",
        }
    }

    /// Whether the mixer may skip the artist this error belongs to and go on.
    pub fn is_recoverable_per_artist(&self) -> bool {
        matches!(self, MixerError::NotFound(_) | MixerError::Remote(_))
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.code(),
            "message": self.to_string(),
        })
    }
}

impl From<reqwest::Error> for MixerError {
    fn from(err: reqwest::Error) -> Self {
        MixerError::Remote(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MixerError>;
