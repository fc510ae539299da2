//! # API Module
//!
//! HTTP endpoints of the mixer. Every handler receives the shared
//! [`MixerState`](crate::management::MixerState) through an axum `Extension`
//! and delegates to the management layer; the handlers themselves only parse
//! input, validate it and shape the response.
//!
//! ## Endpoints
//!
//! - `GET /auth` - [`auth`] returns the Spotify consent URL
//! - `GET /callback` - [`callback`] completes the authorization-code exchange
//! - `POST /search-artist` - [`search_artist`] lists artist candidates
//! - `POST /create-playlist` - [`create_playlist`] runs a mix
//! - `GET /health` - [`health`] reports liveness and authentication state
//!
//! ## Errors
//!
//! Failures are returned as `{ "error": <code>, "message": <text> }` with a
//! status derived from the [`MixerError`] variant.

mod artists;
mod callback;
mod health;
mod playlist;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::MixerError;

pub use artists::{SearchArtistBody, search_artist};
pub use callback::{auth, callback};
pub use health::health;
pub use playlist::{CreatePlaylistBody, create_playlist};

impl MixerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MixerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MixerError::Auth(_) => StatusCode::BAD_REQUEST,
            MixerError::Unauthenticated => StatusCode::UNAUTHORIZED,
            MixerError::NotFound(_) => StatusCode::NOT_FOUND,
            MixerError::NoTracksFound => StatusCode::NOT_FOUND,
            MixerError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MixerError::Remote(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for MixerError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
