//! # Spotify Integration Module
//!
//! The remote collaborator of the mixer. [`MusicApi`] names the five calls the
//! rest of the crate makes against the music platform; [`SpotifyClient`] is the
//! reqwest implementation talking to the Spotify Web API.
//!
//! ## Layout
//!
//! ```text
//! management (Authenticator, Resolver, Mixer)
//!          ↓  Arc<dyn MusicApi>
//! SpotifyClient
//!     ├── auth      POST /api/token, authorize URL
//!     ├── artists   GET /search, GET /artists/{id}/top-tracks
//!     └── playlist  GET /me, POST /users/{id}/playlists, POST /playlists/{id}/tracks
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling
//!
//! Nothing here retries. Transport errors and non-2xx answers from the Web API
//! become [`MixerError::Remote`]; a rejected code at the token endpoint becomes
//! [`MixerError::Auth`]. An expired access token is reported by Spotify as a
//! 401 and therefore surfaces as `Remote` as well.
//!
//! ## Testing
//!
//! All endpoint URLs come from [`SpotifyConfig`], so tests point the client at
//! a mock server. Code above this layer depends on the trait only and is tested
//! against an in-memory fake.

pub mod artists;
pub mod auth;
pub mod playlist;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::{
    config::SpotifyConfig,
    error::{MixerError, Result},
    types::{ApiErrorResponse, ArtistMatch, CreatedPlaylist, Token, TopTrack},
};

/// Operations the mixer needs from the music platform.
#[async_trait]
pub trait MusicApi: Send + Sync {
    /// Trade an authorization code for a token pair.
    async fn exchange_code(&self, code: &str) -> Result<Token>;

    /// Artist search, in the platform's ranking order.
    async fn search_artists(&self, token: &str, query: &str, limit: u32)
    -> Result<Vec<ArtistMatch>>;

    async fn artist_top_tracks(
        &self,
        token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<TopTrack>>;

    async fn create_playlist(
        &self,
        token: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist>;

    /// Append `uris` to the playlist, keeping their order.
    async fn add_tracks(&self, token: &str, playlist_id: &str, uris: &[String]) -> Result<()>;
}

pub type SharedApi = Arc<dyn MusicApi>;

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{base}/{path}",
            base = self.config.api_url.trim_end_matches('/'),
            path = path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl MusicApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        self.request_token(code).await
    }

    async fn search_artists(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistMatch>> {
        self.search(token, query, limit).await
    }

    async fn artist_top_tracks(
        &self,
        token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<TopTrack>> {
        self.top_tracks(token, artist_id, market).await
    }

    async fn create_playlist(
        &self,
        token: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist> {
        self.create(token, name, description, public).await
    }

    async fn add_tracks(&self, token: &str, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.append_tracks(token, playlist_id, uris).await
    }
}

/// Turns a non-2xx Web API answer into [`MixerError::Remote`], keeping
/// Spotify's own message when the body carries one.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
        Ok(err) => format!("{} {}", err.error.status, err.error.message),
        Err(_) if body.is_empty() => status.to_string(),
        Err(_) => format!("{}: {}", status, body),
    };

    Err(MixerError::Remote(message))
}
