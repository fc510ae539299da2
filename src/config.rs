//! Configuration management for the playlist mixer.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Every value has a sensible default except the two
//! Spotify client credentials; their absence is reported as a
//! [`MixerError::Config`](crate::error::MixerError::Config) on first use instead
//! of aborting the process.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the current working directory
//! 4. Application defaults

use std::{env, path::PathBuf};

use crate::error::{MixerError, Result};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_MARKET: &str = "US";

/// Scopes requested during authorization: playlist creation in both
/// visibilities plus reading the profile needed to resolve the user id.
pub const SPOTIFY_SCOPES: &[&str] = &[
    "playlist-modify-public",
    "playlist-modify-private",
    "user-read-private",
];

/// Loads environment variables from `.env` files.
///
/// Creates `spotify-mixer/` in the platform-specific local data directory if it
/// doesn't exist and loads `.env` from there, then from the working directory.
/// Values already present in the environment are never overwritten, and a
/// missing file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotify-mixer/.env`
/// - macOS: `~/Library/Application Support/spotify-mixer/.env`
/// - Windows: `%LOCALAPPDATA%/spotify-mixer/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> std::result::Result<(), String> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Location of the per-user `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotify-mixer/.env");
    path
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Address the HTTP server (and OAuth callback listener) binds to.
pub fn server_addr() -> String {
    non_empty_var("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Spotify application client id, if configured.
pub fn spotify_client_id() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Spotify application client secret, if configured.
///
/// The client secret should be kept confidential and never exposed in logs.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Callback URL registered with the Spotify application.
pub fn spotify_redirect_uri() -> String {
    non_empty_var("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string())
}

pub fn spotify_apiauth_url() -> String {
    non_empty_var("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

pub fn spotify_apitoken_url() -> String {
    non_empty_var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

pub fn spotify_apiurl() -> String {
    non_empty_var("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Market used for top-track lookups.
pub fn spotify_market() -> String {
    non_empty_var("SPOTIFY_MARKET").unwrap_or_else(|| DEFAULT_MARKET.to_string())
}

/// Optional fixed user id for playlist creation; `/me` is queried otherwise.
pub fn spotify_user() -> Option<String> {
    non_empty_var("SPOTIFY_USER_ID")
}

/// Snapshot of everything the Spotify client and the authenticator need.
///
/// Built once from the environment at startup and passed by value, so tests
/// can point the URLs at a mock server without touching process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotifyConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub market: String,
    pub user_id: Option<String>,
}

impl SpotifyConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: spotify_client_id(),
            client_secret: spotify_client_secret(),
            redirect_uri: spotify_redirect_uri(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
            market: spotify_market(),
            user_id: spotify_user(),
        }
    }

    /// Returns `(client_id, client_secret)` or a configuration error naming
    /// the missing variables.
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            (None, None) => Err(MixerError::Config(
                "SPOTIFY_API_AUTH_CLIENT_ID and SPOTIFY_API_AUTH_CLIENT_SECRET must be set"
                    .to_string(),
            )),
            (None, _) => Err(MixerError::Config(
                "SPOTIFY_API_AUTH_CLIENT_ID must be set".to_string(),
            )),
            (_, None) => Err(MixerError::Config(
                "SPOTIFY_API_AUTH_CLIENT_SECRET must be set".to_string(),
            )),
        }
    }

    pub fn scope() -> String {
        SPOTIFY_SCOPES.join(" ")
    }
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            market: DEFAULT_MARKET.to_string(),
            user_id: None,
        }
    }
}
