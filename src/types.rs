use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::{MixerError, Result};

pub const MIN_SONGS_PER_ARTIST: u32 = 1;
pub const MAX_SONGS_PER_ARTIST: u32 = 10;
pub const DEFAULT_SONGS_PER_ARTIST: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistMatch {
    pub id: String,
    pub name: String,
    pub popularity: u32,
    pub follower_count: u64,
    pub genres: Vec<String>,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub popularity: u32,
    pub followers: u64,
    pub genres: String,
}

impl From<&ArtistMatch> for ArtistTableRow {
    fn from(artist: &ArtistMatch) -> Self {
        ArtistTableRow {
            name: artist.name.clone(),
            popularity: artist.popularity,
            followers: artist.follower_count,
            genres: artist.genres.join(", "),
        }
    }
}

/// A top-tracks entry as the remote API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
}

/// A track picked for a mix. `searched_for_name` keeps the caller's query
/// even when the resolved artist is spelled differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    pub artist_name: String,
    pub searched_for_name: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub artist: String,
    pub track: String,
    pub searched: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixRequest {
    pub artist_names: Vec<String>,
    pub playlist_name: String,
    pub songs_per_artist: u32,
}

impl MixRequest {
    /// Boundary checks applied by the transports. The mixer itself accepts
    /// any `songs_per_artist` and takes as many tracks as exist.
    pub fn validate(&self) -> Result<()> {
        if self.artist_names.iter().all(|a| a.trim().is_empty()) {
            return Err(MixerError::InvalidRequest(
                "at least one artist name is required".to_string(),
            ));
        }
        if self.playlist_name.trim().is_empty() {
            return Err(MixerError::InvalidRequest(
                "playlist name must not be empty".to_string(),
            ));
        }
        if !(MIN_SONGS_PER_ARTIST..=MAX_SONGS_PER_ARTIST).contains(&self.songs_per_artist) {
            return Err(MixerError::InvalidRequest(format!(
                "songs_per_artist must be between {} and {}",
                MIN_SONGS_PER_ARTIST, MAX_SONGS_PER_ARTIST
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixResult {
    pub playlist_url: String,
    pub playlist_id: String,
    pub tracks: Vec<Track>,
    pub requested_artists: Vec<String>,
    pub found_artists: Vec<String>,
    pub skipped_artists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    pub url: String,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenErrorResponse {
    pub error: String,
    pub error_description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: Paging<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub popularity: u32,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    pub total: u64,
}

impl From<ArtistObject> for ArtistMatch {
    fn from(artist: ArtistObject) -> Self {
        ArtistMatch {
            id: artist.id,
            name: artist.name,
            popularity: artist.popularity,
            follower_count: artist.followers.map_or(0, |f| f.total),
            genres: artist.genres,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<TrackObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
}

impl From<TrackObject> for TopTrack {
    fn from(track: TrackObject) -> Self {
        TopTrack {
            id: track.id.unwrap_or_default(),
            name: track.name,
            uri: track.uri,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}
