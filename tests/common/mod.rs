#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use spotify_mixer::{
    config::SpotifyConfig,
    error::{MixerError, Result},
    management::{AuthSession, MixerState},
    spotify::MusicApi,
    types::{ArtistMatch, CreatedPlaylist, Token, TopTrack},
};

pub const VALID_CODE: &str = "good-code";

/// In-memory stand-in for the Spotify Web API that records every call.
#[derive(Default)]
pub struct FakeApi {
    search_results: HashMap<String, Vec<ArtistMatch>>,
    top_tracks: HashMap<String, Vec<TopTrack>>,
    failing_searches: HashSet<String>,
    failing_top_tracks: HashSet<String>,
    fail_create: bool,
    fail_add: bool,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<(String, String, bool)>>,
    pub added: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an artist found by `query` (matched case-insensitively)
    /// with `track_count` top tracks.
    pub fn with_artist(mut self, query: &str, name: &str, track_count: usize) -> Self {
        let artist = artist(&slug(name), name);
        self.top_tracks
            .insert(artist.id.clone(), tracks_for(name, track_count));
        self.search_results
            .entry(query.to_lowercase())
            .or_default()
            .push(artist);
        self
    }

    pub fn with_candidates(mut self, query: &str, candidates: Vec<ArtistMatch>) -> Self {
        for c in &candidates {
            self.top_tracks
                .entry(c.id.clone())
                .or_insert_with(|| tracks_for(&c.name, 10));
        }
        self.search_results.insert(query.to_lowercase(), candidates);
        self
    }

    pub fn failing_search(mut self, query: &str) -> Self {
        self.failing_searches.insert(query.to_lowercase());
        self
    }

    pub fn failing_top_tracks(mut self, artist_name: &str) -> Self {
        self.failing_top_tracks.insert(slug(artist_name));
        self
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_add(mut self) -> Self {
        self.fail_add = true;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_named(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(name))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl MusicApi for FakeApi {
    async fn exchange_code(&self, code: &str) -> Result<Token> {
        self.record(format!("exchange_code:{}", code));
        if code != VALID_CODE {
            return Err(MixerError::Auth("Invalid authorization code".to_string()));
        }
        Ok(Token {
            access_token: "access-token".to_string(),
            refresh_token: Some("refresh-token".to_string()),
            scope: SpotifyConfig::scope(),
            expires_in: 3600,
            obtained_at: Utc::now(),
        })
    }

    async fn search_artists(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<ArtistMatch>> {
        self.record(format!("search_artists:{}", query));
        assert_eq!(token, "access-token");
        let key = query.to_lowercase();
        if self.failing_searches.contains(&key) {
            return Err(MixerError::Remote("503 Service Unavailable".to_string()));
        }
        Ok(self
            .search_results
            .get(&key)
            .map(|c| c.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn artist_top_tracks(
        &self,
        _token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<TopTrack>> {
        self.record(format!("artist_top_tracks:{}:{}", artist_id, market));
        if self.failing_top_tracks.contains(artist_id) {
            return Err(MixerError::Remote("502 Bad Gateway".to_string()));
        }
        Ok(self.top_tracks.get(artist_id).cloned().unwrap_or_default())
    }

    async fn create_playlist(
        &self,
        _token: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist> {
        self.record(format!("create_playlist:{}", name));
        if self.fail_create {
            return Err(MixerError::Remote("500 Internal Server Error".to_string()));
        }
        let mut created = self.created.lock().unwrap();
        created.push((name.to_string(), description.to_string(), public));
        let id = format!("playlist-{}", created.len());
        Ok(CreatedPlaylist {
            url: format!("https://open.spotify.com/playlist/{}", id),
            id,
        })
    }

    async fn add_tracks(&self, _token: &str, playlist_id: &str, uris: &[String]) -> Result<()> {
        self.record(format!("add_tracks:{}", playlist_id));
        if self.fail_add {
            return Err(MixerError::Remote("500 Internal Server Error".to_string()));
        }
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }
}

pub fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

pub fn artist(id: &str, name: &str) -> ArtistMatch {
    ArtistMatch {
        id: id.to_string(),
        name: name.to_string(),
        popularity: 80,
        follower_count: 1_000,
        genres: vec!["pop".to_string()],
    }
}

pub fn tracks_for(name: &str, count: usize) -> Vec<TopTrack> {
    (1..=count)
        .map(|i| TopTrack {
            id: format!("{}-{}", slug(name), i),
            name: format!("{} song {}", name, i),
            uri: format!("spotify:track:{}-{}", slug(name), i),
        })
        .collect()
}

pub fn test_config() -> SpotifyConfig {
    SpotifyConfig {
        client_id: Some("client-id".to_string()),
        client_secret: Some("client-secret".to_string()),
        ..SpotifyConfig::default()
    }
}

pub fn authenticated_session() -> AuthSession {
    AuthSession {
        access_token: "access-token".to_string(),
        refresh_token: None,
        is_authenticated: true,
    }
}

pub fn state_with(api: Arc<FakeApi>) -> MixerState {
    MixerState::new(api, test_config())
}

/// State whose session already went through a successful code exchange.
pub async fn authenticated_state(api: Arc<FakeApi>) -> MixerState {
    let state = state_with(api);
    state
        .authenticator
        .complete_pasted_authorization(&state.session, VALID_CODE, None)
        .await
        .expect("fake exchange succeeds");
    state
}
