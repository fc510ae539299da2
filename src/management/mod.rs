mod artist;
mod auth;
mod playlist;

use std::sync::Arc;

pub use artist::{ArtistResolver, RESOLVE_CANDIDATES, best_match};
pub use auth::{AuthSession, Authenticator, SharedSession};
pub use playlist::{ArtistOutcome, PlaylistMixer, take_tracks};

use crate::{
    config::SpotifyConfig,
    spotify::{SharedApi, SpotifyClient},
};

/// Everything a transport adapter needs: the authenticator, the mixer and
/// the one session they share. Cheap to clone.
#[derive(Clone)]
pub struct MixerState {
    pub authenticator: Arc<Authenticator>,
    pub mixer: Arc<PlaylistMixer>,
    pub session: SharedSession,
}

impl MixerState {
    pub fn new(api: SharedApi, config: SpotifyConfig) -> Self {
        let market = config.market.clone();
        Self {
            authenticator: Arc::new(Authenticator::new(api.clone(), config)),
            mixer: Arc::new(PlaylistMixer::new(api, market)),
            session: AuthSession::shared(),
        }
    }

    /// State backed by the real Spotify Web API.
    pub fn spotify(config: SpotifyConfig) -> Self {
        let api: SharedApi = Arc::new(SpotifyClient::new(config.clone()));
        Self::new(api, config)
    }

    /// Copy of the session for one request, so no lock is held while remote
    /// calls run.
    pub async fn session_snapshot(&self) -> AuthSession {
        self.session.lock().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated
    }
}
