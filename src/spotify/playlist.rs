use super::{SpotifyClient, ensure_success};
use crate::{
    error::Result,
    types::{
        AddTrackToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, CreatedPlaylist,
        UserProfile,
    },
    utils,
};

/// Maximum number of URIs the add-items endpoint takes per request.
pub const ADD_TRACKS_CHUNK: usize = 100;

impl SpotifyClient {
    async fn user_id(&self, token: &str) -> Result<String> {
        if let Some(user_id) = &self.config.user_id {
            return Ok(user_id.clone());
        }

        let response = self
            .http
            .get(self.api_url("me"))
            .bearer_auth(token)
            .send()
            .await?;

        let profile = ensure_success(response)
            .await?
            .json::<UserProfile>()
            .await?;
        Ok(profile.id)
    }

    /// Creates a new playlist for the current user. Never looks for an
    /// existing playlist of the same name.
    pub(crate) async fn create(
        &self,
        token: &str,
        name: &str,
        description: &str,
        public: bool,
    ) -> Result<CreatedPlaylist> {
        let user_id = self.user_id(token).await?;

        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
            collaborative: false,
        };

        let response = self
            .http
            .post(self.api_url(&format!("users/{}/playlists", user_id)))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let playlist = ensure_success(response)
            .await?
            .json::<CreatePlaylistResponse>()
            .await?;

        let url = playlist
            .external_urls
            .and_then(|u| u.spotify)
            .unwrap_or_else(|| utils::playlist_web_url(&playlist.id));

        Ok(CreatedPlaylist {
            id: playlist.id,
            url,
        })
    }

    /// Appends tracks in order, one request per 100 URIs.
    pub(crate) async fn append_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<()> {
        let url = self.api_url(&format!("playlists/{}/tracks", playlist_id));

        for chunk in uris.chunks(ADD_TRACKS_CHUNK) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };
            let response = self
                .http
                .post(&url)
                .bearer_auth(token)
                .json(&body)
                .send()
                .await?;
            ensure_success(response).await?;
        }

        Ok(())
    }
}
