use axum::{Extension, Json};
use serde::Deserialize;

use crate::{
    error::MixerError,
    management::MixerState,
    types::{DEFAULT_SONGS_PER_ARTIST, MixRequest, MixResult},
};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistBody {
    pub artists: Vec<String>,
    pub playlist_name: String,
    #[serde(default = "default_songs_per_artist")]
    pub songs_per_artist: u32,
}

fn default_songs_per_artist() -> u32 {
    DEFAULT_SONGS_PER_ARTIST
}

impl From<CreatePlaylistBody> for MixRequest {
    fn from(body: CreatePlaylistBody) -> Self {
        MixRequest {
            artist_names: body.artists,
            playlist_name: body.playlist_name,
            songs_per_artist: body.songs_per_artist,
        }
    }
}

pub async fn create_playlist(
    Extension(state): Extension<MixerState>,
    Json(body): Json<CreatePlaylistBody>,
) -> Result<Json<MixResult>, MixerError> {
    let request = MixRequest::from(body);
    request.validate()?;

    let session = state.session_snapshot().await;
    let result = state.mixer.mix(&session, &request).await?;

    Ok(Json(result))
}
