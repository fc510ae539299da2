use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    error::MixerError,
    management::{MixerState, RESOLVE_CANDIDATES},
};

#[derive(Debug, Deserialize)]
pub struct SearchArtistBody {
    pub artist_name: String,
    pub limit: Option<u32>,
}

pub async fn search_artist(
    Extension(state): Extension<MixerState>,
    Json(body): Json<SearchArtistBody>,
) -> Result<Json<Value>, MixerError> {
    let session = state.session_snapshot().await;
    let artists = state
        .mixer
        .resolver()
        .search(
            &session,
            &body.artist_name,
            body.limit.unwrap_or(RESOLVE_CANDIDATES),
        )
        .await?;

    Ok(Json(json!({
        "query": body.artist_name,
        "artists": artists,
    })))
}
