use std::{io, net::SocketAddr, str::FromStr};

use axum::{
    Extension, Router,
    routing::{get, post},
};

use crate::{Res, api, error::MixerError, info, management::MixerState};

pub fn router(state: MixerState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/auth", get(api::auth))
        .route("/callback", get(api::callback))
        .route("/search-artist", post(api::search_artist))
        .route("/create-playlist", post(api::create_playlist))
        .layer(Extension(state))
}

/// Binds `addr` and serves the API until the process ends.
///
/// A malformed address is a [`MixerError::Config`]; failing to bind or serve
/// is reported as the underlying I/O error.
pub async fn start_api_server(state: MixerState, addr: &str) -> Res<()> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| MixerError::Config(format!("invalid server address '{}': {}", addr, e)))?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| io::Error::new(e.kind(), format!("cannot bind {}: {}", addr, e)))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
