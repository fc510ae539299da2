use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::management::MixerState;

pub async fn health(Extension(state): Extension<MixerState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "authenticated": state.is_authenticated().await,
        "version": env!("CARGO_PKG_VERSION")
    }))
}
