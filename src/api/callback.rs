use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::Query,
    http::StatusCode,
    response::Html,
};
use serde_json::{Value, json};

use crate::{error::MixerError, management::MixerState, warning};

pub async fn auth(Extension(state): Extension<MixerState>) -> Result<Json<Value>, MixerError> {
    let auth_url = state.authenticator.authorization_url()?;

    Ok(Json(json!({
        "auth_url": auth_url,
        "message": "Open auth_url in a browser and approve access; Spotify redirects back to /callback."
    })))
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<MixerState>,
) -> (StatusCode, Html<String>) {
    if let Some(error) = params.get("error") {
        warning!("Authorization was denied: {}", error);
        return failure_page(&MixerError::Auth(format!("authorization denied: {}", error)));
    }

    let Some(code) = params.get("code") else {
        return failure_page(&MixerError::Auth(
            "missing authorization code".to_string(),
        ));
    };

    match state
        .authenticator
        .complete_authorization(
            &state.session,
            code,
            params.get("state").map(String::as_str),
        )
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Html(
                "<h2>Authentication successful.</h2><p>You can close this browser window.</p>"
                    .to_string(),
            ),
        ),
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            failure_page(&e)
        }
    }
}

fn failure_page(err: &MixerError) -> (StatusCode, Html<String>) {
    (
        err.status_code(),
        Html(format!("<h4>Login failed.</h4><p>{}</p>", err)),
    )
}
