use std::time::{Duration, Instant};

use crate::{
    error::MixerError,
    info,
    management::{MixerState, SharedSession},
    server::start_api_server,
    success, warning,
};

/// How long the interactive flow waits for the browser redirect.
pub const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the browser authorization flow for a one-shot CLI command.
///
/// 1. Builds the consent URL (fails early on missing credentials)
/// 2. Starts the HTTP server so `/callback` can receive the redirect
/// 3. Opens the URL in the default browser, or prints it if that fails
/// 4. Waits until the callback has authenticated the session
pub async fn authorize(state: &MixerState, addr: &str) -> Result<(), MixerError> {
    let auth_url = state.authenticator.authorization_url()?;

    let server_state = state.clone();
    let server_addr = addr.to_string();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, &server_addr).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    info!("Waiting for Spotify authorization...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    if wait_for_session(&state.session, AUTH_TIMEOUT).await {
        success!("Authentication successful!");
        Ok(())
    } else {
        Err(MixerError::Auth(
            "authorization failed or timed out".to_string(),
        ))
    }
}

/// Polls the session once per second until it is authenticated or
/// `max_wait` has passed.
pub async fn wait_for_session(session: &SharedSession, max_wait: Duration) -> bool {
    let start = Instant::now();

    while start.elapsed() < max_wait {
        if session.lock().await.is_authenticated {
            return true;
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    session.lock().await.is_authenticated
}
