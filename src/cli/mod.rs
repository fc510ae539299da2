//! # CLI Module
//!
//! Command implementations behind the `spotify-mixer` binary.
//!
//! - [`serve`] - run the HTTP API (optionally opening the consent page)
//! - [`search_artists`] - interactive login, then an artist candidate table
//! - [`mix`] - interactive login, then create a mixed playlist
//!
//! The one-shot commands start the HTTP server in the background so the
//! Spotify redirect can reach `/callback`, then wait for the session to be
//! authenticated before doing any remote work.

mod artists;
pub mod auth;
mod playlist;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Res, info, management::MixerState, server, warning};

pub use artists::search_artists;
pub use playlist::mix;

pub async fn serve(state: MixerState, addr: &str, open_browser: bool) -> Res<()> {
    if open_browser {
        let auth_url = state.authenticator.authorization_url()?;
        info!("Opening Spotify authorization page");
        if webbrowser::open(&auth_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                auth_url
            )
        }
    }

    server::start_api_server(state, addr).await?;
    Ok(())
}

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
