use chrono::Utc;
use reqwest::{Url, header::AUTHORIZATION};

use super::SpotifyClient;
use crate::{
    config::SpotifyConfig,
    error::{MixerError, Result},
    types::{Token, TokenErrorResponse, TokenResponse},
    utils,
};

/// Builds the URL the user opens to grant the mixer access.
///
/// Fails with [`MixerError::Config`] when the client credentials are missing,
/// so a misconfigured service reports it before sending anyone to Spotify.
pub fn authorization_url(config: &SpotifyConfig, state: &str) -> Result<String> {
    let (client_id, _) = config.credentials()?;
    let scope = SpotifyConfig::scope();

    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("state", state),
        ],
    )
    .map_err(|e| MixerError::Config(format!("invalid authorization URL: {}", e)))?;

    Ok(url.to_string())
}

impl SpotifyClient {
    /// Exchanges an authorization code for an access/refresh token pair.
    ///
    /// The client authenticates with HTTP Basic credentials. A 4xx answer
    /// (invalid, expired or already used code) is an [`MixerError::Auth`];
    /// network failures and 5xx answers are [`MixerError::Remote`].
    pub(crate) async fn request_token(&self, code: &str) -> Result<Token> {
        let (client_id, client_secret) = self.config.credentials()?;

        let res = self
            .http
            .post(&self.config.token_url)
            .header(
                AUTHORIZATION,
                utils::basic_auth_header(client_id, client_secret),
            )
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        if status.is_client_error() {
            let body = res.text().await.unwrap_or_default();
            let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => status.to_string(),
            };
            return Err(MixerError::Auth(reason));
        }
        if !status.is_success() {
            return Err(MixerError::Remote(format!(
                "token endpoint answered {}",
                status
            )));
        }

        let json: TokenResponse = res.json().await?;

        Ok(Token {
            access_token: json.access_token,
            refresh_token: json.refresh_token,
            scope: json.scope,
            expires_in: json.expires_in,
            obtained_at: Utc::now(),
        })
    }
}
