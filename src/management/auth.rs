use std::{fmt, sync::Arc};

use tokio::sync::Mutex;

use crate::{
    config::SpotifyConfig,
    error::{MixerError, Result},
    info,
    spotify::{self, SharedApi},
    success,
    types::Token,
    utils,
};

/// The single user's authentication state.
///
/// Created unauthenticated at startup and changed only by
/// [`Authenticator`] after a successful code exchange. Every gated operation reads it
/// through [`AuthSession::access_token`].
#[derive(Clone, Default)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("is_authenticated", &self.is_authenticated)
            .finish()
    }
}

pub type SharedSession = Arc<Mutex<AuthSession>>;

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    /// The gate: the bearer token, or `Unauthenticated` before login.
    pub fn access_token(&self) -> Result<&str> {
        if self.is_authenticated {
            Ok(&self.access_token)
        } else {
            Err(MixerError::Unauthenticated)
        }
    }

    fn authenticate(&mut self, token: Token) {
        self.access_token = token.access_token;
        self.refresh_token = token.refresh_token;
        self.is_authenticated = true;
    }
}

/// Runs the OAuth authorization-code flow for the session.
pub struct Authenticator {
    api: SharedApi,
    config: SpotifyConfig,
    issued_state: std::sync::Mutex<Option<String>>,
}

impl Authenticator {
    pub fn new(api: SharedApi, config: SpotifyConfig) -> Self {
        Self {
            api,
            config,
            issued_state: std::sync::Mutex::new(None),
        }
    }

    /// Produces the consent URL and remembers its `state` for the callback.
    pub fn authorization_url(&self) -> Result<String> {
        let state = utils::generate_state();
        let url = spotify::auth::authorization_url(&self.config, &state)?;

        let mut issued = self
            .issued_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *issued = Some(state);

        Ok(url)
    }

    /// Completes the flow for a provider redirect to `/callback`.
    ///
    /// The redirect must echo the `state` of the last issued consent URL; a
    /// missing or different value is rejected before the code is exchanged.
    pub async fn complete_authorization(
        &self,
        session: &Mutex<AuthSession>,
        code: &str,
        state: Option<&str>,
    ) -> Result<AuthSession> {
        let code = checked_code(code)?;
        let returned = state.ok_or_else(|| {
            MixerError::Auth("missing state parameter in authorization redirect".to_string())
        })?;
        self.verify_state(returned)?;

        self.exchange(session, code).await
    }

    /// Completes the flow for a code the user copied by hand.
    ///
    /// A bare code carries no state and is accepted as is. When the full
    /// redirect URL was pasted its state is still checked.
    pub async fn complete_pasted_authorization(
        &self,
        session: &Mutex<AuthSession>,
        code: &str,
        state: Option<&str>,
    ) -> Result<AuthSession> {
        let code = checked_code(code)?;
        if let Some(returned) = state {
            self.verify_state(returned)?;
        }

        self.exchange(session, code).await
    }

    /// The session lock is only taken after the exchange succeeded.
    async fn exchange(&self, session: &Mutex<AuthSession>, code: &str) -> Result<AuthSession> {
        info!("Exchanging authorization code for an access token");
        let token = self.api.exchange_code(code).await?;

        let mut lock = session.lock().await;
        lock.authenticate(token);
        success!("Authenticated with Spotify");

        Ok(lock.clone())
    }

    fn verify_state(&self, returned: &str) -> Result<()> {
        let mut issued = self
            .issued_state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match issued.as_deref() {
            Some(expected) if expected == returned => {
                *issued = None;
                Ok(())
            }
            _ => Err(MixerError::Auth(
                "state parameter does not match the issued authorization request".to_string(),
            )),
        }
    }
}

fn checked_code(code: &str) -> Result<&str> {
    let code = code.trim();
    if code.is_empty() {
        return Err(MixerError::Auth("missing authorization code".to_string()));
    }
    Ok(code)
}
