//! Model Context Protocol front end.
//!
//! Exposes the mixer as tools an LLM agent can call over stdio. Tool results
//! are pretty-printed JSON; domain failures come back as tool errors carrying
//! the same `{ error, message }` body the HTTP API uses, while malformed
//! arguments are rejected as invalid parameters.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use rmcp::{
    ErrorData, ServerHandler, ServiceExt,
    handler::server::tool::{Parameters, ToolRouter},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    schemars, tool, tool_handler, tool_router,
    transport::stdio,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    Res,
    error::MixerError,
    management::{MixerState, RESOLVE_CANDIDATES},
    info, server, types, utils, warning,
};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetAccessTokenRequest {
    #[schemars(
        description = "Authorization code from the Spotify redirect, or the full redirect URL"
    )]
    pub code: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchArtistRequest {
    #[schemars(description = "Name of the artist to search for")]
    pub artist_name: String,

    #[schemars(description = "Maximum number of candidates to return (default 10)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ArtistTopTracksRequest {
    #[schemars(description = "Name of the artist whose top tracks to fetch")]
    pub artist_name: String,

    #[schemars(description = "Number of tracks to return, 1-10 (default 10)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateMixedPlaylistRequest {
    #[schemars(description = "Artist names, in the order their tracks should appear")]
    pub artists: Vec<String>,

    #[schemars(description = "Name of the playlist to create")]
    pub playlist_name: String,

    #[schemars(description = "Top tracks to take from each artist, 1-10 (default 5)")]
    pub songs_per_artist: Option<u32>,
}

#[derive(Clone)]
pub struct MixerToolServer {
    state: MixerState,
    callback_addr: String,
    callback_started: Arc<AtomicBool>,
    tool_router: ToolRouter<MixerToolServer>,
}

impl MixerToolServer {
    /// `callback_addr` is where the OAuth callback listener is started the
    /// first time authentication is requested.
    pub fn new(state: MixerState, callback_addr: impl Into<String>) -> Self {
        Self {
            state,
            callback_addr: callback_addr.into(),
            callback_started: Arc::new(AtomicBool::new(false)),
            tool_router: Self::tool_router(),
        }
    }

    fn ensure_callback_listener(&self) {
        if self.callback_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let state = self.state.clone();
        let addr = self.callback_addr.clone();
        let started = Arc::clone(&self.callback_started);
        tokio::spawn(async move {
            if let Err(e) = server::start_api_server(state, &addr).await {
                warning!("Callback listener stopped: {}", e);
                started.store(false, Ordering::SeqCst);
            }
        });
    }
}

fn success(value: Value) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
    )]))
}

fn failure(err: MixerError) -> Result<CallToolResult, ErrorData> {
    if let MixerError::InvalidRequest(msg) = err {
        return Err(ErrorData::invalid_params(msg, None));
    }
    let body = err.to_json();
    Ok(CallToolResult::error(vec![Content::text(
        serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string()),
    )]))
}

fn validate_limit(limit: Option<u32>, default: u32) -> Result<u32, MixerError> {
    let limit = limit.unwrap_or(default);
    if !(types::MIN_SONGS_PER_ARTIST..=types::MAX_SONGS_PER_ARTIST).contains(&limit) {
        return Err(MixerError::InvalidRequest(format!(
            "limit must be between {} and {}",
            types::MIN_SONGS_PER_ARTIST,
            types::MAX_SONGS_PER_ARTIST
        )));
    }
    Ok(limit)
}

#[tool_router]
impl MixerToolServer {
    #[tool(
        description = "Start Spotify authentication. Returns a URL the user must open and approve; afterwards the redirect completes login, or pass the code to set_access_token."
    )]
    pub async fn authenticate_spotify(&self) -> Result<CallToolResult, ErrorData> {
        match self.state.authenticator.authorization_url() {
            Ok(url) => {
                self.ensure_callback_listener();
                success(json!({
                    "auth_url": url,
                    "instructions": "Open auth_url in a browser and approve access. If the redirect page cannot be reached, copy the code from its URL and call set_access_token."
                }))
            }
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "Complete Spotify authentication with the authorization code (or the full redirect URL) obtained after approving access."
    )]
    pub async fn set_access_token(
        &self,
        Parameters(SetAccessTokenRequest { code }): Parameters<SetAccessTokenRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let Some((code, state)) = utils::code_from_input(&code) else {
            return failure(MixerError::InvalidRequest(
                "code must not be empty".to_string(),
            ));
        };

        match self
            .state
            .authenticator
            .complete_pasted_authorization(&self.state.session, &code, state.as_deref())
            .await
        {
            Ok(session) => success(json!({
                "authenticated": session.is_authenticated,
                "message": "Spotify authentication complete"
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "Search Spotify for artists matching a name.")]
    pub async fn search_artist(
        &self,
        Parameters(SearchArtistRequest { artist_name, limit }): Parameters<SearchArtistRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let session = self.state.session_snapshot().await;
        match self
            .state
            .mixer
            .resolver()
            .search(
                &session,
                &artist_name,
                limit.unwrap_or(RESOLVE_CANDIDATES),
            )
            .await
        {
            Ok(artists) => success(json!({
                "query": artist_name,
                "artists": artists,
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(description = "Resolve an artist by name and list their top tracks on Spotify.")]
    pub async fn get_artist_top_tracks(
        &self,
        Parameters(ArtistTopTracksRequest { artist_name, limit }): Parameters<
            ArtistTopTracksRequest,
        >,
    ) -> Result<CallToolResult, ErrorData> {
        let limit = match validate_limit(limit, types::MAX_SONGS_PER_ARTIST) {
            Ok(limit) => limit,
            Err(e) => return failure(e),
        };

        let session = self.state.session_snapshot().await;
        match self
            .state
            .mixer
            .top_tracks(&session, &artist_name, limit as usize)
            .await
        {
            Ok((artist, tracks)) => success(json!({
                "artist": artist,
                "market": self.state.mixer.market(),
                "tracks": tracks,
            })),
            Err(e) => failure(e),
        }
    }

    #[tool(
        description = "Create a private Spotify playlist mixing the top tracks of several artists, grouped in the given artist order."
    )]
    pub async fn create_mixed_playlist(
        &self,
        Parameters(CreateMixedPlaylistRequest {
            artists,
            playlist_name,
            songs_per_artist,
        }): Parameters<CreateMixedPlaylistRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let request = types::MixRequest {
            artist_names: artists,
            playlist_name,
            songs_per_artist: songs_per_artist.unwrap_or(types::DEFAULT_SONGS_PER_ARTIST),
        };
        if let Err(e) = request.validate() {
            return failure(e);
        }

        let session = self.state.session_snapshot().await;
        match self.state.mixer.mix(&session, &request).await {
            Ok(result) => success(json!({
                "total_tracks": result.tracks.len(),
                "result": result,
            })),
            Err(e) => failure(e),
        }
    }
}

#[tool_handler]
impl ServerHandler for MixerToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some("Spotify playlist mixer. Call 'authenticate_spotify' first and have the user approve access (or pass the code to 'set_access_token'). Then use 'search_artist', 'get_artist_top_tracks' and 'create_mixed_playlist'.".to_string()),
        }
    }
}

/// Serves the tools over stdin/stdout until the client disconnects.
pub async fn serve_stdio(state: MixerState, callback_addr: String) -> Res<()> {
    info!("Starting MCP server on stdio");
    let service = MixerToolServer::new(state, callback_addr)
        .serve(stdio())
        .await
        .map_err(|e| e.to_string())?;

    service.waiting().await.map_err(|e| e.to_string())?;
    Ok(())
}
