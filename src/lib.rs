//! Spotify Playlist Mixer Library
//!
//! Builds Spotify playlists from the top tracks of several artists. The same
//! service is reachable through an HTTP API, a Model Context Protocol tool
//! server and a command-line client.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints
//! - `cli` - Command-line command implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The error taxonomy shared by all layers
//! - `management` - Authentication session, artist resolution and mixing
//! - `mcp` - Tool server for LLM agents
//! - `server` - HTTP router and listener
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotify_mixer::{config, config::SpotifyConfig, management::MixerState};
//!
//! #[tokio::main]
//! async fn main() -> spotify_mixer::Res<()> {
//!     config::load_env().await?;
//!     let state = MixerState::spotify(SpotifyConfig::from_env());
//!     let url = state.authenticator.authorization_url()?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod mcp;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias for the binary's glue code.
///
/// Library operations return [`error::Result`]; this boxed form lets command
/// handlers mix those with errors from other crates.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// The console macros write to stderr: stdout carries the MCP stdio transport
// and the CLI's table output.

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Resolving {} artists", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the binary; library code returns
/// [`error::MixerError`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as an artist skipped during a mix.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
