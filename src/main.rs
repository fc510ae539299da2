use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotify_mixer::{
    cli,
    config::{self, SpotifyConfig},
    error, mcp,
    management::MixerState,
    types::{DEFAULT_SONGS_PER_ARTIST, MAX_SONGS_PER_ARTIST, MIN_SONGS_PER_ARTIST, MixRequest},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Address for the HTTP server and OAuth callback (defaults to SERVER_ADDRESS)
    #[clap(long, global = true)]
    addr: Option<String>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeOptions),

    /// Run the MCP tool server on stdio
    Mcp,

    /// Search Spotify for artists
    Search(SearchOptions),

    /// Create a playlist mixing the top tracks of several artists
    Mix(MixOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Open the Spotify authorization page in the browser on startup
    #[clap(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Artist name to search for
    pub name: String,

    /// Maximum number of candidates
    #[clap(long, default_value_t = 10)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct MixOptions {
    /// Artist to include; repeat for each artist, in playlist order
    #[clap(long = "artist", required = true, action = ArgAction::Append, num_args = 1)]
    pub artists: Vec<String>,

    /// Name of the playlist to create
    #[clap(long)]
    pub name: String,

    /// Top tracks to take from each artist
    #[clap(
        long,
        default_value_t = DEFAULT_SONGS_PER_ARTIST,
        value_parser = clap::value_parser!(u32).range(MIN_SONGS_PER_ARTIST as i64..=MAX_SONGS_PER_ARTIST as i64)
    )]
    pub songs_per_artist: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let addr = cli.addr.clone().unwrap_or_else(config::server_addr);
    let state = MixerState::spotify(SpotifyConfig::from_env());

    let result = match cli.command {
        Command::Serve(opt) => cli::serve(state, &addr, opt.open).await,
        Command::Mcp => mcp::serve_stdio(state, addr).await,
        Command::Search(opt) => cli::search_artists(state, &addr, &opt.name, opt.limit).await,
        Command::Mix(opt) => {
            let request = MixRequest {
                artist_names: opt.artists,
                playlist_name: opt.name,
                songs_per_artist: opt.songs_per_artist,
            };
            cli::mix(state, &addr, request).await
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{}", e);
    }
}
