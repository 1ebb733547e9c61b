//! Command line and environment configuration.

use clap::{Parser, Subcommand};
use std::time::Duration;

/// Chess board with a move-logging server
#[derive(Parser, Debug)]
#[command(name = "chess_board")]
#[command(about = "Terminal chess board and move log server", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the move-log HTTP server
    Serve {
        /// Host to bind to
        #[arg(long, env = "CHESS_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, env = "CHESS_PORT", default_value_t = 8080)]
        port: u16,
    },

    /// Play on the terminal board
    Play {
        /// Where accepted moves are posted
        #[arg(long, env = "CHESS_MOVE_ENDPOINT", default_value = "http://127.0.0.1:8080/api/move")]
        endpoint: String,

        /// Seconds to wait for the move log before giving up on a move
        #[arg(long, default_value_t = 5)]
        timeout_secs: u64,

        /// Do not post moves anywhere
        #[arg(long)]
        offline: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub offline: bool,
}

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Serve(ServerConfig),
    Play(PlayConfig),
}

impl From<Cli> for Mode {
    fn from(cli: Cli) -> Self {
        match cli.command {
            Command::Serve { host, port } => Mode::Serve(ServerConfig { host, port }),
            Command::Play {
                endpoint,
                timeout_secs,
                offline,
            } => Mode::Play(PlayConfig {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
                offline,
            }),
        }
    }
}
