//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use crate::commands::Command;

/// Default identity service URL.
pub const DEFAULT_SERVICE: &str = "http://localhost:5001";

/// Session store CLI backed by a remote identity service.
#[derive(Parser, Debug)]
#[command(name = "sessionkeep")]
#[command(author, version = env!("SESSIONKEEP_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the session lives and which service verifies it.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Identity service base URL
    #[arg(long, global = true, env = "SESSIONKEEP_SERVICE", default_value = DEFAULT_SERVICE)]
    pub service: String,

    /// Session file (defaults to the platform data directory)
    #[arg(long, global = true, env = "SESSIONKEEP_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long, global = true, conflicts_with = "session_file")]
    pub ephemeral: bool,

    /// Abort identity service requests after this many seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}
