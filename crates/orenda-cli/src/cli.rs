//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Default location of the local state file.
pub const DEFAULT_STATE_FILE: &str = "orenda_state.json";

/// Parsed command line.
#[derive(Debug, Parser)]
#[command(
    name = "orenda",
    version,
    about = "Orenda Bridge: a slow, reflective conversation with the houses"
)]
pub struct Cli {
    /// Base URL of the reflection endpoint. Without it every line comes from
    /// the scripted fallbacks.
    #[arg(long, env = "ORENDA_BRIDGE_URL", global = true)]
    pub bridge_url: Option<String>,

    /// Content bundle (JSON or YAML). Defaults to the built-in bundle.
    #[arg(long, env = "ORENDA_CONTENT", global = true)]
    pub content: Option<PathBuf>,

    /// Pacing overrides (JSON or YAML).
    #[arg(long, env = "ORENDA_PACING", global = true)]
    pub pacing: Option<PathBuf>,

    /// Local state file holding transcript, depth and reflections.
    #[arg(long, env = "ORENDA_STATE_FILE", default_value = DEFAULT_STATE_FILE, global = true)]
    pub state_file: PathBuf,

    /// Skip every delay.
    #[arg(long, global = true)]
    pub fast: bool,

    /// User identifier forwarded to the reflection endpoint.
    #[arg(long, env = "ORENDA_USER_ID", global = true)]
    pub user_id: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// What to run.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Start or resume the bridge conversation (default)
    Chat,
    /// Play the Houses Journey
    Journey,
    /// Export the persisted session as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Forget the persisted session and reflections
    Reset,
}
