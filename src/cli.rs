//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Version string embedded by build.rs: includes the git SHA and build date
/// for dev builds, build date only for official --features release builds.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("TURNPAIR_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TURNPAIR_BUILD_DATE"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "turnpair",
    version = VERSION,
    about = "Turn exported chat history into supervised (context, response) training pairs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract training pairs from a message log
    Extract(ExtractArgs),

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ExtractArgs {
    /// Input message log (JSONL, one message object per line)
    pub input: PathBuf,

    /// Output path (defaults to a name derived from the configured template)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Restrict extraction to a single conversation id
    #[arg(short, long)]
    pub conversation: Option<String>,

    /// Role label for the counterpart's side of each pair (downstream
    /// consumers expect "person")
    #[arg(long)]
    pub context_role: Option<String>,

    /// Role label for the local author's side of each pair
    #[arg(long)]
    pub response_role: Option<String>,

    /// Drop examples with no context turn (conversation openers)
    #[arg(long)]
    pub skip_unpaired: bool,

    /// Overwrite an existing output file without prompting
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration as TOML
    Show,

    /// Open the configuration file in $EDITOR
    Edit,

    /// Add missing fields to the configuration file
    Migrate {
        /// Apply changes without prompting
        #[arg(long)]
        yes: bool,
    },
}
