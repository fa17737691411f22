//! turnpair binary entry point.

mod cli;
mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cli::{Cli, Commands, ConfigAction};

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    // Log to stderr so piped stdout stays clean; RUST_LOG controls verbosity
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract(args) => commands::extract::handle(args),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(),
            ConfigAction::Edit => commands::config::handle_edit(),
            ConfigAction::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "turnpair", &mut std::io::stdout());
            Ok(())
        }
    }
}
