//! Subcommand handlers.

pub mod config;
pub mod extract;
