//! CLI module for the API key tool
//!
//! Provides subcommands:
//! - `generate`: mint a new API key and print it as JSON

pub mod generate;

use clap::{Parser, Subcommand};

/// API key management tool
#[derive(Parser)]
#[command(name = "api-keys")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a new API key
    Generate(generate::GenerateArgs),
}
