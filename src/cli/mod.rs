//! CLI module for the sentence cache
//!
//! Provides subcommands:
//! - `serve`: HTTP API server
//! - `lookup`: one-off lookup of a single term

pub mod lookup;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Sentence cache - example sentences for dictionary terms, cached locally
#[derive(Parser)]
#[command(name = "sentence-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Look up a single term and print the response envelope
    Lookup(lookup::LookupArgs),
}

/// Loads `.env`, the layered configuration and installs logging
fn load_config() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)?;

    Ok(config)
}
