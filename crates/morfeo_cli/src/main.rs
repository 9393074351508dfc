//! Morfeo CLI
//!
//! Drives the plugin controllers against a document stored as JSON:
//! - `morfeo init`: write morfeo.toml and an empty document
//! - `morfeo dispatch <action>`: run one plugin action and save the result
//! - `morfeo ledger`: show which components each variant owns

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Keep a Morfeo theme page and its Box component set in sync
#[derive(Parser, Debug)]
#[command(name = "morfeo")]
#[command(about = "Create, sync, and export a Morfeo theme page")]
#[command(version)]
struct Cli {
    /// Project directory (or path to morfeo.toml)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a default morfeo.toml and an empty document
    Init {
        /// Overwrite an existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Run one plugin action against the document
    Dispatch {
        /// generate-theme, create-morfeo-theme, sync-theme or close-plugin
        action: String,
    },

    /// Print the variant snapshots saved on the theme page
    Ledger,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { force } => commands::init(&cli.dir, force),
        Commands::Dispatch { action } => {
            let dispatched = commands::dispatch(&cli.dir, &action)?;
            tracing::debug!(
                outcome = ?dispatched.outcome,
                notifications = dispatched.notifications.len(),
                posted = dispatched.posted.len(),
                "action finished"
            );
            Ok(())
        }
        Commands::Ledger => commands::ledger(&cli.dir),
    }
}
