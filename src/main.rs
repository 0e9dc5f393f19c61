//! Distweave - custom distribution content assembler.
//!
//! Expands `$key$` placeholders in override files against replacement
//! values drawn from a flat properties file and an include directory,
//! recursively, with cycle detection and indentation-preserving splicing.
#![allow(dead_code, unused_imports)]

mod commands;
mod config;
mod error;
mod expand;
mod includes;
mod replacements;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::expand::ExpandOptions;
use config::Config;

#[derive(Parser)]
#[command(name = "distweave")]
#[command(about = "Custom distribution content assembler")]
#[command(
    after_help = "QUICK START:\n  distweave check           Validate replacement sources\n  distweave expand in.conf  Expand placeholders to stdout\n  distweave show config     Show effective configuration"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand placeholders in a template file
    Expand {
        /// Template file to expand
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Resolve keys from include files per occurrence (legacy mode)
        #[arg(long)]
        legacy: bool,

        /// Copy the input without content expansion
        #[arg(long, conflicts_with = "legacy")]
        raw: bool,
    },

    /// Validate replacement sources and resolve every key
    Check {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
    /// Show known replacement keys
    Keys,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = std::env::current_dir()?;

    // Load .env if present
    dotenvy::dotenv().ok();
    let config = Config::load(&base_dir);

    match cli.command {
        Commands::Expand {
            input,
            output,
            legacy,
            raw,
        } => {
            commands::cmd_expand(
                &config,
                &input,
                &ExpandOptions {
                    output,
                    legacy,
                    raw,
                },
            )?;
        }

        Commands::Check { json } => {
            commands::cmd_check(&config, json)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
                ShowTarget::Keys => commands::show::ShowTarget::Keys,
            };
            commands::cmd_show(&config, show_target)?;
        }
    }

    Ok(())
}
