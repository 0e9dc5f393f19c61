//! Check command - validates replacement sources without touching files.
//!
//! Builds all contributions, runs conflict validation, and eagerly resolves
//! every key so cycles surface before any template is expanded.

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::expand::ExpansionSession;
use crate::replacements;

/// One resolved key in the check report.
#[derive(Debug, Serialize)]
pub struct KeyReport {
    pub key: String,
    pub origin: String,
    pub expanded: String,
}

/// Machine-readable result of a check run.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub keys: Vec<KeyReport>,
}

/// Execute the check command.
pub fn cmd_check(config: &Config, json: bool) -> Result<()> {
    let report = run_check(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} replacement keys:", report.keys.len());
    for entry in &report.keys {
        println!("  {}  ({})", entry.key, entry.origin);
    }
    println!("all replacement values expand cleanly");
    Ok(())
}

/// Validate both sources and resolve every key.
pub fn run_check(config: &Config) -> Result<CheckReport> {
    let store = replacements::load_all(&config.replacements_file, &config.include_dir)?;

    let mut session = ExpansionSession::new(&store);
    let mut keys = Vec::new();
    for (key, value) in &store {
        let expanded = session
            .resolve_key(key)?
            .unwrap_or_else(|| value.text.clone());
        keys.push(KeyReport {
            key: key.clone(),
            origin: value.origin.clone(),
            expanded,
        });
    }
    Ok(CheckReport { keys })
}
