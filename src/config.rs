//! Configuration management for distweave.
//!
//! Reads configuration from .env file and environment variables.
//! Environment variables take precedence over .env file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::replacements::REPLACEMENTS_FILE_NAME;

/// Distweave configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding include files and the replacements file
    /// (default: include)
    pub include_dir: PathBuf,
    /// Flat key=value replacements file
    /// (default: <include_dir>/replacements.properties)
    pub replacements_file: PathBuf,
}

impl Config {
    /// Load configuration from .env file and environment.
    pub fn load(base_dir: &Path) -> Self {
        let mut env_vars = HashMap::new();

        // Try to load .env file
        let env_path = base_dir.join(".env");
        if env_path.exists() {
            if let Ok(content) = fs::read_to_string(&env_path) {
                for line in content.lines() {
                    let line = line.trim();
                    // Skip comments and empty lines
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    // Parse KEY=value
                    if let Some((key, value)) = line.split_once('=') {
                        let key = key.trim();
                        let value = value.trim();
                        // Remove quotes if present
                        let value = value.trim_matches('"').trim_matches('\'');
                        env_vars.insert(key.to_string(), value.to_string());
                    }
                }
            }
        }

        // Environment variables override .env file
        for (key, value) in std::env::vars() {
            env_vars.insert(key, value);
        }

        let include_dir = env_vars
            .get("INCLUDE_DIR")
            .map(|s| absolute_or_joined(base_dir, s))
            .unwrap_or_else(|| base_dir.join("include"));

        let replacements_file = env_vars
            .get("REPLACEMENTS_FILE")
            .map(|s| absolute_or_joined(base_dir, s))
            .unwrap_or_else(|| include_dir.join(REPLACEMENTS_FILE_NAME));

        Self {
            include_dir,
            replacements_file,
        }
    }

    /// Check if the include directory is available.
    pub fn has_include_dir(&self) -> bool {
        self.include_dir.is_dir()
    }

    /// Check if the replacements file is available.
    pub fn has_replacements_file(&self) -> bool {
        self.replacements_file.is_file()
    }

    /// Print configuration for debugging.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  INCLUDE_DIR: {}", self.include_dir.display());
        println!("  REPLACEMENTS_FILE: {}", self.replacements_file.display());
        if self.has_include_dir() {
            println!("  Include directory: FOUND");
        } else {
            println!("  Include directory: NOT FOUND (include-file replacements disabled)");
        }
        if self.has_replacements_file() {
            println!("  Replacements file: FOUND");
        } else {
            println!("  Replacements file: NOT FOUND (property replacements disabled)");
        }
    }
}

fn absolute_or_joined(base_dir: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}
