//! Expand command - expands placeholders in a template file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::expand::ExpansionSession;
use crate::includes;
use crate::replacements;

/// Options for the expand command.
pub struct ExpandOptions {
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
    /// Use legacy per-file include resolution instead of the merged set.
    pub legacy: bool,
    /// Copy the input without content expansion.
    pub raw: bool,
}

/// Execute the expand command.
pub fn cmd_expand(config: &Config, input: &Path, options: &ExpandOptions) -> Result<()> {
    if options.raw {
        println!("skipped content expansion for file {}", input.display());
        return write_raw(input, options.output.as_deref());
    }

    let expanded = expand_input(config, input, options.legacy)?;
    match &options.output {
        Some(output) => {
            write_output(output, &expanded)?;
            println!("expanded {} to {}", input.display(), output.display());
        }
        None => print!("{expanded}"),
    }
    Ok(())
}

/// Expand one input file to a string.
pub fn expand_input(config: &Config, input: &Path, legacy: bool) -> Result<String> {
    if legacy {
        return includes::expand_file(input, &config.include_dir);
    }

    let store = replacements::load_all(&config.replacements_file, &config.include_dir)?;
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let origin = format!(
        "file {}",
        input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.display().to_string())
    );
    let expanded = ExpansionSession::new(&store).expand(&text, &origin)?;
    Ok(expanded)
}

fn write_raw(input: &Path, output: Option<&Path>) -> Result<()> {
    match output {
        Some(output) => {
            if let Some(parent) = output.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(input, output)
                .with_context(|| format!("failed to copy {} to {}", input.display(), output.display()))?;
            println!("copied {} to {}", input.display(), output.display());
        }
        None => {
            let bytes = fs::read(input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            use std::io::Write;
            std::io::stdout().write_all(&bytes)?;
        }
    }
    Ok(())
}

fn write_output(output: &Path, content: &str) -> Result<()> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(output, content).with_context(|| format!("failed to write {}", output.display()))
}
