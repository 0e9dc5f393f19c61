//! Show command - displays information.

use anyhow::Result;

use crate::config::Config;
use crate::replacements;

/// Show target for the show command.
pub enum ShowTarget {
    /// Show configuration
    Config,
    /// Show known replacement keys
    Keys,
}

/// Execute the show command.
pub fn cmd_show(config: &Config, target: ShowTarget) -> Result<()> {
    match target {
        ShowTarget::Config => {
            config.print();
        }
        ShowTarget::Keys => {
            let store =
                replacements::load_all(&config.replacements_file, &config.include_dir)?;
            if store.is_empty() {
                println!("no replacement keys are defined");
            } else {
                for (key, value) in &store {
                    println!("{}  ({})", key, value.origin);
                }
            }
        }
    }
    Ok(())
}
