//! CLI command handlers.
//!
//! Each submodule handles a specific CLI command:
//! - `expand` - Expand placeholders in a template file
//! - `check` - Validate replacement sources and report keys
//! - `show` - Display information

pub mod check;
pub mod expand;
pub mod show;

pub use check::cmd_check;
pub use expand::cmd_expand;
pub use show::cmd_show;
