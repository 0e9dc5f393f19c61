//! Distweave library exports.
//!
//! Exposes the expansion engine and its collaborators for integration
//! testing and for embedding the engine without the CLI.

pub mod commands;
pub mod config;
pub mod error;
pub mod expand;
pub mod includes;
pub mod replacements;
