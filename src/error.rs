//! Engine error types.
//!
//! Two failures abort a run: two sources claiming the same replacement key,
//! and a replacement whose resolution chain revisits itself. Both carry the
//! structured data needed to render their diagnostics verbatim.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Two contribution sources declared the same replacement key.
///
/// Raised while the replacement set is being built, before any expansion
/// starts. Fatal to the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("there is property '{key}' in {first_source} and also there is an {second_origin}. Can't decide which one should be applied")]
pub struct ConflictError {
    /// The doubly-defined key.
    pub key: String,
    /// Description of the source that defined the key first.
    pub first_source: String,
    /// Origin label of the later, conflicting value.
    pub second_origin: String,
}

/// The sequence of in-progress resolutions that closed back on itself.
///
/// Both resolver flavors detect cycles the same way but label chain links
/// differently: the consolidated store knows each value's origin description,
/// while the legacy include resolver only knows which file contained each
/// occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleChain {
    /// Links are `(key, origin label)` pairs from the replacement set.
    Replacements(Vec<(String, String)>),
    /// Links are `(key, containing file)` pairs; the first link carries the
    /// target file that triggered the expansion.
    Includes(Vec<(String, PathBuf)>),
}

impl CycleChain {
    /// Keys in chain order, oldest first. The last key closes the cycle.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            CycleChain::Replacements(links) => links.iter().map(|(k, _)| k.as_str()).collect(),
            CycleChain::Includes(links) => links.iter().map(|(k, _)| k.as_str()).collect(),
        }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleChain::Replacements(links) => {
                render_links(f, links.iter().map(|(k, origin)| (k.as_str(), origin.clone())))
            }
            CycleChain::Includes(links) => render_links(
                f,
                links
                    .iter()
                    .map(|(k, file)| (k.as_str(), file.display().to_string())),
            ),
        }
    }
}

fn render_links<'a>(
    f: &mut fmt::Formatter<'_>,
    links: impl Iterator<Item = (&'a str, String)>,
) -> fmt::Result {
    for (i, (key, location)) in links.enumerate() {
        if i > 0 {
            write!(f, "\n  |\n")?;
        }
        write!(f, "'{key}' ({location})")?;
    }
    Ok(())
}

/// A replacement's resolution chain revisited one of its own keys.
///
/// Fatal; the full ordered chain is preserved for debuggability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct CycleError {
    pub chain: CycleChain,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "can not assemble custom distribution - detected a cyclic text expansion sequence:"
        )?;
        self.chain.render(f)
    }
}
