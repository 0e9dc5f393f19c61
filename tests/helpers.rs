//! Shared test utilities for distweave tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use distweave::config::Config;

/// Test environment with a temporary base directory and include directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Base directory (project root simulation)
    pub base_dir: PathBuf,
    /// Include directory (replacement sources)
    pub include_dir: PathBuf,
    /// Replacements properties file inside the include directory
    pub replacements_file: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with an empty include directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_dir = temp_dir.path().to_path_buf();
        let include_dir = base_dir.join("include");
        fs::create_dir_all(&include_dir).expect("Failed to create include dir");
        let replacements_file = include_dir.join("replacements.properties");

        Self {
            _temp_dir: temp_dir,
            base_dir,
            include_dir,
            replacements_file,
        }
    }

    /// Configuration pointing at this environment's directories.
    pub fn config(&self) -> Config {
        Config {
            include_dir: self.include_dir.clone(),
            replacements_file: self.replacements_file.clone(),
        }
    }

    /// Write the replacements properties file.
    pub fn write_replacements(&self, content: &str) {
        fs::write(&self.replacements_file, content).expect("Failed to write replacements file");
    }

    /// Write an include file; returns its path.
    pub fn write_include(&self, name: &str, content: &str) -> PathBuf {
        let path = self.include_dir.join(name);
        fs::write(&path, content).expect("Failed to write include file");
        path
    }

    /// Write a template file in the base directory; returns its path.
    pub fn write_template(&self, name: &str, content: &str) -> PathBuf {
        let path = self.base_dir.join(name);
        fs::write(&path, content).expect("Failed to write template file");
        path
    }
}

/// Assert that a file exists and contains expected content.
pub fn assert_file_contains(path: &Path, expected: &str) {
    let content =
        fs::read_to_string(path).unwrap_or_else(|_| panic!("Failed to read file: {}", path.display()));
    assert!(
        content.contains(expected),
        "File {} does not contain expected content.\nExpected to find: {}\nActual content: {}",
        path.display(),
        expected,
        content
    );
}
