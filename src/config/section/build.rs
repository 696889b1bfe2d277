//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "out"                     # Static export root (must already exist)
//! index = "src/data/articles.json"   # Article index produced by the site build
//! headers = "_headers"               # Routing-rules file written next to the feeds
//! minify = false                     # Strip indentation from feed XML
//! validate = true                    # Parse generated feeds back before writing
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Feed generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    pub output: PathBuf,
    pub index: PathBuf,
    pub headers: PathBuf,
    pub minify: bool,
    pub validate: bool,

    /// Build everything but write nothing (CLI only).
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "out".into(),
            index: "src/data/articles.json".into(),
            headers: "_headers".into(),
            minify: false,
            validate: true,
            dry_run: false,
        }
    }
}
