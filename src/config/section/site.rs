//! `[site]` section configuration.
//!
//! Identity of the blog as it appears in the generated feeds.
//!
//! # Example
//!
//! ```toml
//! [site]
//! url = "https://blog.tatmius.net"   # Base URL (overridden by SITE_URL)
//! title = "tatmius.net Blog"         # Combined feed title
//!
//! [site.titles]                      # Per-locale feed titles
//! ja = "tatmius.net ブログ"
//! en = "tatmius.net Blog"
//!
//! [site.author]
//! name = "tatmius"
//! # uri defaults to site.url
//! # email = "me@example.com"
//! ```

use crate::article::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fallback base URL when neither config, env nor CLI provide one.
pub const DEFAULT_SITE_URL: &str = "https://blog.tatmius.net";

/// Site identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Base URL, without trailing slash requirements.
    pub url: String,

    /// Title of the combined (all locales) feed.
    pub title: String,

    /// Per-locale feed titles keyed by locale code. Missing locales use
    /// built-in defaults.
    pub titles: BTreeMap<String, String>,

    /// Fixed author identity attached to every feed.
    pub author: AuthorConfig,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
            title: "tatmius.net Blog".to_string(),
            titles: BTreeMap::new(),
            author: AuthorConfig::default(),
        }
    }
}

impl SiteSectionConfig {
    /// Base URL with any trailing `/` removed, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Feed title for a locale-scoped feed.
    pub fn locale_title(&self, locale: Locale) -> &str {
        self.titles
            .get(locale.code())
            .map_or(locale.default_feed_title(), String::as_str)
    }
}

/// `[site.author]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    /// Author URI; `None` means "use the site URL".
    pub uri: Option<String>,
    pub email: Option<String>,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "tatmius".to_string(),
            uri: None,
            email: None,
        }
    }
}
