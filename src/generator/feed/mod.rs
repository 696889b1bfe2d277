//! Feed variants and their construction.
//!
//! Three feeds are generated from one index:
//!
//! - **Combined** (`/feed.xml`): every article once, in its preferred locale
//! - **Locale** (`/ja/feed.xml`, `/en/feed.xml`): articles translated into
//!   that locale only

pub mod atom;
mod common;

pub use atom::{BuiltFeed, build_feed};

use crate::article::{ArticleRecord, Locale};
use std::path::PathBuf;

/// File name of every generated feed.
pub const FEED_FILE: &str = "feed.xml";

/// Which feed to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedVariant {
    /// All locales, one representative translation per article.
    All,
    /// A single locale.
    Locale(Locale),
}

impl FeedVariant {
    /// Every generated feed, in generation order.
    pub const ALL: [Self; 3] = [
        Self::All,
        Self::Locale(Locale::Ja),
        Self::Locale(Locale::En),
    ];

    /// Whether an article belongs in this feed.
    pub fn includes(self, article: &ArticleRecord) -> bool {
        match self {
            Self::All => article.primary_locale().is_some(),
            Self::Locale(locale) => article.has_locale(locale),
        }
    }

    /// Output path relative to the export root (`feed.xml`, `ja/feed.xml`).
    pub fn file_path(self) -> PathBuf {
        match self {
            Self::All => PathBuf::from(FEED_FILE),
            Self::Locale(locale) => PathBuf::from(locale.code()).join(FEED_FILE),
        }
    }

    /// URL path served for this feed (`/feed.xml`, `/ja/feed.xml`).
    pub fn url_path(self) -> String {
        match self {
            Self::All => format!("/{FEED_FILE}"),
            Self::Locale(locale) => format!("/{}/{FEED_FILE}", locale.code()),
        }
    }
}

/// URL paths of all generated feeds.
pub fn feed_url_paths() -> [String; 3] {
    FeedVariant::ALL.map(FeedVariant::url_path)
}
