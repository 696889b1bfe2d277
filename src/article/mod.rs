//! Article index: the read-only snapshot feeds are generated from.
//!
//! The index is a JSON object produced by the content build:
//!
//! ```json
//! {
//!   "20241013-RLcircuit": {
//!     "slug": "20241013-RLcircuit",
//!     "date": "2024-10-13",
//!     "ja": { "title": "…", "excerpt": "…" },
//!     "en": { "title": "…", "excerpt": "…" }
//!   }
//! }
//! ```
//!
//! Object key order is preserved (`serde_json/preserve_order`), so records
//! keep the order the index declares them in. Malformed records are skipped
//! rather than failing the whole load.

mod locale;

pub use locale::Locale;

use crate::{debug, log, utils::date::DateTimeUtc};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Errors that make the whole index unusable.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to read article index `{}`", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("article index is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("article index must be a JSON object keyed by slug")]
    NotAnObject,
}

/// Why a single record was left out of the index.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is not an object")]
    NotAnObject,

    #[error("missing `date`")]
    MissingDate,

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid `{locale}` translation")]
    BadTranslation {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },

    #[error("no translation in any supported locale")]
    NoTranslation,
}

/// Title and excerpt of one translation of an article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    pub title: String,
    pub excerpt: String,
}

impl Translation {
    #[cfg(test)]
    pub fn new(title: impl Into<String>, excerpt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
        }
    }
}

/// One article with its available translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    pub slug: String,
    pub date: DateTimeUtc,
    translations: BTreeMap<Locale, Translation>,
}

impl ArticleRecord {
    pub fn new(slug: impl Into<String>, date: DateTimeUtc) -> Self {
        Self {
            slug: slug.into(),
            date,
            translations: BTreeMap::new(),
        }
    }

    /// Builder-style helper to attach a translation.
    #[cfg(test)]
    pub fn with_translation(mut self, locale: Locale, translation: Translation) -> Self {
        self.translations.insert(locale, translation);
        self
    }

    pub fn translation(&self, locale: Locale) -> Option<&Translation> {
        self.translations.get(&locale)
    }

    pub fn has_locale(&self, locale: Locale) -> bool {
        self.translations.contains_key(&locale)
    }

    /// Locales this article exists in, in canonical order.
    pub fn locales(&self) -> Vec<Locale> {
        self.translations.keys().copied().collect()
    }

    /// Representative locale for the combined feed.
    pub fn primary_locale(&self) -> Option<Locale> {
        Locale::primary(&self.locales())
    }

    /// Parse one index entry. `key` is the slug fallback when the record
    /// carries no `slug` field of its own.
    fn from_value(key: &str, value: &Value) -> Result<Self, RecordError> {
        let object = value.as_object().ok_or(RecordError::NotAnObject)?;

        let slug = object
            .get("slug")
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_owned();

        let date_str = object
            .get("date")
            .and_then(Value::as_str)
            .ok_or(RecordError::MissingDate)?;
        let date = DateTimeUtc::parse_date(date_str)
            .ok_or_else(|| RecordError::InvalidDate(date_str.to_owned()))?;

        let mut record = Self::new(slug, date);
        for locale in Locale::ALL {
            match object.get(locale.code()) {
                None | Some(Value::Null) => {}
                Some(raw) => {
                    let translation = Translation::deserialize(raw)
                        .map_err(|source| RecordError::BadTranslation { locale, source })?;
                    record.translations.insert(locale, translation);
                }
            }
        }

        if record.translations.is_empty() {
            return Err(RecordError::NoTranslation);
        }
        Ok(record)
    }
}

/// Loaded article index, in declared order.
#[derive(Debug, Clone, Default)]
pub struct ArticleIndex {
    records: Vec<ArticleRecord>,
    skipped: usize,
}

impl ArticleIndex {
    /// Read and parse the index file, logging how many records were dropped.
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content =
            fs::read_to_string(path).map_err(|err| IndexError::Io(path.to_path_buf(), err))?;
        let index = Self::from_json(&content)?;

        if index.skipped > 0 {
            log!("index"; "skipped {} malformed record{}", index.skipped,
                if index.skipped == 1 { "" } else { "s" });
        }
        debug!("index"; "loaded {} articles from {}", index.len(), path.display());
        Ok(index)
    }

    /// Parse an index from its JSON text.
    pub fn from_json(content: &str) -> Result<Self, IndexError> {
        let root: Value = serde_json::from_str(content)?;
        let Value::Object(entries) = root else {
            return Err(IndexError::NotAnObject);
        };
        Ok(Self::from_entries(&entries))
    }

    fn from_entries(entries: &Map<String, Value>) -> Self {
        let mut records = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for (key, value) in entries {
            match ArticleRecord::from_value(key, value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    debug!("index"; "skipped `{}`: {}", key, e);
                    skipped += 1;
                }
            }
        }

        Self { records, skipped }
    }

    /// Build an index directly from records (declared order = vector order).
    #[cfg(test)]
    pub fn from_records(records: Vec<ArticleRecord>) -> Self {
        Self {
            records,
            skipped: 0,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArticleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of malformed records left out during parsing.
    #[cfg(test)]
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}
