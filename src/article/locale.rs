//! Supported content locales.

use std::fmt;

/// A supported language variant of the site.
///
/// Declaration order is the canonical order used for link lists and for
/// the set of feeds that get generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    Ja,
    En,
}

impl Locale {
    /// All supported locales, in canonical order.
    pub const ALL: [Self; 2] = [Self::Ja, Self::En];

    /// Short locale code used in URLs and `hreflang`.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// Text of the "read more" anchor appended to entry summaries.
    pub const fn read_more(self) -> &'static str {
        match self {
            Self::Ja => "記事を読む",
            Self::En => "Read more",
        }
    }

    /// Default title of this locale's feed.
    pub const fn default_feed_title(self) -> &'static str {
        match self {
            Self::Ja => "tatmius.net ブログ",
            Self::En => "tatmius.net Blog",
        }
    }

    #[cfg(test)]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Pick the representative locale for an article in the combined feed.
    ///
    /// Japanese wins whenever present; otherwise the first remaining locale
    /// in canonical order. Returns `None` for an empty set.
    pub fn primary(present: &[Self]) -> Option<Self> {
        if present.contains(&Self::Ja) {
            return Some(Self::Ja);
        }
        Self::ALL.into_iter().find(|l| present.contains(l))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
