//! Atom 1.0 (RFC 4287) document model and serializer.
//!
//! Plain data in, XML text out. Nothing here touches the filesystem or the
//! article index; ordering and filtering belong to the generator.

mod atom;

pub use atom::build_atom_feed;

/// Feed author (`<author>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomAuthor {
    pub name: String,
    pub uri: Option<String>,
    pub email: Option<String>,
}

/// Feed-level metadata.
///
/// `updated` must already be an RFC 3339 string; it is written verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomFeedMeta {
    pub title: String,
    pub id: String,
    pub self_url: String,
    pub updated: String,
    pub author: Option<AtomAuthor>,
}

/// An alternate link of an entry, optionally tagged with its language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomLink {
    pub href: String,
    pub hreflang: Option<String>,
}

impl AtomLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            hreflang: None,
        }
    }

    pub fn with_hreflang(mut self, hreflang: impl Into<String>) -> Self {
        self.hreflang = Some(hreflang.into());
        self
    }
}

/// Atom text construct type, emitted as the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextType {
    /// Plain text; no `type` attribute is written.
    #[default]
    Text,
    /// Escaped HTML that readers render after un-escaping.
    Html,
}

impl TextType {
    pub const fn as_attr(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Html => Some("html"),
        }
    }
}

/// One `<entry>`. Timestamps are written verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomEntry {
    pub id: String,
    pub title: String,
    pub updated: String,
    pub published: Option<String>,
    pub summary: String,
    pub summary_type: TextType,
    pub links: Vec<AtomLink>,
}
