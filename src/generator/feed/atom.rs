//! Article index → Atom feed model.
//!
//! Pure mapping: no I/O, the generation instant is injected so empty feeds
//! stay testable.

use super::{FeedVariant, common::select_articles};
use crate::{
    article::{ArticleIndex, ArticleRecord, Locale},
    config::SiteSectionConfig,
    feed::{AtomAuthor, AtomEntry, AtomFeedMeta, AtomLink, TextType, build_atom_feed},
    utils::date::DateTimeUtc,
};

/// A feed ready for serialization.
#[derive(Debug, Clone)]
pub struct BuiltFeed {
    pub variant: FeedVariant,
    pub meta: AtomFeedMeta,
    pub entries: Vec<AtomEntry>,
}

impl BuiltFeed {
    pub fn to_xml(&self) -> String {
        build_atom_feed(&self.meta, &self.entries)
    }
}

/// Build the feed model for one variant.
///
/// `updated` is the newest included article date at midnight UTC, or `now`
/// when the feed has no entries.
pub fn build_feed(
    index: &ArticleIndex,
    variant: FeedVariant,
    site: &SiteSectionConfig,
    now: DateTimeUtc,
) -> BuiltFeed {
    let base_url = site.base_url();
    let mut latest: Option<DateTimeUtc> = None;
    let mut entries = Vec::new();

    for article in select_articles(index, variant) {
        if let Some(entry) = article_to_entry(article, variant, base_url) {
            latest = latest.max(Some(article.date));
            entries.push(entry);
        }
    }

    let self_url = format!("{base_url}{}", variant.url_path());
    let title = match variant {
        FeedVariant::All => site.title.as_str(),
        FeedVariant::Locale(locale) => site.locale_title(locale),
    };

    let author = AtomAuthor {
        name: site.author.name.clone(),
        uri: Some(site.author.uri.clone().unwrap_or_else(|| base_url.to_string())),
        email: site.author.email.clone(),
    };

    let meta = AtomFeedMeta {
        title: title.to_string(),
        id: self_url.clone(),
        self_url,
        updated: latest.unwrap_or(now).to_rfc3339(),
        author: Some(author),
    };

    BuiltFeed {
        variant,
        meta,
        entries,
    }
}

/// Canonical article URL for a locale.
pub fn article_url(base_url: &str, locale: Locale, slug: &str) -> String {
    format!("{base_url}/{}/articles/{slug}", locale.code())
}

fn article_to_entry(
    article: &ArticleRecord,
    variant: FeedVariant,
    base_url: &str,
) -> Option<AtomEntry> {
    let (locale, link_locales) = match variant {
        FeedVariant::All => (article.primary_locale()?, article.locales()),
        FeedVariant::Locale(locale) => (locale, vec![locale]),
    };
    let translation = article.translation(locale)?;

    let url = article_url(base_url, locale, &article.slug);
    let timestamp = article.date.to_rfc3339();
    let summary = format!(
        r#"{} <a href="{url}">{}</a>"#,
        translation.excerpt,
        locale.read_more()
    );

    let links = link_locales
        .into_iter()
        .map(|l| AtomLink::new(article_url(base_url, l, &article.slug)).with_hreflang(l.code()))
        .collect();

    Some(AtomEntry {
        id: url,
        title: translation.title.clone(),
        updated: timestamp.clone(),
        published: Some(timestamp),
        summary,
        summary_type: TextType::Html,
        links,
    })
}
