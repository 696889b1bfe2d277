//! Article selection shared by every feed variant.

use super::FeedVariant;
use crate::article::{ArticleIndex, ArticleRecord};

/// Articles belonging to `variant`, newest first.
///
/// The sort is stable, so articles sharing a date keep the index's
/// declared order.
pub fn select_articles(index: &ArticleIndex, variant: FeedVariant) -> Vec<&ArticleRecord> {
    let mut articles: Vec<_> = index.iter().filter(|a| variant.includes(a)).collect();
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        article::{Locale, Translation},
        utils::date::DateTimeUtc,
    };

    fn article(slug: &str, date: &str, locales: &[Locale]) -> ArticleRecord {
        let date = DateTimeUtc::parse_date(date).unwrap();
        locales.iter().fold(ArticleRecord::new(slug, date), |record, locale| {
            record.with_translation(*locale, Translation::new(slug, "excerpt"))
        })
    }

    fn slugs(articles: &[&ArticleRecord]) -> Vec<String> {
        articles.iter().map(|a| a.slug.clone()).collect()
    }

    #[test]
    fn test_sorted_newest_first() {
        let index = ArticleIndex::from_records(vec![
            article("a", "2024-01-01", &[Locale::Ja]),
            article("b", "2024-06-01", &[Locale::Ja]),
            article("c", "2023-12-31", &[Locale::En]),
        ]);
        let selected = select_articles(&index, FeedVariant::All);
        assert_eq!(slugs(&selected), ["b", "a", "c"]);
    }

    #[test]
    fn test_ties_keep_declared_order() {
        let index = ArticleIndex::from_records(vec![
            article("first", "2024-01-01", &[Locale::Ja]),
            article("newer", "2024-02-01", &[Locale::Ja]),
            article("second", "2024-01-01", &[Locale::Ja]),
        ]);
        let selected = select_articles(&index, FeedVariant::All);
        assert_eq!(slugs(&selected), ["newer", "first", "second"]);
    }

    #[test]
    fn test_locale_filter() {
        let index = ArticleIndex::from_records(vec![
            article("ja", "2024-01-01", &[Locale::Ja]),
            article("en", "2024-01-02", &[Locale::En]),
            article("both", "2024-01-03", &[Locale::Ja, Locale::En]),
        ]);
        assert_eq!(
            slugs(&select_articles(&index, FeedVariant::Locale(Locale::Ja))),
            ["both", "ja"]
        );
        assert_eq!(
            slugs(&select_articles(&index, FeedVariant::Locale(Locale::En))),
            ["both", "en"]
        );
    }

    #[test]
    fn test_empty_index() {
        let index = ArticleIndex::default();
        assert!(select_articles(&index, FeedVariant::All).is_empty());
    }
}
