//! Feed file generation.
//!
//! Writes into an existing static export:
//!
//! - **Feeds**: `feed.xml`, `ja/feed.xml`, `en/feed.xml`
//! - **Headers**: `_headers`, mapping the feed paths to the Atom content type
//!
//! The export root must already exist (it is produced by the site build);
//! only locale subdirectories are created here.

pub mod feed;
pub mod headers;

use crate::{
    article::ArticleIndex,
    config::SiteConfig,
    debug, log,
    utils::date::DateTimeUtc,
};
use anyhow::{Context, Result};
use feed::{BuiltFeed, FeedVariant, build_feed, feed_url_paths};
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Generation failures with a dedicated diagnostic.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("output directory `{}` not found, run the site build first", .0.display())]
    OutputMissing(PathBuf),

    #[error("generated `{}` is not a valid Atom feed", .path.display())]
    InvalidFeed {
        path: PathBuf,
        #[source]
        source: atom_syndication::Error,
    },

    #[error("generated `{}` has {found} entries, expected {expected}", .path.display())]
    EntryCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

/// One feed file produced by a run.
#[derive(Debug, Clone)]
pub struct FeedOutput {
    pub path: PathBuf,
    pub entries: usize,
}

/// Summary of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub feeds: Vec<FeedOutput>,
    pub headers: Option<PathBuf>,
}

/// Check the export root, then load the article index and generate.
pub fn run(config: &SiteConfig) -> Result<GenerateReport> {
    check_output_dir(config)?;
    let index = ArticleIndex::load(&config.build.index)?;
    generate(config, &index)
}

/// Generate all feeds and the routing-rules file.
pub fn generate(config: &SiteConfig, index: &ArticleIndex) -> Result<GenerateReport> {
    generate_at(config, index, DateTimeUtc::now())
}

/// [`generate`] with an explicit generation instant.
pub fn generate_at(
    config: &SiteConfig,
    index: &ArticleIndex,
    now: DateTimeUtc,
) -> Result<GenerateReport> {
    check_output_dir(config)?;
    let output_dir = config.output_dir();

    let dry_run = config.build.dry_run;
    let mut report = GenerateReport::default();

    for variant in FeedVariant::ALL {
        let feed = build_feed(index, variant, &config.site, now);
        let path = output_dir.join(variant.file_path());
        let xml = feed.to_xml();
        let xml = minify_xml(&xml, config.build.minify);

        if config.build.validate {
            validate_feed(&xml, &feed, &path)?;
        }

        let entries = feed.entries.len();

        if dry_run {
            log!("atom"; "{} ({} entries, dry run)", display_rel(&path, output_dir), entries);
        } else {
            write_file(&path, xml.as_bytes())?;
            log!("atom"; "{} ({} entries)", display_rel(&path, output_dir), entries);
        }

        report.feeds.push(FeedOutput { path, entries });
    }

    let headers_path = config.headers_path();
    let headers = headers::render_headers(feed_url_paths());
    if dry_run {
        log!("headers"; "{} (dry run)", display_rel(&headers_path, output_dir));
    } else {
        write_file(&headers_path, headers.as_bytes())?;
        log!("headers"; "{}", display_rel(&headers_path, output_dir));
        report.headers = Some(headers_path);
    }

    Ok(report)
}

/// The export root is produced by the site build and never created here.
fn check_output_dir(config: &SiteConfig) -> Result<(), GenerateError> {
    let output_dir = config.output_dir();
    if output_dir.is_dir() {
        Ok(())
    } else {
        Err(GenerateError::OutputMissing(output_dir.to_path_buf()))
    }
}

/// Parse the serialized feed back and check it kept every entry.
fn validate_feed(xml: &str, feed: &BuiltFeed, path: &Path) -> Result<(), GenerateError> {
    let parsed: atom_syndication::Feed =
        xml.parse().map_err(|source| GenerateError::InvalidFeed {
            path: path.to_path_buf(),
            source,
        })?;

    let found = parsed.entries().len();
    if found != feed.entries.len() {
        return Err(GenerateError::EntryCountMismatch {
            path: path.to_path_buf(),
            expected: feed.entries.len(),
            found,
        });
    }

    debug!("atom"; "validated {:?} ({} entries)", feed.variant, found);
    Ok(())
}

/// Write a file, creating its parent directory (never the export root itself).
fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn display_rel(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Minify XML content if enabled.
///
/// Only whitespace between a closing `>` and the next `<` is removed. Text
/// nodes never contain a raw `<` or `>` after escaping, so line breaks inside
/// them (multi-line summaries) are kept byte for byte.
pub fn minify_xml(content: &str, enabled: bool) -> Cow<'_, str> {
    if !enabled {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len());
    let mut pending = String::new();

    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            pending.push('\n');
        }
        let trimmed = line.trim_start();
        let after_tag = out.is_empty() || out.ends_with('>');

        if after_tag && trimmed.is_empty() {
            pending.push_str(line);
        } else if after_tag && trimmed.starts_with('<') {
            pending.clear();
            out.push_str(trimmed);
        } else {
            out.push_str(&pending);
            pending.clear();
            out.push_str(line);
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{ArticleRecord, Locale, Translation};
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    const NOW: DateTimeUtc = DateTimeUtc::new(2026, 10, 15, 0, 0, 0);

    fn article(slug: &str, date: &str, locales: &[Locale]) -> ArticleRecord {
        let date = DateTimeUtc::parse_date(date).unwrap();
        locales.iter().fold(ArticleRecord::new(slug, date), |record, locale| {
            record.with_translation(*locale, Translation::new(format!("{slug} & co"), "excerpt <b>"))
        })
    }

    fn index() -> ArticleIndex {
        ArticleIndex::from_records(vec![
            article("both", "2024-01-01", &[Locale::Ja, Locale::En]),
            article("ja-only", "2024-06-01", &[Locale::Ja]),
            article("en-only", "2023-12-31", &[Locale::En]),
        ])
    }

    fn config_for(output: &Path) -> SiteConfig {
        let mut config = test_parse_config("[site]\nurl = \"https://blog.example\"");
        config.build.output = output.to_path_buf();
        config
    }

    fn read(path: impl AsRef<Path>) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("out");
        let err = generate_at(&config_for(&missing), &index(), NOW).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::OutputMissing(p)) if p == &missing
        ));
        assert!(err.to_string().contains("run the site build first"));
        assert!(!missing.exists());
    }

    #[test]
    fn test_writes_all_files() {
        let dir = TempDir::new().unwrap();
        let report = generate_at(&config_for(dir.path()), &index(), NOW).unwrap();

        assert_eq!(report.feeds.len(), 3);
        assert!(dir.path().join("feed.xml").is_file());
        assert!(dir.path().join("ja/feed.xml").is_file());
        assert!(dir.path().join("en/feed.xml").is_file());
        assert_eq!(
            read(dir.path().join("_headers")),
            headers::render_headers(feed_url_paths())
        );
        assert_eq!(report.headers, Some(dir.path().join("_headers")));

        let counts: Vec<_> = report.feeds.iter().map(|f| f.entries).collect();
        assert_eq!(counts, [3, 2, 2]);
    }

    #[test]
    fn test_feed_contents() {
        let dir = TempDir::new().unwrap();
        generate_at(&config_for(dir.path()), &index(), NOW).unwrap();

        let all: atom_syndication::Feed = read(dir.path().join("feed.xml")).parse().unwrap();
        let ids: Vec<_> = all.entries().iter().map(|e| e.id().to_string()).collect();
        assert_eq!(
            ids,
            [
                "https://blog.example/ja/articles/ja-only",
                "https://blog.example/ja/articles/both",
                "https://blog.example/en/articles/en-only",
            ]
        );
        assert_eq!(all.entries()[1].links().len(), 2);

        let en = read(dir.path().join("en/feed.xml"));
        assert!(!en.contains("ja-only"));
        assert_eq!(en.matches("<entry>").count(), 2);
        assert!(en.contains(r#"hreflang="en""#));
        assert!(!en.contains(r#"hreflang="ja""#));

        let ja = read(dir.path().join("ja/feed.xml"));
        assert!(!ja.contains("en-only"));
        assert!(ja.contains("<title>tatmius.net ブログ</title>"));
        assert!(ja.contains("<title>ja-only &amp; co</title>"));
        assert!(ja.contains("excerpt &lt;b&gt;"));
    }

    #[test]
    fn test_idempotent() {
        let dir = TempDir::new().unwrap();
        let config = config_for(dir.path());

        generate_at(&config, &index(), NOW).unwrap();
        let first: Vec<_> = ["feed.xml", "ja/feed.xml", "en/feed.xml", "_headers"]
            .iter()
            .map(|p| read(dir.path().join(p)))
            .collect();

        generate(&config, &index()).unwrap();
        let second: Vec<_> = ["feed.xml", "ja/feed.xml", "en/feed.xml", "_headers"]
            .iter()
            .map(|p| read(dir.path().join(p)))
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_locale_dir_is_reused() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("ja")).unwrap();
        fs::write(dir.path().join("ja/index.html"), "<html></html>").unwrap();

        generate_at(&config_for(dir.path()), &index(), NOW).unwrap();
        assert_eq!(read(dir.path().join("ja/index.html")), "<html></html>");
        assert!(dir.path().join("ja/feed.xml").is_file());
    }

    #[test]
    fn test_empty_index_uses_generation_time() {
        let dir = TempDir::new().unwrap();
        generate_at(&config_for(dir.path()), &ArticleIndex::default(), NOW).unwrap();

        let xml = read(dir.path().join("feed.xml"));
        assert!(xml.contains("<updated>2026-10-15T00:00:00Z</updated>"));
        assert!(!xml.contains("<entry>"));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(dir.path());
        config.build.dry_run = true;

        let report = generate_at(&config, &index(), NOW).unwrap();
        assert_eq!(report.feeds.len(), 3);
        assert!(report.headers.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_minified_output_is_still_atom() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(dir.path());
        config.build.minify = true;

        generate_at(&config, &index(), NOW).unwrap();
        let xml = read(dir.path().join("feed.xml"));
        assert!(!xml.contains('\n'));
        let parsed: atom_syndication::Feed = xml.parse().unwrap();
        assert_eq!(parsed.entries().len(), 3);
    }

    #[test]
    fn test_minify_xml() {
        let xml = "<root>\n\n  <item>Hello</item>\n</root>";
        assert_eq!(minify_xml(xml, true), "<root><item>Hello</item></root>");
        assert_eq!(minify_xml(xml, false), xml);
    }

    #[test]
    fn test_minify_keeps_text_line_breaks() {
        let xml = "<entry>\n  <summary>first line\n    indented second\n\nthird</summary>\n</entry>";
        assert_eq!(
            minify_xml(xml, true),
            "<entry><summary>first line\n    indented second\n\nthird</summary></entry>"
        );
    }

    #[test]
    fn test_minified_feed_keeps_multiline_excerpt() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(dir.path());
        config.build.minify = true;

        let date = DateTimeUtc::parse_date("2024-03-01").unwrap();
        let record = ArticleRecord::new("poem", date).with_translation(
            Locale::Ja,
            Translation::new("poem", "line one\n  line two"),
        );
        generate_at(&config, &ArticleIndex::from_records(vec![record]), NOW).unwrap();

        let xml = read(dir.path().join("ja/feed.xml"));
        assert!(xml.contains("line one\n  line two"));
        let parsed: atom_syndication::Feed = xml.parse().unwrap();
        let summary = parsed.entries()[0].summary().unwrap();
        assert!(summary.value.starts_with("line one\n  line two"));
    }

    #[test]
    fn test_run_checks_output_before_index() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir.path().join("out"));
        config.build.index = dir.path().join("missing.json");

        let err = run(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::OutputMissing(_))
        ));
    }

    #[test]
    fn test_run_loads_index_file() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(dir.path());
        config.build.index = dir.path().join("articles.json");
        fs::write(
            &config.build.index,
            r#"{"a": {"slug": "a", "date": "2024-01-01", "en": {"title": "A", "excerpt": "x"}}}"#,
        )
        .unwrap();

        let report = run(&config).unwrap();
        let counts: Vec<_> = report.feeds.iter().map(|f| f.entries).collect();
        assert_eq!(counts, [1, 0, 1]);
    }
}
