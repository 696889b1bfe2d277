//! Atom 1.0 serialization.

use super::{AtomAuthor, AtomEntry, AtomFeedMeta, AtomLink};
use quick_xml::escape::escape;

/// Atom XML namespace.
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Serialize a feed and its entries into an Atom 1.0 document.
///
/// Entries are written in the order given. Every text node and attribute
/// value goes through XML escaping (`& < > " '`), so an HTML summary ends up
/// entity-escaped inside `<summary type="html">`. Timestamps are not checked.
///
/// The output uses two-space indentation and `\n` separators, without a
/// trailing newline. Identical input always yields identical output.
pub fn build_atom_feed(meta: &AtomFeedMeta, entries: &[AtomEntry]) -> String {
    let mut out = AtomWriter::with_capacity(8 + entries.len() * 8);

    out.line(0, XML_DECL);
    out.line(0, &format!(r#"<feed xmlns="{ATOM_NS}">"#));
    out.text_element(1, "title", &meta.title);
    out.text_element(1, "id", &meta.id);
    out.text_element(1, "updated", &meta.updated);
    out.line(1, &format!(r#"<link rel="self" href="{}" />"#, escape(meta.self_url.as_str())));

    if let Some(author) = &meta.author {
        write_author(&mut out, author);
    }

    for entry in entries {
        write_entry(&mut out, entry);
    }

    out.line(0, "</feed>");
    out.finish()
}

fn write_author(out: &mut AtomWriter, author: &AtomAuthor) {
    out.line(1, "<author>");
    out.text_element(2, "name", &author.name);
    if let Some(uri) = &author.uri {
        out.text_element(2, "uri", uri);
    }
    if let Some(email) = &author.email {
        out.text_element(2, "email", email);
    }
    out.line(1, "</author>");
}

fn write_entry(out: &mut AtomWriter, entry: &AtomEntry) {
    out.line(1, "<entry>");
    out.text_element(2, "id", &entry.id);
    out.text_element(2, "title", &entry.title);
    out.text_element(2, "updated", &entry.updated);
    if let Some(published) = &entry.published {
        out.text_element(2, "published", published);
    }

    let summary = escape(entry.summary.as_str());
    match entry.summary_type.as_attr() {
        Some(kind) => out.line(2, &format!(r#"<summary type="{kind}">{summary}</summary>"#)),
        None => out.line(2, &format!("<summary>{summary}</summary>")),
    }

    for link in &entry.links {
        out.line(2, &alternate_link(link));
    }
    out.line(1, "</entry>");
}

fn alternate_link(link: &AtomLink) -> String {
    let mut tag = format!(
        r#"<link href="{}" rel="alternate" type="text/html""#,
        escape(link.href.as_str())
    );
    if let Some(lang) = &link.hreflang {
        tag.push_str(&format!(r#" hreflang="{}""#, escape(lang.as_str())));
    }
    tag.push_str(" />");
    tag
}

/// Line buffer with fixed two-space indentation.
struct AtomWriter {
    lines: Vec<String>,
}

impl AtomWriter {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: Vec::with_capacity(capacity),
        }
    }

    fn line(&mut self, depth: usize, content: &str) {
        self.lines.push(format!("{}{content}", "  ".repeat(depth)));
    }

    fn text_element(&mut self, depth: usize, tag: &str, text: &str) {
        self.line(depth, &format!("<{tag}>{}</{tag}>", escape(text)));
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::TextType;
    use atom_syndication::Feed;

    fn meta() -> AtomFeedMeta {
        AtomFeedMeta {
            title: "tatmius.net Blog".to_string(),
            id: "https://example.com/feed.xml".to_string(),
            self_url: "https://example.com/feed.xml".to_string(),
            updated: "2024-06-01T00:00:00Z".to_string(),
            author: Some(AtomAuthor {
                name: "tatmius".to_string(),
                uri: Some("https://example.com".to_string()),
                email: None,
            }),
        }
    }

    fn entry(id: &str, title: &str) -> AtomEntry {
        AtomEntry {
            id: id.to_string(),
            title: title.to_string(),
            updated: "2024-06-01T00:00:00Z".to_string(),
            published: Some("2024-06-01T00:00:00Z".to_string()),
            summary: "summary".to_string(),
            summary_type: TextType::Html,
            links: vec![AtomLink::new(id).with_hreflang("ja")],
        }
    }

    #[test]
    fn test_exact_output() {
        let xml = build_atom_feed(&meta(), &[entry("https://example.com/ja/articles/a", "A")]);
        let expected = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>tatmius.net Blog</title>
  <id>https://example.com/feed.xml</id>
  <updated>2024-06-01T00:00:00Z</updated>
  <link rel="self" href="https://example.com/feed.xml" />
  <author>
    <name>tatmius</name>
    <uri>https://example.com</uri>
  </author>
  <entry>
    <id>https://example.com/ja/articles/a</id>
    <title>A</title>
    <updated>2024-06-01T00:00:00Z</updated>
    <published>2024-06-01T00:00:00Z</published>
    <summary type="html">summary</summary>
    <link href="https://example.com/ja/articles/a" rel="alternate" type="text/html" hreflang="ja" />
  </entry>
</feed>"#;
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_empty_feed_without_author() {
        let mut meta = meta();
        meta.author = None;
        let xml = build_atom_feed(&meta, &[]);

        assert!(!xml.contains("<author>"));
        assert!(!xml.contains("<entry>"));
        assert!(xml.ends_with("</feed>"));

        let feed: Feed = xml.parse().expect("well-formed Atom");
        assert!(feed.entries().is_empty());
    }

    #[test]
    fn test_author_email() {
        let mut meta = meta();
        if let Some(author) = meta.author.as_mut() {
            author.uri = None;
            author.email = Some("me@example.com".to_string());
        }
        let xml = build_atom_feed(&meta, &[]);
        assert!(xml.contains("    <email>me@example.com</email>"));
        assert!(!xml.contains("<uri>"));
    }

    #[test]
    fn test_entries_keep_input_order() {
        let entries = [
            entry("https://example.com/c", "C"),
            entry("https://example.com/a", "A"),
            entry("https://example.com/b", "B"),
        ];
        let xml = build_atom_feed(&meta(), &entries);

        let feed: Feed = xml.parse().expect("well-formed Atom");
        let ids: Vec<_> = feed.entries().iter().map(|e| e.id().to_string()).collect();
        assert_eq!(
            ids,
            ["https://example.com/c", "https://example.com/a", "https://example.com/b"]
        );
        assert_eq!(xml.matches("<feed ").count(), 1);
        assert_eq!(xml.matches("<entry>").count(), 3);
    }

    #[test]
    fn test_escapes_reserved_characters() {
        let mut e = entry("https://example.com/a?x=1&y=2", r#"Tom & "Jerry" <it's>"#);
        e.summary = r#"Fish & chips <a href="https://example.com/a">Read more</a>"#.to_string();
        let mut meta = meta();
        meta.title = "A & B's <feed>".to_string();

        let xml = build_atom_feed(&meta, &[e]);

        assert!(xml.contains("<title>A &amp; B&apos;s &lt;feed&gt;</title>"));
        assert!(xml.contains(
            "<title>Tom &amp; &quot;Jerry&quot; &lt;it&apos;s&gt;</title>"
        ));
        assert!(xml.contains("<id>https://example.com/a?x=1&amp;y=2</id>"));
        assert!(xml.contains(r#"href="https://example.com/a?x=1&amp;y=2""#));
        assert!(xml.contains(
            "Fish &amp; chips &lt;a href=&quot;https://example.com/a&quot;&gt;Read more&lt;/a&gt;"
        ));
        assert!(!xml.contains("<a href"));
        assert!(!xml.contains("it's"));

        let feed: Feed = xml.parse().expect("well-formed Atom");
        assert_eq!(feed.title().as_str(), "A & B's <feed>");
        assert_eq!(feed.entries()[0].title().as_str(), r#"Tom & "Jerry" <it's>"#);
    }

    #[test]
    fn test_optional_entry_fields() {
        let mut e = entry("https://example.com/a", "A");
        e.published = None;
        e.summary_type = TextType::Text;
        e.links = vec![AtomLink::new("https://example.com/a")];

        let xml = build_atom_feed(&meta(), &[e]);
        assert!(!xml.contains("<published>"));
        assert!(xml.contains("<summary>summary</summary>"));
        assert!(xml.contains(
            r#"<link href="https://example.com/a" rel="alternate" type="text/html" />"#
        ));
    }

    #[test]
    fn test_multiple_links_with_hreflang() {
        let mut e = entry("https://example.com/ja/articles/a", "A");
        e.links = vec![
            AtomLink::new("https://example.com/ja/articles/a").with_hreflang("ja"),
            AtomLink::new("https://example.com/en/articles/a").with_hreflang("en"),
        ];
        let xml = build_atom_feed(&meta(), &[e]);

        let feed: Feed = xml.parse().expect("well-formed Atom");
        let langs: Vec<_> = feed.entries()[0]
            .links()
            .iter()
            .map(|l| l.hreflang().unwrap_or_default().to_string())
            .collect();
        assert_eq!(langs, ["ja", "en"]);
    }

    #[test]
    fn test_timestamps_pass_through() {
        let mut meta = meta();
        meta.updated = "not-a-date".to_string();
        let mut e = entry("https://example.com/a", "A");
        e.updated = "yesterday".to_string();

        let xml = build_atom_feed(&meta, &[e]);
        assert!(xml.contains("<updated>not-a-date</updated>"));
        assert!(xml.contains("<updated>yesterday</updated>"));
    }

    #[test]
    fn test_deterministic() {
        let entries = [entry("https://example.com/a", "A")];
        assert_eq!(
            build_atom_feed(&meta(), &entries),
            build_atom_feed(&meta(), &entries)
        );
    }
}
