//! Routing-rules file for the static host.
//!
//! Hosts that honor a `_headers` file (e.g. Cloudflare Pages) would
//! otherwise serve `feed.xml` as generic XML. The format is one block per
//! path, blocks separated by a blank line:
//!
//! ```text
//! /feed.xml
//!   Content-Type: application/atom+xml; charset=utf-8
//!
//! /ja/feed.xml
//!   Content-Type: application/atom+xml; charset=utf-8
//! ```

use crate::utils::mime::types::ATOM;

/// Render header rules assigning the Atom content type to each path.
pub fn render_headers<I, S>(paths: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| format!("{}\n  Content-Type: {ATOM}", path.as_ref()))
        .collect::<Vec<_>>()
        .join("\n\n")
}
