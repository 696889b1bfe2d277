//! URL to filesystem route resolution.

use crate::{
    generator::feed::feed_url_paths,
    utils::mime::{self, types},
};
use percent_encoding::percent_decode_str;
use std::{
    fmt, io,
    path::{Path, PathBuf},
};

/// Outcome of resolving a request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Serve this file with this content type.
    File {
        path: PathBuf,
        content_type: &'static str,
    },
    /// The URL resolves outside the served root.
    Forbidden,
    NotFound,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path, content_type } => {
                write!(f, "{} ({content_type})", path.display())
            }
            Self::Forbidden => f.write_str("403"),
            Self::NotFound => f.write_str("404"),
        }
    }
}

/// Maps request URLs onto files under a fixed root.
#[derive(Debug, Clone)]
pub struct Router {
    root: PathBuf,
    feed_paths: [String; 3],
}

impl Router {
    /// Create a router for `root`, which must exist.
    pub fn new(root: &Path) -> io::Result<Self> {
        Ok(Self {
            root: root.canonicalize()?,
            feed_paths: feed_url_paths(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a raw request URL.
    ///
    /// 1. normalize (decode, drop query, drop trailing slash)
    /// 2. anything resolving outside the root is forbidden
    /// 3. feed paths are served as Atom
    /// 4. files by extension
    /// 5. `<dir>/index.html` (the root included)
    pub fn resolve(&self, url: &str) -> Route {
        let normalized = normalize_url(url);
        let Some(segments) = resolve_segments(&normalized) else {
            return Route::Forbidden;
        };

        let local = segments
            .iter()
            .fold(self.root.clone(), |path, segment| path.join(segment));
        let clean = format!("/{}", segments.join("/"));

        let (path, content_type) = if local.is_file() {
            let content_type = if self.is_feed_path(&clean) {
                types::ATOM
            } else {
                mime::from_path(&local)
            };
            (local, content_type)
        } else {
            let index = local.join("index.html");
            if !index.is_file() {
                return Route::NotFound;
            }
            (index, types::HTML)
        };

        // Symlinks may still point elsewhere
        if !self.contains(&path) {
            return Route::Forbidden;
        }

        Route::File { path, content_type }
    }

    fn is_feed_path(&self, clean: &str) -> bool {
        self.feed_paths.iter().any(|p| p == clean)
    }

    fn contains(&self, path: &Path) -> bool {
        path.canonicalize()
            .is_ok_and(|canonical| canonical.starts_with(&self.root))
    }
}

/// Normalize URL: strip query string, percent-decode, drop one trailing slash.
///
/// Always returns a path starting with `/`.
pub fn normalize_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy();

    let trimmed = decoded.strip_suffix('/').unwrap_or(&decoded);
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Resolve `.` and `..` lexically. `None` when the path climbs above the root
/// or contains a segment that is not a plain name.
fn resolve_segments(normalized: &str) -> Option<Vec<&str>> {
    let mut stack = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                stack.pop()?;
            }
            s if s.contains(['\\', '\0']) => return None,
            s => stack.push(s),
        }
    }
    Some(stack)
}
