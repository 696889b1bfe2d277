//! MIME type detection for the preview server.
//!
//! Fixed lookup table for the asset types a static blog export contains.
//! New types are added in [`from_extension`].

use std::path::Path;

/// Common MIME type constants.
pub mod types {
    // Text
    pub const HTML: &str = "text/html; charset=utf-8";
    pub const PLAIN: &str = "text/plain; charset=utf-8";
    pub const CSS: &str = "text/css";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml; charset=utf-8";

    // Web feeds
    pub const ATOM: &str = "application/atom+xml; charset=utf-8";

    // Binary
    pub const OCTET_STREAM: &str = "application/octet-stream";

    // Images
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const WEBP: &str = "image/webp";
    pub const SVG: &str = "image/svg+xml";
    pub const ICO: &str = "image/x-icon";

    // Fonts
    pub const WOFF: &str = "font/woff";
    pub const WOFF2: &str = "font/woff2";
}

/// Guess MIME type from file extension.
///
/// Returns a full MIME type string suitable for HTTP Content-Type header.
pub fn from_path(path: &Path) -> &'static str {
    from_extension(path.extension().and_then(|e| e.to_str()))
}

/// Guess MIME type from file extension string.
pub fn from_extension(ext: Option<&str>) -> &'static str {
    match ext {
        Some("html") => types::HTML,
        Some("xml") => types::XML,
        Some("css") => types::CSS,
        Some("js") => types::JAVASCRIPT,
        Some("json") => types::JSON,
        Some("ico") => types::ICO,
        Some("svg") => types::SVG,
        Some("png") => types::PNG,
        Some("jpg" | "jpeg") => types::JPEG,
        Some("webp") => types::WEBP,
        Some("woff") => types::WOFF,
        Some("woff2") => types::WOFF2,
        _ => types::OCTET_STREAM,
    }
}
