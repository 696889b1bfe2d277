//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/blog/out/ja/       ← start
/// /home/user/blog/blogfeed.toml ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Check that a base site URL is absolute http(s).
///
/// Returns the reason when it is not.
pub fn check_site_url(url_str: &str) -> Result<(), String> {
    let parsed = url::Url::parse(url_str).map_err(|e| format!("`{url_str}`: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(format!("`{url_str}`: unsupported scheme `{other}`")),
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(format!("`{url_str}`: must not carry a query or fragment"));
    }
    Ok(())
}

// ============================================================================
// tests
// ============================================================================
