//! Configuration management for `blogfeed.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   ├── serve      # [serve]
//! │   └── site       # [site], [site.titles], [site.author]
//! ├── error          # ConfigError
//! ├── util           # config discovery, URL checks
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Precedence
//!
//! CLI flags, then environment (`SITE_URL`, `PORT`), then the config file,
//! then built-in defaults. The config file is optional.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{BuildSectionConfig, ServeConfig, SiteSectionConfig};

use crate::{
    cli::{Cli, Commands, GenerateArgs},
    log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::{check_site_url, find_config_file};

/// Config file searched for when `--config` is not given.
pub const CONFIG_FILE: &str = "blogfeed.toml";

/// Environment variable overriding `site.url`.
pub const ENV_SITE_URL: &str = "SITE_URL";

/// Environment variable overriding `serve.port`.
pub const ENV_PORT: &str = "PORT";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing blogfeed.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site identity (url, titles, author)
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Feed generation settings
    #[serde(default)]
    pub build: BuildSectionConfig,

    /// Preview server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl SiteConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// Relative paths resolve against the config file's directory, or the
    /// working directory when no config file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = Self::resolve_config_path(cli, &cwd)?;

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        let root = config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or(cwd, Path::to_path_buf);

        config.config_path = config_path;
        config.finalize(cli, &root, |key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Explicit `--config` must exist; otherwise search upward, absence is fine.
    fn resolve_config_path(cli: &Cli, cwd: &Path) -> Result<Option<PathBuf>> {
        match &cli.config {
            Some(path) => {
                let path = cwd.join(path);
                if path.is_file() {
                    Ok(Some(path))
                } else {
                    Err(ConfigError::NotFound(path).into())
                }
            }
            None => Ok(find_config_file(cwd, Path::new(CONFIG_FILE))),
        }
    }

    /// Apply overrides, resolve paths and validate.
    fn finalize(
        &mut self,
        cli: &Cli,
        root: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        self.root = root.to_path_buf();
        self.apply_env(env);
        self.apply_cli(cli);
        self.normalize_paths();
        self.validate()?;
        Ok(())
    }

    /// Parse configuration from TOML string
    #[cfg(test)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // overrides
    // ========================================================================

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env(ENV_SITE_URL).filter(|url| !url.trim().is_empty()) {
            self.site.url = url.trim().to_string();
        }

        if let Some(port) = env(ENV_PORT) {
            match port.trim().parse::<u16>() {
                Ok(port) if port > 0 => self.serve.port = port,
                _ => log!("warning"; "ignoring invalid {}={:?}, using port {}", ENV_PORT, port, self.serve.port),
            }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        if let Commands::Generate { args } = &cli.command {
            self.apply_generate_args(args);
        }
    }

    fn apply_generate_args(&mut self, args: &GenerateArgs) {
        Self::update_option(&mut self.build.index, args.index.as_ref());
        Self::update_option(&mut self.site.url, args.site_url.as_ref());
        self.build.dry_run = args.dry_run;
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    fn normalize_paths(&mut self) {
        for path in [&mut self.build.output, &mut self.build.index] {
            if path.is_relative() {
                *path = self.root.join(&*path);
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_site_url(&self.site.url).map_err(|reason| {
            ConfigError::Validation(format!("[site.url] invalid base URL {reason}"))
        })?;

        if self.site.author.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[site.author.name] must not be empty".to_string(),
            ));
        }
        if self.serve.workers == 0 {
            return Err(ConfigError::Validation(
                "[serve.workers] must be at least 1".to_string(),
            ));
        }
        if self.build.headers.components().count() != 1 {
            return Err(ConfigError::Validation(
                "[build.headers] must be a plain file name".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// Static export root.
    pub fn output_dir(&self) -> &Path {
        &self.build.output
    }

    /// Path of the routing-rules file inside the output root.
    pub fn headers_path(&self) -> PathBuf {
        self.build.output.join(&self.build.headers)
    }
}

/// Parse a config from TOML for tests, panicking on invalid input.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> SiteConfig {
    SiteConfig::from_str(content).expect("test config should parse")
}

// ============================================================================
// tests
// ============================================================================
