//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Atom feed generator and preview server for the statically exported blog
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: search upward for blogfeed.toml)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Static export directory (must already exist)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write feed.xml, ja/feed.xml, en/feed.xml and the routing-rules file
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Serve the static export locally (port from PORT or [serve].port)
    #[command(visible_alias = "p")]
    Preview,
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Article index JSON produced by the site build
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub index: Option<PathBuf>,

    /// Override site URL (takes precedence over SITE_URL)
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Build and validate feeds without writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl Cli {
    pub const fn is_preview(&self) -> bool {
        matches!(self.command, Commands::Preview)
    }
}
