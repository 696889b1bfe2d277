//! blogfeed - Atom feeds and a preview server for a statically exported blog.

mod article;
mod cli;
mod config;
mod feed;
mod generator;
mod logger;
mod serve;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() {
    if let Err(e) = run() {
        log!("error"; "{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if cli.is_preview() {
        serve::setup_shutdown_handler()?;
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Generate { .. } => generate(&config),
        Commands::Preview => serve::serve(&config),
    }
}

fn generate(config: &SiteConfig) -> Result<()> {
    let report = generator::run(config)?;

    for feed in &report.feeds {
        debug!("generate"; "{}: {} entries", feed.path.display(), feed.entries);
    }
    let entries: usize = report.feeds.iter().map(|feed| feed.entries).sum();

    if config.build.dry_run {
        log!("generate"; "dry run, {} feeds ({} entries) not written", report.feeds.len(), entries);
    } else {
        let written = report.feeds.len() + usize::from(report.headers.is_some());
        log!("generate"; "{} files ({} entries) written to {}", written, entries, config.output_dir().display());
    }
    Ok(())
}
