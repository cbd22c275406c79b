mod commands;
mod composer;
mod config;
mod locate;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wp_langs::{ComponentKind, SyncConfig, Synchronizer};
use wp_langs_api::{HttpSettings, PackageDownloader, TranslationApi};

#[derive(Parser)]
#[command(name = "wp-langs")]
#[command(about = "Keep WordPress translation files in sync with installed packages")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sync translations for one explicitly described component
    Sync {
        /// Component type (plugin, theme, core)
        #[arg(long = "type", value_parser = parse_kind)]
        kind: ComponentKind,
        /// Plugin or theme slug; required for plugins and themes, ignored for core
        #[arg(long)]
        slug: Option<String>,
        /// Installed version
        #[arg(long)]
        version: String,
        /// Comma separated language codes, e.g. sv_SE,de_DE
        #[arg(long, value_delimiter = ',')]
        languages: Vec<String>,
        /// WordPress content directory (the one holding plugins/ and themes/)
        #[arg(long)]
        content_dir: PathBuf,
    },
    /// Sync translations for one installed or updated package
    Package {
        /// Package name, e.g. wpackagist-plugin/akismet
        #[arg(long)]
        name: String,
        /// Package type, e.g. wordpress-plugin
        #[arg(long = "type")]
        package_type: String,
        /// Installed version
        #[arg(long)]
        version: String,
        /// Where to start looking for composer.json (defaults to current directory)
        #[arg(long)]
        start_dir: Option<PathBuf>,
    },
    /// Sync translations for every WordPress package in a lock file
    Lock {
        /// Lock file (defaults to composer.lock next to composer.json)
        #[arg(long)]
        lockfile: Option<PathBuf>,
        /// Where to start looking for composer.json (defaults to current directory)
        #[arg(long)]
        start_dir: Option<PathBuf>,
    },
}

fn parse_kind(s: &str) -> Result<ComponentKind, String> {
    ComponentKind::parse(s).ok_or_else(|| format!("unknown component type: {s}"))
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wp_langs=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_synchronizer(settings: HttpSettings) -> Result<Synchronizer> {
    debug!(api_base = settings.api_base(), timeout = ?settings.timeout, "http settings");
    let catalog = TranslationApi::new(settings.clone()).context("failed to set up catalog client")?;
    let fetcher = PackageDownloader::new(&settings).context("failed to set up downloader")?;
    Ok(Synchronizer::new(Arc::new(catalog), Arc::new(fetcher)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let sync = build_synchronizer(config::load_config().http_settings())?;

    match cli.command {
        Command::Sync {
            kind,
            slug,
            version,
            languages,
            content_dir,
        } => {
            let component = commands::sync::component(kind, slug, version)?;
            let config = SyncConfig::new(languages, content_dir);
            commands::sync::run(&sync, &component, &config).await
        }
        Command::Package {
            name,
            package_type,
            version,
            start_dir,
        } => {
            let start_dir = commands::start_dir(start_dir)?;
            commands::package::run(&sync, &start_dir, &name, &package_type, &version).await
        }
        Command::Lock {
            lockfile,
            start_dir,
        } => {
            let start_dir = commands::start_dir(start_dir)?;
            commands::lock::run(&sync, &start_dir, lockfile).await
        }
    }
}
