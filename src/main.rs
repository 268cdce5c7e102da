//! site-replay - Replay a scripted session against a page fixture
//!
//! Loads a JSON page fixture, runs the site behaviors headless and prints
//! the host trace and the resulting page.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use site_behaviors::domain::config::SiteConfig;
use site_behaviors::replay::{self, Fixture};
use site_behaviors::storage::{FileStore, PreferenceStore};

#[derive(Parser)]
#[command(name = "site-replay")]
#[command(version)]
#[command(about = "Replay a scripted session against a page fixture")]
struct Cli {
    /// JSON page fixture with the actions to play
    #[arg(value_name = "FIXTURE")]
    fixture: PathBuf,

    /// Config file (defaults to site-behaviors.toml in the config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wait for every timer tick in real time
    #[arg(short, long)]
    realtime: bool,

    /// Read and persist the locale in the data directory instead of the
    /// fixture's stored locale
    #[arg(short, long)]
    persist: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SiteConfig::try_load().context("loading default config")?,
    };
    let fixture = Fixture::load(&cli.fixture)
        .with_context(|| format!("loading fixture {}", cli.fixture.display()))?;

    let store: Option<Box<dyn PreferenceStore>> = if cli.persist {
        let store = FileStore::in_data_dir().context("opening preference file")?;
        tracing::info!(path = ?store.path(), "Using persisted preferences");
        Some(Box::new(store))
    } else {
        None
    };

    tracing::info!(fixture = ?cli.fixture, realtime = cli.realtime, "Starting replay...");

    let report = if cli.realtime {
        replay::run_realtime(&fixture, &config, store).await?
    } else {
        replay::run(&fixture, &config, store)?
    };

    println!("{report}");
    Ok(())
}
