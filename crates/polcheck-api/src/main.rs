//! # polcheck-api — Binary Entry Point
//!
//! `serve` (the default) connects the optional database, hydrates the
//! stores, seeds once and starts the HTTP server. `scrape` runs only the
//! department discovery and prints the result as JSON.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use polcheck_api::seed::{seed_if_empty, SeedOutcome};
use polcheck_api::state::{AppConfig, AppState};
use polcheck_scraper::config::DEFAULT_DEPARTMENT_SOURCE_URL;
use polcheck_scraper::{DepartmentScraper, ScraperConfig};
use tracing_subscriber::EnvFilter;

/// Policy compliance tracking service.
#[derive(Parser, Debug)]
#[command(name = "polcheck-api", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format.
    #[arg(long, env = "POLCHECK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    /// Department listing page to scrape.
    #[arg(long, env = "POLCHECK_DEPARTMENT_SOURCE_URL", default_value = DEFAULT_DEPARTMENT_SOURCE_URL, global = true)]
    department_source_url: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080, global = true)]
    port: u16,

    /// State recorded on seeded policies and law references.
    #[arg(long, env = "POLCHECK_REGION", default_value = "Karnataka", global = true)]
    region: String,

    /// Do not seed on startup.
    #[arg(long, env = "POLCHECK_SKIP_SEED", global = true)]
    skip_seed: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Seed if empty, then serve the API (default).
    Serve,
    /// Discover departments and print them as JSON. Writes nothing.
    Scrape,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_format);

    let scraper_config = ScraperConfig::parse(&cli.department_source_url)
        .context("invalid department source URL")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&cli, &scraper_config).await,
        Command::Scrape => scrape(&scraper_config).await,
    }
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn scrape(scraper_config: &ScraperConfig) -> anyhow::Result<()> {
    let scraper = DepartmentScraper::from_config(scraper_config);
    let discovery = scraper.discover().await;
    println!("{}", serde_json::to_string_pretty(&discovery)?);
    Ok(())
}

async fn serve(cli: &Cli, scraper_config: &ScraperConfig) -> anyhow::Result<()> {
    let config = AppConfig {
        port: cli.port,
        region: cli.region.clone(),
        seed_on_startup: !cli.skip_seed,
    };

    let db_pool = polcheck_api::db::init_pool()
        .await
        .context("database initialization failed")?;

    let mut state = AppState::with_config(config, db_pool);

    if polcheck_api::metrics_enabled() {
        let handle = polcheck_api::middleware::metrics::install_recorder()
            .context("failed to install Prometheus recorder")?;
        state = state.with_metrics(handle);
    }

    state
        .hydrate_from_db()
        .await
        .context("database hydration failed")?;

    if state.config.seed_on_startup {
        let scraper = DepartmentScraper::from_config(scraper_config);
        match seed_if_empty(&state, &scraper).await.context("seeding failed")? {
            SeedOutcome::Seeded { policies, .. } => {
                tracing::debug!(policies, "seed complete");
            }
            SeedOutcome::Skipped { existing } => {
                tracing::debug!(existing, "seed skipped");
            }
        }
    } else {
        tracing::info!("seeding disabled");
    }

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let app = polcheck_api::app(state);

    tracing::info!("polcheck API listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
