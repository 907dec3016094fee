use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedhub_backend::app::build_app;
use feedhub_backend::domain::feed::FeedServiceApi;
use feedhub_backend::domain::ingestion::{IngestionServiceApi, IntervalTicker, Scheduler};
use feedhub_backend::infrastructure::config::{Config, LogFormat};
use feedhub_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use feedhub_backend::infrastructure::http::start_http_server;

#[derive(Parser)]
#[command(name = "feedhub-backend", version, about = "RSS/Atom feed ingestion service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the admin API and the background fetcher (default)
    Serve,
    /// Apply database migrations and exit
    Migrate,
    /// Register the default feed list and exit
    SeedFeeds,
    /// Ingest every feed once and exit
    FetchFeeds {
        /// Also fetch feeds classified as test sources
        #[arg(long)]
        include_test_sources: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            run_migrations(&pool).await?;
            tracing::info!("Migrations applied");
        }
        Command::SeedFeeds => {
            let app = build_app(config.clone(), pool)?;
            let result = app.feed_service.seed_feeds(&config.default_feeds).await?;
            println!(
                "Seeded feeds: {} created, {} existed, {} errors",
                result.created, result.existed, result.errors
            );
        }
        Command::FetchFeeds {
            include_test_sources,
        } => {
            let app = build_app(config, pool)?;
            let summary = app.ingestion.ingest_all(!include_test_sources).await?;
            println!("{}", summary.message());
        }
        Command::Serve => serve(config, pool).await?,
    }

    Ok(())
}

async fn serve(
    config: Arc<Config>,
    pool: Arc<feedhub_backend::infrastructure::db::DbPool>,
) -> anyhow::Result<()> {
    tracing::info!("Starting feedhub backend on {}", config.bind_address());

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    let app = build_app(config.clone(), pool)?;

    let scheduler = if config.background_fetch_enabled {
        tracing::info!(
            interval_secs = config.background_fetch_interval.as_secs(),
            "Background fetch enabled"
        );
        let scheduler = Scheduler::new(app.ingestion.clone());
        Some(scheduler.start(IntervalTicker::new(config.background_fetch_interval)))
    } else {
        tracing::info!("Background fetch disabled");
        None
    };

    let result = start_http_server(config, app.router).await;

    if let Some(handle) = scheduler {
        handle.stop().await;
    }

    result.map_err(|e| anyhow::anyhow!(e.to_string()))
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "feedhub_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
