use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use m3u_hash_proxy::{
    config::{Config, DEFAULT_CONFIG_FILE},
    ingestor::{
        scheduler::create_shutdown_channel, IngestorService, PlaylistFetcher, SchedulerService,
    },
    store::MappingStore,
    web::WebServer,
};

#[derive(Parser)]
#[command(name = "m3u-hash-proxy")]
#[command(version)]
#[command(about = "Serves an upstream M3U playlist through hash-addressed redirect URLs")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (optional, environment variables take precedence)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Upstream playlist URL (overrides M3U_SOURCE_URL)
    #[arg(short = 's', long, value_name = "URL")]
    source_url: Option<String>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = if cli.log_level == "trace" {
        format!("m3u_hash_proxy={},tower_http=trace", cli.log_level)
    } else {
        format!("m3u_hash_proxy={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting M3U Hash Proxy v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load(&cli.config)?;

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(source_url) = cli.source_url {
        config.source_url = source_url;
    }
    config.validate()?;

    info!(
        "Source: {} (refresh every {}h, rewriting to {})",
        config.source_url, config.update_hours, config.hostport
    );

    let store = MappingStore::new();
    let fetcher = PlaylistFetcher::new(config.source_url.clone(), config.fetch_timeout());
    let ingestor = IngestorService::new(Arc::new(fetcher), store.clone());
    let scheduler = SchedulerService::new(ingestor, config.refresh_interval());

    let web_server = WebServer::new(config, store, scheduler.handle())?;

    // Nothing to serve without a first table
    scheduler.initial_refresh().await?;

    let (shutdown_tx, scheduler_shutdown_rx) = create_shutdown_channel();
    let server_shutdown_rx = shutdown_tx.subscribe();

    let scheduler_task = tokio::spawn(scheduler.start(scheduler_shutdown_rx));

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received shutdown signal");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
                // Dropping the sender would stop the server
                std::future::pending::<()>().await;
            }
        }
    });

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve(server_shutdown_rx).await?;

    if let Err(e) = scheduler_task.await {
        error!("Scheduler task ended abnormally: {}", e);
    }

    Ok(())
}
