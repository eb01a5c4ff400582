use anyhow::Context;
use clap::Parser;
use foodans::{Engine, EngineConfig, RestApi, DEFAULT_NEIGHBORS};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Food recommendations over a vendor/item catalog
#[derive(Parser, Debug)]
#[command(name = "foodans")]
#[command(about = "Food recommendation engine", long_about = None)]
struct Args {
    /// Path to the catalog CSV
    #[arg(short, long, default_value = "./data/catalog.csv")]
    catalog: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 8080)]
    http_port: u16,

    /// Neighbors returned per similarity query
    #[arg(long, default_value_t = DEFAULT_NEIGHBORS)]
    neighbors: usize,

    /// Memoize neighbor lists per anchor item
    #[arg(long)]
    neighbor_cache: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Foodans v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);
    info!("HTTP API port: {}", args.http_port);

    let config = EngineConfig {
        neighbors: args.neighbors,
        neighbor_cache: args.neighbor_cache,
        ..EngineConfig::default()
    };
    let engine = Engine::load(&args.catalog, config)
        .with_context(|| format!("failed to load catalog {:?}", args.catalog))?;
    let engine = Arc::new(engine);

    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(engine, http_port).await {
                tracing::error!("HTTP server error: {}", e);
            }
        })
    });

    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
