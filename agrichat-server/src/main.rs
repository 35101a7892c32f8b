use std::sync::Arc;

use agrichat_core::{AgriConfig, AgriError, DocumentStore, MemoryDocumentStore, PgDocumentStore};
use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use agrichat_server::http::{self, HttpState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "agrichat.toml")]
    config: String,

    /// Check database connectivity and exit
    #[arg(long)]
    health: bool,

    /// Keep documents in memory instead of PostgreSQL
    #[arg(long, conflicts_with = "health")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience; production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = match AgriConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Init logging; RUST_LOG takes precedence over service.log_level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.service.log_level));
    fmt().with_env_filter(filter).init();

    if args.health {
        let pool = match agrichat_core::db::create_pool(&config.database).await {
            Ok(p) => p,
            Err(e) => {
                println!("❌ PostgreSQL connection failed: {}", e);
                std::process::exit(1);
            }
        };
        match agrichat_core::db::health_check(&pool).await {
            Ok(v) => println!("✅ PostgreSQL connected: {}", v),
            Err(e) => {
                println!("❌ PostgreSQL health check failed: {}", e);
                std::process::exit(1);
            }
        }
        println!("✅ AgriChat DB health check passed");
        return Ok(());
    }

    let store: Option<Arc<dyn DocumentStore>> = if args.memory {
        tracing::info!("Using in-memory document store");
        Some(Arc::new(MemoryDocumentStore::new()))
    } else if config.database.url.is_some() {
        match connect_store(&config).await {
            Ok(s) => Some(Arc::new(s)),
            Err(e) => {
                tracing::warn!("Document store not initialized: {}", e);
                None
            }
        }
    } else {
        tracing::warn!("DATABASE_URL not set; running without a document store");
        None
    };

    let (tx, rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    http::start_http_server(HttpState::new(store, config), rx).await?;

    Ok(())
}

async fn connect_store(config: &AgriConfig) -> Result<PgDocumentStore, AgriError> {
    let pool = agrichat_core::db::create_pool(&config.database).await?;
    agrichat_core::db::migrate(&pool).await?;
    tracing::info!("Connected to PostgreSQL document store");
    Ok(PgDocumentStore::new(pool))
}
