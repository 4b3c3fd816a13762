//! rdc-intake - Research data intake service
//!
//! Receives participant submissions (metadata plus photographs), persists
//! them to SQLite, and writes image bytes to the configured storage
//! backend.

use anyhow::Result;
use clap::Parser;
use rdc_common::config::{IntakeConfig, StorageConfig};
use rdc_intake::{build_router, storage, AppState};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "rdc-intake", about = "Research data intake service")]
struct Args {
    /// Path to config.toml (falls back to RDC_CONFIG, then the platform
    /// config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen address from the config file
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Research Data Intake (rdc-intake) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();
    let mut config = IntakeConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }

    let pool = rdc_common::db::init_database(&config.database_path).await?;

    let store = storage::select_backend(&config.storage)?;

    // Local static serving of uploaded images exists only in dev mode;
    // in object mode images live in the bucket exclusively.
    let static_root = match &config.storage {
        StorageConfig::Local { upload_root } => {
            std::fs::create_dir_all(upload_root)?;
            Some(upload_root.clone())
        }
        StorageConfig::Object { .. } => None,
    };

    let state = AppState::new(pool, store, config.max_file_size);
    let app = build_router(state, static_root.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("rdc-intake listening on http://{}", config.bind_addr);
    info!("Health check: http://{}/health", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
