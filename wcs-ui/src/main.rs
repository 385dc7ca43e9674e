//! wcs-ui (Wine Cheat Sheet) - catalog browsing service
//!
//! Loads the wine sheet once at startup and serves the filtered, grouped
//! catalog to the browser view.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wcs_common::config::{resolve_config_path, Config, ConfigLocation, ConfigOverrides, TomlConfig};
use wcs_ui::{build_router, loading::spawn_catalog_load, AppState};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "wcs-ui", version, about = "Wine cheat sheet catalog service")]
struct Args {
    /// Path to TOML config file (overrides WCS_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wine sheet file path or http(s) URL (overrides WCS_SOURCE)
    #[arg(long)]
    source: Option<String>,

    /// Bind address
    #[arg(long)]
    host: Option<String>,

    /// HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let location = resolve_config_path(args.config.as_deref());
    let toml_config = TomlConfig::load_from(&location)?;
    let config = Config::resolve(
        toml_config,
        ConfigOverrides {
            source: args.source,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
        },
    );

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(
        "Starting Wine Cheat Sheet (wcs-ui) v{}",
        env!("CARGO_PKG_VERSION")
    );
    match &location {
        ConfigLocation::Explicit(path) => info!("Config file: {}", path.display()),
        ConfigLocation::Default(path) if path.exists() => info!("Config file: {}", path.display()),
        ConfigLocation::Default(path) => {
            warn!("No config file at {}, using compiled defaults", path.display())
        }
        ConfigLocation::None => warn!("No config directory available, using compiled defaults"),
    }
    info!("Catalog source: {}", config.source);

    let state = AppState::new(config.source.clone(), config.columns.clone());
    spawn_catalog_load(state.clone());

    let app = build_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("wcs-ui listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
