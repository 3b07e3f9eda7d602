//! blotter server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite incident database, and serves the JSON API over HTTP.
//!
//! ```
//! BLOTTER_DATABASE_PATH=./db/stpaul_crime.sqlite3 cargo run -p blotter-server
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use blotter_store_sqlite::SqliteStore;
use clap::Parser;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{ServerConfig, expand_tilde};

#[derive(Parser)]
#[command(author, version, about = "Crime incident JSON API")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let database_path = expand_tilde(&server_cfg.database_path);
  let store = open_store(database_path, server_cfg.create_if_missing).await;

  let app = blotter_api::api_router(Arc::new(store)).layer(TraceLayer::new_for_http());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Open the database. A failure is logged and leaves the server running with
/// a store that answers every request with an error.
async fn open_store(path: PathBuf, create_if_missing: bool) -> SqliteStore {
  let opened = if create_if_missing {
    SqliteStore::create(&path).await
  } else {
    SqliteStore::open(&path).await
  };

  match opened {
    Ok(store) => {
      tracing::info!(path = %path.display(), "Now connected to database");
      store
    }
    Err(e) => {
      tracing::error!(path = %path.display(), error = %e, "Error opening database");
      SqliteStore::unavailable(e.to_string())
    }
  }
}
