//! holocron server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, connects the configured cache, and serves the character API
//! over HTTP until SIGINT or SIGTERM.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use holocron_api::AppState;
use holocron_cache::{MemoryCache, RedisCache};
use holocron_core::{cache::CharacterCache, store::CharacterStore};
use holocron_server::{CacheBackend, ServerConfig};
use holocron_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Holocron character server")]
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

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match server_cfg.cache.backend {
    CacheBackend::Redis => {
      let params = server_cfg.cache.redis_params()?;
      let cache = RedisCache::connect(params)
        .await
        .context("failed to connect to redis")?;
      serve(&server_cfg, store, cache).await
    }
    CacheBackend::Memory => {
      tracing::warn!("using the in-process cache; entries are not shared between instances");
      serve(&server_cfg, store, MemoryCache::new()).await
    }
  }
}

async fn serve<S, C>(server_cfg: &ServerConfig, store: S, cache: C) -> anyhow::Result<()>
where
  S: CharacterStore + 'static,
  C: CharacterCache + 'static,
{
  let ttl = server_cfg.cache.ttl()?;
  let state = AppState::new(Arc::new(store), Arc::new(cache), ttl, server_cfg.cache.fault_policy);
  let app = holocron_server::app(state);
  let address = server_cfg.address();

  tracing::info!(
    ttl_ms = server_cfg.cache.ttl_ms,
    fault_policy = ?server_cfg.cache.fault_policy,
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  tracing::info!("server shut down");
  Ok(())
}

/// Resolve once SIGINT (Ctrl-C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!("failed to listen for ctrl-c: {e}");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!("failed to listen for SIGTERM: {e}");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
  tracing::info!("shutdown signal received");
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
