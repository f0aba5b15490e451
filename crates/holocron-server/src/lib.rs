//! Holocron server: configuration and HTTP application assembly.
//!
//! The binary in `main.rs` loads a [`ServerConfig`], opens the store,
//! connects the configured cache backend, and serves [`app`].

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use axum::Router;
use holocron_api::{AppState, api_router};
use holocron_cache::RedisCacheParams;
use holocron_core::{cache::CharacterCache, service::CacheFaultPolicy, store::CharacterStore};
use serde::Deserialize;
use thiserror::Error;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `HOLOCRON_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
  pub cache:      CacheConfig,
}

/// Which [`CharacterCache`] implementation to run with.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
  Redis,
  /// Process-local; entries are lost on restart and not shared between
  /// instances.
  Memory,
}

/// The `[cache]` table.
#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
  pub backend:      CacheBackend,
  /// Required for the Redis backend.
  pub url:          Option<String>,
  pub password:     Option<String>,
  #[serde(default)]
  pub key_prefix:   String,
  /// Entry lifetime in milliseconds.
  pub ttl_ms:       u64,
  #[serde(default)]
  pub fault_policy: CacheFaultPolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to load configuration: {0}")]
  Load(#[from] config::ConfigError),

  #[error("cache.ttl_ms must be greater than zero")]
  ZeroTtl,

  #[error("cache.url is required for the redis backend")]
  MissingRedisUrl,
}

impl CacheConfig {
  pub fn ttl(&self) -> Result<Duration, ConfigError> {
    match self.ttl_ms {
      0 => Err(ConfigError::ZeroTtl),
      ms => Ok(Duration::from_millis(ms)),
    }
  }

  pub fn redis_params(&self) -> Result<RedisCacheParams, ConfigError> {
    Ok(RedisCacheParams {
      url:        self.url.clone().ok_or(ConfigError::MissingRedisUrl)?,
      password:   self.password.clone(),
      key_prefix: self.key_prefix.clone(),
    })
  }
}

impl ServerConfig {
  /// Load from the TOML file at `path` (if it exists), overridden by
  /// environment variables such as `HOLOCRON_PORT` or
  /// `HOLOCRON_CACHE__TTL_MS`.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let builder = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("HOLOCRON")
          .prefix_separator("_")
          .separator("__"),
      );
    Self::finish(builder.build()?)
  }

  /// Load from an in-memory TOML document, ignoring the environment.
  pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
    let builder = config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml));
    Self::finish(builder.build()?)
  }

  fn finish(settings: config::Config) -> Result<Self, ConfigError> {
    let cfg: Self = settings.try_deserialize()?;
    cfg.cache.ttl()?;
    if cfg.cache.backend == CacheBackend::Redis {
      cfg.cache.redis_params()?;
    }
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Application ──────────────────────────────────────────────────────────────

/// The full HTTP application: the API mounted under `/api`, with request
/// tracing.
pub fn app<S, C>(state: AppState<S, C>) -> Router
where
  S: CharacterStore + 'static,
  C: CharacterCache + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}
