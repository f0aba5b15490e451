//! Error type for `holocron-cache`.

use holocron_core::character::CharacterId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("redis error: {0}")]
  Redis(#[from] redis::RedisError),

  /// The cached bytes could not be decoded into a character.
  #[error("malformed cache entry: {0}")]
  Malformed(#[from] serde_json::Error),

  #[error("cache entry under key {key} holds character {found}")]
  KeyMismatch { key: CharacterId, found: CharacterId },

  #[error("ttl must be at least one millisecond")]
  ZeroTtl,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
