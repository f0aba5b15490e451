//! Error types for `holocron-core`.

use std::fmt;

use thiserror::Error;

use crate::character::CharacterId;

/// A boxed backend error, as carried by [`LookupError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The step of a lookup at which a backend failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStage {
  /// Reading the cache before consulting the store.
  CacheLookup,
  /// Reading the store after a cache miss.
  StoreLookup,
  /// Writing the store's value back into the cache.
  CachePopulate,
}

impl fmt::Display for LookupStage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::CacheLookup => "cache lookup",
      Self::StoreLookup => "store lookup",
      Self::CachePopulate => "cache populate",
    })
  }
}

/// Failure of [`FindCharacter::find`](crate::service::FindCharacter::find).
#[derive(Debug, Error)]
pub enum LookupError {
  #[error("character not found: {0}")]
  NotFound(CharacterId),

  /// Transport failure or undecodable data in the cache.
  #[error("cache unavailable during {stage} of character {id}: {source}")]
  CacheUnavailable {
    id:     CharacterId,
    stage:  LookupStage,
    #[source]
    source: BoxError,
  },

  #[error("store unavailable during {stage} of character {id}: {source}")]
  StoreUnavailable {
    id:     CharacterId,
    stage:  LookupStage,
    #[source]
    source: BoxError,
  },
}

impl LookupError {
  /// The identifier the failed lookup was for.
  pub fn id(&self) -> CharacterId {
    match self {
      Self::NotFound(id)
      | Self::CacheUnavailable { id, .. }
      | Self::StoreUnavailable { id, .. } => *id,
    }
  }

  /// The stage that failed, for backend errors.
  pub fn stage(&self) -> Option<LookupStage> {
    match self {
      Self::NotFound(_) => None,
      Self::CacheUnavailable { stage, .. } | Self::StoreUnavailable { stage, .. } => {
        Some(*stage)
      }
    }
  }

  pub fn is_not_found(&self) -> bool { matches!(self, Self::NotFound(_)) }
}

pub type Result<T, E = LookupError> = std::result::Result<T, E>;
