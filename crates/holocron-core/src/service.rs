//! Character creation and cache-aside lookup.
//!
//! [`CreateCharacter`] writes straight to the store and never touches the
//! cache. [`FindCharacter`] checks the cache first, falls back to the store on
//! a miss, and writes the store's value back with the configured TTL.

use std::{sync::Arc, time::Duration};

use serde::Deserialize;

use crate::{
  cache::{CacheLookup, CharacterCache},
  character::{Character, CharacterDetail, CharacterId},
  error::{LookupError, LookupStage, Result},
  store::CharacterStore,
};

// ─── Creation ────────────────────────────────────────────────────────────────

/// Creates characters in the store.
pub struct CreateCharacter<S> {
  store: Arc<S>,
}

impl<S: CharacterStore> CreateCharacter<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Persist `character` and return the identifier assigned by the store.
  ///
  /// Store errors are returned unchanged. The cache is not populated; the
  /// first lookup does that.
  pub async fn create(&self, character: Character) -> Result<CharacterId, S::Error> {
    let id = self.store.create(character).await?;
    tracing::info!(%id, "created character");
    Ok(id)
  }
}

// ─── Lookup ──────────────────────────────────────────────────────────────────

/// What a lookup does when the cache fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheFaultPolicy {
  /// Any cache error fails the lookup, including a failed write-back after
  /// the store returned a valid character.
  #[default]
  Strict,
  /// Cache errors are logged and bypassed: a failed read falls through to the
  /// store and a failed write-back still returns the store's value.
  Degrade,
}

/// Cache-aside lookup of characters.
pub struct FindCharacter<S, C> {
  store:  Arc<S>,
  cache:  Arc<C>,
  ttl:    Duration,
  policy: CacheFaultPolicy,
}

impl<S, C> FindCharacter<S, C>
where
  S: CharacterStore,
  C: CharacterCache,
{
  /// Build a lookup service that caches store reads for `ttl`, using
  /// [`CacheFaultPolicy::Strict`].
  pub fn new(store: Arc<S>, cache: Arc<C>, ttl: Duration) -> Self {
    Self { store, cache, ttl, policy: CacheFaultPolicy::Strict }
  }

  pub fn with_fault_policy(mut self, policy: CacheFaultPolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn ttl(&self) -> Duration { self.ttl }

  pub fn fault_policy(&self) -> CacheFaultPolicy { self.policy }

  /// Find the character with identifier `id`.
  ///
  /// A cache hit is returned without consulting the store. On a miss the
  /// store is read and, if the character exists, written back to the cache.
  /// Nothing is cached for an unknown identifier.
  pub async fn find(&self, id: CharacterId) -> Result<CharacterDetail> {
    match self.cache.get(id).await {
      Ok(CacheLookup::Hit(detail)) => {
        tracing::debug!(%id, "cache hit");
        return Ok(detail);
      }
      Ok(CacheLookup::Absent) => {
        tracing::debug!(%id, "cache miss");
      }
      Err(e) => self.cache_fault(id, LookupStage::CacheLookup, e)?,
    }

    let detail = self
      .store
      .find_by_id(id)
      .await
      .map_err(|e| LookupError::StoreUnavailable {
        id,
        stage: LookupStage::StoreLookup,
        source: Box::new(e),
      })?
      .ok_or(LookupError::NotFound(id))?;

    if let Err(e) = self.cache.set(&detail, self.ttl).await {
      self.cache_fault(id, LookupStage::CachePopulate, e)?;
    }

    Ok(detail)
  }

  /// Apply the fault policy to a cache error: fail under `Strict`, log and
  /// carry on under `Degrade`.
  fn cache_fault(&self, id: CharacterId, stage: LookupStage, error: C::Error) -> Result<()> {
    match self.policy {
      CacheFaultPolicy::Strict => Err(LookupError::CacheUnavailable {
        id,
        stage,
        source: Box::new(error),
      }),
      CacheFaultPolicy::Degrade => {
        tracing::warn!(%id, %stage, error = %error, "cache fault ignored");
        Ok(())
      }
    }
  }
}
