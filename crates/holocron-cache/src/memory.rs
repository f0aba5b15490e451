//! [`MemoryCache`] — an in-process [`CharacterCache`] with per-entry expiry.

use std::{
  collections::{
    HashMap,
    hash_map::Entry::{Occupied, Vacant},
  },
  sync::{Arc, Mutex, PoisonError},
  time::Duration,
};

use holocron_core::{
  cache::{CacheLookup, CharacterCache},
  character::{CharacterDetail, CharacterId},
};
use tokio::time::Instant;

use crate::{Error, Result, codec};

struct Entry {
  payload:    String,
  expires_at: Instant,
}

/// A process-local cache holding the same encoded entries as
/// [`RedisCache`](crate::RedisCache).
///
/// Expired entries are dropped lazily when read. Cloning is cheap — clones
/// share the same map.
#[derive(Clone, Default)]
pub struct MemoryCache {
  entries: Arc<Mutex<HashMap<CharacterId, Entry>>>,
}

impl MemoryCache {
  pub fn new() -> Self { Self::default() }

  /// Number of stored entries, including expired ones not yet read.
  pub fn len(&self) -> usize {
    self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl CharacterCache for MemoryCache {
  type Error = Error;

  async fn get(&self, id: CharacterId) -> Result<CacheLookup> {
    let payload = {
      let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
      match entries.entry(id) {
        Occupied(entry) if entry.get().expires_at > Instant::now() => {
          Some(entry.get().payload.clone())
        }
        Occupied(expired) => {
          expired.remove();
          None
        }
        Vacant(_) => None,
      }
    };

    match payload {
      Some(raw) => Ok(CacheLookup::Hit(codec::decode(id, &raw)?)),
      None => Ok(CacheLookup::Absent),
    }
  }

  async fn set(&self, detail: &CharacterDetail, ttl: Duration) -> Result<()> {
    if ttl.is_zero() {
      return Err(Error::ZeroTtl);
    }
    let entry = Entry {
      payload:    codec::encode(detail)?,
      expires_at: Instant::now() + ttl,
    };
    self
      .entries
      .lock()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(detail.id, entry);
    Ok(())
  }
}
