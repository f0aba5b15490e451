//! The `CharacterCache` trait — the read-through cache in front of the store.

use std::{future::Future, time::Duration};

use crate::character::{CharacterDetail, CharacterId};

/// Successful outcome of [`CharacterCache::get`].
///
/// A missing key is an expected result, not a fault, so it lives here rather
/// than in the error channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
  Hit(CharacterDetail),
  /// The key is not present, or its entry has expired.
  Absent,
}

impl CacheLookup {
  pub fn is_hit(&self) -> bool { matches!(self, Self::Hit(_)) }
}

/// A key-value cache holding [`CharacterDetail`]s with a time-to-live.
///
/// Errors mean the cache is unreachable or returned data that could not be
/// decoded.
pub trait CharacterCache: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up the cached detail for `id`.
  fn get(
    &self,
    id: CharacterId,
  ) -> impl Future<Output = Result<CacheLookup, Self::Error>> + Send + '_;

  /// Store `detail` under its identifier. After `ttl` elapses the entry is
  /// reported as [`CacheLookup::Absent`].
  fn set<'a>(
    &'a self,
    detail: &'a CharacterDetail,
    ttl: Duration,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
