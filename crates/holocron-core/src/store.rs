//! The `CharacterStore` trait — the source of truth for characters.
//!
//! Implemented by storage backends (e.g. `holocron-store-sqlite`). The
//! services depend on this abstraction, never on a concrete backend.

use std::future::Future;

use crate::character::{Character, CharacterDetail, CharacterId};

/// Durable, canonical storage for characters.
///
/// Each method is a single statement against the backend: it either succeeds
/// completely or fails without partial effects.
pub trait CharacterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new character and return the identifier the store assigned.
  fn create(
    &self,
    character: Character,
  ) -> impl Future<Output = Result<CharacterId, Self::Error>> + Send + '_;

  /// Retrieve a character by identifier. Returns `None` if no character
  /// with that identifier exists.
  fn find_by_id(
    &self,
    id: CharacterId,
  ) -> impl Future<Output = Result<Option<CharacterDetail>, Self::Error>> + Send + '_;
}
