//! JSON encoding of [`CharacterDetail`] as stored in the cache.
//!
//! The encoding is a flat object: the identifier under `id` next to the
//! twelve character attributes. Every attribute is required on decode, so a
//! truncated or foreign entry is rejected rather than read as a partial
//! character.

use holocron_core::character::{Character, CharacterDetail, CharacterId};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Serialize, Deserialize)]
struct CachedCharacter {
  id:        CharacterId,
  #[serde(flatten)]
  character: Character,
}

/// Cache key for `id`, with an optional namespace prefix.
pub fn key(prefix: &str, id: CharacterId) -> String { format!("{prefix}{id}") }

pub fn encode(detail: &CharacterDetail) -> Result<String> {
  let cached = CachedCharacter { id: detail.id, character: detail.character.clone() };
  Ok(serde_json::to_string(&cached)?)
}

/// Decode an entry read under the key for `expected`.
pub fn decode(expected: CharacterId, raw: &str) -> Result<CharacterDetail> {
  let cached: CachedCharacter = serde_json::from_str(raw)?;
  if cached.id != expected {
    return Err(Error::KeyMismatch { key: expected, found: cached.id });
  }
  Ok(CharacterDetail::new(cached.id, cached.character))
}
