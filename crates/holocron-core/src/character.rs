//! Character types — the record, its identifier, and the pair of both.

use std::{fmt, num::ParseIntError, str::FromStr};

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a character. Never reused once assigned.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CharacterId(pub i64);

impl CharacterId {
  pub fn get(self) -> i64 { self.0 }
}

impl fmt::Display for CharacterId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for CharacterId {
  type Err = ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> { s.parse().map(Self) }
}

impl From<i64> for CharacterId {
  fn from(id: i64) -> Self { Self(id) }
}

/// A character record. Every attribute is a plain string; empty strings are
/// valid values, missing attributes are not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
  pub name:       String,
  pub height:     String,
  pub mass:       String,
  pub hair_color: String,
  pub skin_color: String,
  pub eye_color:  String,
  pub birth_year: String,
  pub gender:     String,
  pub homeworld:  String,
  /// Provenance timestamp as supplied by the client; stored verbatim.
  pub created:    String,
  pub edited:     String,
  pub url:        String,
}

/// A character together with its identifier — the unit exchanged between
/// the lookup service, the cache and the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetail {
  pub id:        CharacterId,
  pub character: Character,
}

impl CharacterDetail {
  pub fn new(id: CharacterId, character: Character) -> Self {
    Self { id, character }
  }
}
