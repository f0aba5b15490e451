//! Mapping between [`Character`] and the `characters` table.
//!
//! Every attribute is stored verbatim as TEXT; the identifier is the
//! table's INTEGER rowid.

use holocron_core::character::{Character, CharacterDetail, CharacterId};

/// Bind parameters for an INSERT, in [`schema::COLUMNS`](crate::schema::COLUMNS) order.
pub fn character_params(c: Character) -> [String; 12] {
  [
    c.name,
    c.height,
    c.mass,
    c.hair_color,
    c.skin_color,
    c.eye_color,
    c.birth_year,
    c.gender,
    c.homeworld,
    c.created,
    c.edited,
    c.url,
  ]
}

/// Raw values read from a `characters` row selected with
/// `id, ` followed by [`schema::COLUMNS`](crate::schema::COLUMNS).
pub struct RawCharacter {
  pub id:        i64,
  pub character: Character,
}

impl RawCharacter {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      character: Character {
        name:       row.get(1)?,
        height:     row.get(2)?,
        mass:       row.get(3)?,
        hair_color: row.get(4)?,
        skin_color: row.get(5)?,
        eye_color:  row.get(6)?,
        birth_year: row.get(7)?,
        gender:     row.get(8)?,
        homeworld:  row.get(9)?,
        created:    row.get(10)?,
        edited:     row.get(11)?,
        url:        row.get(12)?,
      },
    })
  }

  pub fn into_detail(self) -> CharacterDetail {
    CharacterDetail::new(CharacterId(self.id), self.character)
  }
}
