//! [`SqliteStore`] — the SQLite implementation of [`CharacterStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use holocron_core::{
  character::{Character, CharacterDetail, CharacterId},
  store::CharacterStore,
};

use crate::{
  encode::{RawCharacter, character_params},
  schema::{COLUMNS, SCHEMA},
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A character store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CharacterStore impl ─────────────────────────────────────────────────────

impl CharacterStore for SqliteStore {
  type Error = crate::Error;

  async fn create(&self, character: Character) -> Result<CharacterId> {
    let values = character_params(character);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!(
            "INSERT INTO characters ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
          ),
          rusqlite::params_from_iter(values.iter()),
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::debug!(id, "inserted character row");
    Ok(CharacterId(id))
  }

  async fn find_by_id(&self, id: CharacterId) -> Result<Option<CharacterDetail>> {
    let raw: Option<RawCharacter> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT id, {COLUMNS} FROM characters WHERE id = ?1"),
            rusqlite::params![id.get()],
            RawCharacter::from_row,
          )
          .optional()?)
      })
      .await?;

    Ok(raw.map(RawCharacter::into_detail))
  }
}
