//! Handlers for `/v1/starwar/characters` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/v1/starwar/characters` | Body: flat [`Character`] JSON; returns 201 + `{"id":n}` |
//! | `GET`  | `/v1/starwar/characters/:id` | Cache-aside lookup; 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use holocron_core::{
  cache::CharacterCache,
  character::{Character, CharacterDetail, CharacterId},
  store::CharacterStore,
};
use serde::Serialize;

use crate::{AppState, error::ApiError};

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreatedBody {
  pub id: CharacterId,
}

/// `POST /v1/starwar/characters` — returns 201 + the assigned identifier.
pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  Json(body): Json<Character>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CharacterStore,
  C: CharacterCache,
{
  let id = state
    .create
    .create(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(CreatedBody { id })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// A character flattened next to its identifier.
#[derive(Debug, Serialize)]
pub struct CharacterBody {
  pub id:        CharacterId,
  #[serde(flatten)]
  pub character: Character,
}

impl From<CharacterDetail> for CharacterBody {
  fn from(d: CharacterDetail) -> Self {
    CharacterBody { id: d.id, character: d.character }
  }
}

/// `GET /v1/starwar/characters/:id`
pub async fn get_one<S, C>(
  State(state): State<AppState<S, C>>,
  Path(raw_id): Path<String>,
) -> Result<Json<CharacterBody>, ApiError>
where
  S: CharacterStore,
  C: CharacterCache,
{
  let id: CharacterId = raw_id
    .parse()
    .map_err(|_| ApiError::BadRequest("Invalid character identifier".into()))?;
  let detail = state.find.find(id).await?;
  Ok(Json(detail.into()))
}
