//! JSON REST API for Holocron.
//!
//! Exposes an axum [`Router`] backed by the character services in
//! [`holocron_core::service`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", holocron_api::api_router(state))
//! ```

pub mod characters;
pub mod error;

use std::{sync::Arc, time::Duration};

use axum::{Router, routing::{get, post}};
use holocron_core::{
  cache::CharacterCache,
  service::{CacheFaultPolicy, CreateCharacter, FindCharacter},
  store::CharacterStore,
};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, C> {
  pub create: Arc<CreateCharacter<S>>,
  pub find:   Arc<FindCharacter<S, C>>,
}

impl<S, C> Clone for AppState<S, C> {
  fn clone(&self) -> Self {
    Self { create: self.create.clone(), find: self.find.clone() }
  }
}

impl<S, C> AppState<S, C>
where
  S: CharacterStore,
  C: CharacterCache,
{
  /// Wire both services over one store and one cache.
  pub fn new(store: Arc<S>, cache: Arc<C>, ttl: Duration, policy: CacheFaultPolicy) -> Self {
    Self {
      create: Arc::new(CreateCharacter::new(store.clone())),
      find:   Arc::new(FindCharacter::new(store, cache, ttl).with_fault_policy(policy)),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C>(state: AppState<S, C>) -> Router<()>
where
  S: CharacterStore + 'static,
  C: CharacterCache + 'static,
{
  Router::new()
    .route("/v1/starwar/characters", post(characters::create::<S, C>))
    .route("/v1/starwar/characters/{id}", get(characters::get_one::<S, C>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
