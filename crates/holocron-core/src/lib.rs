//! Core types, port traits and services for the Holocron character service.
//!
//! This crate is deliberately free of HTTP, database and cache-client
//! dependencies. Backends implement [`store::CharacterStore`] and
//! [`cache::CharacterCache`]; the API layer drives the services in
//! [`service`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod cache;
pub mod character;
pub mod error;
pub mod service;
pub mod store;

pub use error::{LookupError, LookupStage, Result};

#[cfg(test)]
mod tests;
