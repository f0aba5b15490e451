//! Cache backends for Holocron characters.
//!
//! Two implementations of [`holocron_core::cache::CharacterCache`]:
//! - [`RedisCache`] — production cache over a Redis connection manager
//! - [`MemoryCache`] — in-process map with per-entry expiry
//!
//! Both store the JSON encoding defined in [`codec`], keyed by the
//! character's identifier.

pub mod codec;
pub mod error;
mod memory;
mod redis_cache;

pub use error::{Error, Result};
pub use memory::MemoryCache;
pub use redis_cache::{RedisCache, RedisCacheParams};
