//! [`RedisCache`] — the Redis implementation of [`CharacterCache`].

use std::time::Duration;

use holocron_core::{
  cache::{CacheLookup, CharacterCache},
  character::{CharacterDetail, CharacterId},
};
use redis::{AsyncCommands as _, ConnectionInfo, IntoConnectionInfo as _, aio::ConnectionManager};

use crate::{Error, Result, codec};

/// Connection settings for [`RedisCache::connect`].
#[derive(Debug, Clone, Default)]
pub struct RedisCacheParams {
  /// `redis://[user:pass@]host:port[/db]`
  pub url:        String,
  /// Overrides any password embedded in `url`.
  pub password:   Option<String>,
  /// Prepended to the decimal identifier to form each key.
  pub key_prefix: String,
}

/// A character cache backed by Redis `GET` / `SET PX`.
///
/// Cloning is cheap; clones share one multiplexed, self-reconnecting
/// connection.
#[derive(Clone)]
pub struct RedisCache {
  conn:       ConnectionManager,
  key_prefix: String,
}

impl RedisCache {
  /// Connect to the server described by `params`.
  pub async fn connect(params: RedisCacheParams) -> Result<Self> {
    let client = redis::Client::open(connection_info(&params)?)?;
    let conn = client.get_connection_manager().await?;
    tracing::info!("connected to redis");
    Ok(Self { conn, key_prefix: params.key_prefix })
  }
}

/// Parse `params.url`, applying the password override.
pub(crate) fn connection_info(params: &RedisCacheParams) -> Result<ConnectionInfo> {
  let mut info = params.url.as_str().into_connection_info()?;
  if let Some(password) = &params.password {
    info.redis.password = Some(password.clone());
  }
  Ok(info)
}

/// `PX` argument for `ttl`. Sub-millisecond lifetimes round up to 1 ms.
pub(crate) fn ttl_millis(ttl: Duration) -> Result<u64> {
  if ttl.is_zero() {
    return Err(Error::ZeroTtl);
  }
  Ok(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1))
}

impl CharacterCache for RedisCache {
  type Error = Error;

  async fn get(&self, id: CharacterId) -> Result<CacheLookup> {
    let key = codec::key(&self.key_prefix, id);
    let mut conn = self.conn.clone();

    let raw: Option<String> = conn.get(key.as_str()).await?;
    match raw {
      Some(raw) => Ok(CacheLookup::Hit(codec::decode(id, &raw)?)),
      None => Ok(CacheLookup::Absent),
    }
  }

  async fn set(&self, detail: &CharacterDetail, ttl: Duration) -> Result<()> {
    let millis = ttl_millis(ttl)?;
    let key = codec::key(&self.key_prefix, detail.id);
    let payload = codec::encode(detail)?;
    let mut conn = self.conn.clone();

    conn.pset_ex::<_, _, ()>(key.as_str(), payload, millis).await?;
    tracing::debug!(%key, ttl_ms = millis, "stored character in redis");
    Ok(())
  }
}
