//! Redis-backed store.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client, IntoConnectionInfo, RedisError};
use tracing::{debug, warn};

use common::{StoreConfig, StoreError, StoreResult};

use super::KvStore;

/// Redis store over a shared multiplexed connection.
///
/// Cloning is cheap; every clone talks over the same connection manager,
/// which reconnects on its own after a failure.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let url = config.normalized_url();
        debug!("Connecting to Redis at {}", config.redacted_url());

        let mut info = url.as_str().into_connection_info()?;
        if let Some(password) = config.password.as_ref().filter(|p| !p.is_empty()) {
            info.redis.password = Some(password.clone());
        }

        let client = Client::open(info)?;
        let manager_config = ConnectionManagerConfig::new()
            .set_connection_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .set_response_timeout(Duration::from_secs(config.response_timeout_seconds));
        let connection = ConnectionManager::new_with_config(client, manager_config).await?;

        tracing::info!("Redis store connected");
        Ok(Self { connection })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.connection.clone();
        let exists: bool = conn.exists(key).await.map_err(|e| store_error(key, e))?;
        Ok(exists)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await.map_err(|e| store_error(key, e))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut conn = self.connection.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| store_error(key, e))?;
        Ok(())
    }

    async fn get_hash(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let mut conn = self.connection.clone();
        let fields: HashMap<String, String> =
            conn.hgetall(key).await.map_err(|e| store_error(key, e))?;
        Ok(fields)
    }

    async fn set_hash(&self, key: &str, fields: &HashMap<String, String>) -> StoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let items: Vec<(&String, &String)> = fields.iter().collect();
        let mut conn = self.connection.clone();
        conn.hset_multiple::<_, _, _, ()>(key, items.as_slice())
            .await
            .map_err(|e| store_error(key, e))?;
        Ok(())
    }

    async fn increment(&self, key: &str) -> StoreResult<i64> {
        let mut conn = self.connection.clone();
        let value: i64 = conn.incr(key, 1i64).await.map_err(|e| store_error(key, e))?;
        Ok(value)
    }

    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>> {
        let mut conn = self.connection.clone();
        let keys: Vec<String> = conn.keys(pattern).await.map_err(|e| store_error(pattern, e))?;
        Ok(keys)
    }

    async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| store_error("PING", e))?;
        Ok(())
    }
}

/// Convert a Redis error to StoreError.
fn store_error(key: &str, e: RedisError) -> StoreError {
    warn!("Redis error for {}: {}", key, e);
    StoreError::from(e)
}
