//! Key-value store gateway.
//!
//! `KvStore` is the capability the repository needs from the external store.
//! `RedisStore` talks to Redis; `MemoryStore` keeps everything in process for
//! tests and local development.

mod memory_store;
mod redis_store;

use std::collections::HashMap;

use async_trait::async_trait;

use common::StoreResult;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Store primitives used by the repository.
///
/// Every call is a single round trip; nothing is cached or retried.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait KvStore: Send + Sync {
    /// EXISTS
    async fn exists(&self, key: &str) -> StoreResult<bool>;

    /// GET. Fails with `StoreError::WrongType` if the key holds a hash.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// SET
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// HGETALL. An absent key yields an empty map; a key holding a scalar
    /// fails with `StoreError::WrongType`.
    async fn get_hash(&self, key: &str) -> StoreResult<HashMap<String, String>>;

    /// HMSET. Given fields are overwritten, other fields are kept.
    async fn set_hash(&self, key: &str, fields: &HashMap<String, String>) -> StoreResult<()>;

    /// INCR. Atomic; an absent key counts from 0.
    async fn increment(&self, key: &str) -> StoreResult<i64>;

    /// KEYS with a Redis glob pattern
    async fn keys(&self, pattern: &str) -> StoreResult<Vec<String>>;

    /// PING
    async fn ping(&self) -> StoreResult<()>;
}
