//! Redis store tests.
//!
//! These need a running Redis server. Run with:
//!   REDIS_URL=redis://127.0.0.1:6379 cargo test -p user-service -- --ignored
//!
//! Every test works under its own key prefix and cleans up after itself.

use std::collections::HashMap;

use common::{StoreConfig, StoreError};
use user_service_lib::store::{KvStore, RedisStore};

async fn connect() -> RedisStore {
    let config = StoreConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "127.0.0.1:6379".to_string()),
        password: std::env::var("REDIS_PASSWORD").ok(),
        ..StoreConfig::default()
    };
    RedisStore::connect(&config).await.unwrap()
}

async fn cleanup(store: &RedisStore, prefix: &str) {
    let keys = store.keys(&format!("{}*", prefix)).await.unwrap();
    let mut conn = redis_connection().await;
    for key in keys {
        let _: i64 = redis::cmd("DEL").arg(&key).query_async(&mut conn).await.unwrap();
    }
}

async fn redis_connection() -> redis::aio::MultiplexedConnection {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    redis::Client::open(url)
        .unwrap()
        .get_multiplexed_async_connection()
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires Redis"]
async fn test_ping() {
    let store = connect().await;
    store.ping().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires Redis"]
async fn test_hash_round_trip_and_wrong_type() {
    let store = connect().await;
    let prefix = "it-hash:";
    cleanup(&store, prefix).await;

    let fields: HashMap<String, String> = [("name", "John"), ("city", "Oslo")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    store.set_hash("it-hash:1", &fields).await.unwrap();
    assert_eq!(store.get_hash("it-hash:1").await.unwrap(), fields);
    assert!(store.get_hash("it-hash:2").await.unwrap().is_empty());

    store.set("it-hash:3", "plain").await.unwrap();
    assert_eq!(store.get_hash("it-hash:3").await, Err(StoreError::WrongType));

    cleanup(&store, prefix).await;
}

#[tokio::test]
#[ignore = "Requires Redis"]
async fn test_increment_and_keys() {
    let store = connect().await;
    let prefix = "it-incr:";
    cleanup(&store, prefix).await;

    assert_eq!(store.increment("it-incr:counter").await.unwrap(), 1);
    assert_eq!(store.increment("it-incr:counter").await.unwrap(), 2);
    assert!(store.exists("it-incr:counter").await.unwrap());

    store.set("it-incr:12", "x").await.unwrap();
    let mut keys = store.keys("it-incr:[0-9]*").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["it-incr:12"]);

    cleanup(&store, prefix).await;
}
