//! User Service Library
//!
//! A small CRUD HTTP service for user records kept as hashes in a key-value
//! store. Requests flow handler → repository → store gateway:
//!
//! - **store**: `KvStore` primitives over Redis or an in-process map
//! - **repository**: list, find, create-or-update, id allocation
//! - **handlers**: status codes and response bodies

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod state;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use common::StoreResult;

use crate::config::UserServiceConfig;
use crate::routes::create_router;
use crate::state::AppState;
use crate::store::{KvStore, MemoryStore, RedisStore};

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = connect_store(&config).await?;
    let state = AppState::from_store(store);

    if config.seed_demo_data {
        state.users.seed_demo_users().await?;
    }

    // Build router
    let app = create_router(state);

    // Build address
    let addr: SocketAddr = config.service.bind_addr().parse()?;
    info!("User service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load the demo users into the configured store.
pub async fn run_seed(config: UserServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = connect_store(&config).await?;
    AppState::from_store(store).users.seed_demo_users().await?;
    Ok(())
}

async fn connect_store(config: &UserServiceConfig) -> StoreResult<Arc<dyn KvStore>> {
    if config.in_memory {
        info!("Using in-memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }
    Ok(Arc::new(RedisStore::connect(&config.store).await?))
}
