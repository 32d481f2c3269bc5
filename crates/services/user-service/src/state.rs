//! Application state for dependency injection.

use std::sync::Arc;

use crate::repository::{UserRepository, UserStore};
use crate::store::KvStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub store: Arc<dyn KvStore>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserRepository>, store: Arc<dyn KvStore>) -> Self {
        Self { users, store }
    }

    /// Build the state with the default repository over `store`.
    pub fn from_store(store: Arc<dyn KvStore>) -> Self {
        let users = Arc::new(UserStore::new(store.clone()));
        Self::new(users, store)
    }
}
