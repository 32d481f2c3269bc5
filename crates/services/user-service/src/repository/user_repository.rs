//! User repository over the key-value store.
//!
//! Each user lives in a hash at `user:<id>`; ids come from the `userIncrID`
//! counter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use common::{AppError, AppResult};
use domain::{user_key, user_key_suffix, User, USER_ID_COUNTER_KEY, USER_KEY_PATTERN};

use crate::store::KvStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user, ordered by id. Empty when nothing is stored.
    async fn list_all(&self) -> AppResult<Vec<User>>;

    /// Find a user by id. Fails with `NotFound` when no record exists.
    async fn find_by_id(&self, id: i64) -> AppResult<User>;

    /// Overwrite the record when `user.id > 0`, otherwise create it and
    /// write the assigned id back into `user`.
    async fn create_or_update(&self, user: &mut User) -> AppResult<()>;

    /// Write the demo records and move the id counter past them
    async fn seed_demo_users(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    store: Arc<dyn KvStore>,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Allocate the next user id.
    ///
    /// A single INCR: the store treats a missing counter as 0, so the first
    /// id is 1 and concurrent callers never share an id.
    async fn allocate_id(&self) -> AppResult<i64> {
        let id = self.store.increment(USER_ID_COUNTER_KEY).await?;
        debug!(user_id = id, "Allocated user id");
        Ok(id)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn list_all(&self) -> AppResult<Vec<User>> {
        let keys = self.store.keys(USER_KEY_PATTERN).await?;

        let mut ids = keys
            .iter()
            .map(|key| {
                user_key_suffix(key)
                    .and_then(|suffix| suffix.parse::<i64>().ok())
                    .ok_or_else(|| AppError::Decoding(format!("invalid user key {:?}", key)))
            })
            .collect::<AppResult<Vec<i64>>>()?;
        ids.sort_unstable();

        let mut users = Vec::with_capacity(ids.len());
        for id in ids {
            users.push(self.find_by_id(id).await?);
        }
        Ok(users)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<User> {
        let fields = self.store.get_hash(&user_key(id)).await?;
        Ok(User::from_fields(&fields)?)
    }

    async fn create_or_update(&self, user: &mut User) -> AppResult<()> {
        let created = !user.is_persisted();
        if created {
            user.id = self.allocate_id().await?;
        } else if !self.store.exists(&user.key()).await? {
            return Err(AppError::no_user_found());
        }

        self.store.set_hash(&user.key(), &user.to_fields()).await?;

        if created {
            info!(user_id = user.id, "User created");
        } else {
            info!(user_id = user.id, "User updated");
        }
        Ok(())
    }

    async fn seed_demo_users(&self) -> AppResult<()> {
        let users = demo_users();
        for user in &users {
            self.store.set_hash(&user.key(), &user.to_fields()).await?;
        }

        let highest = users.iter().map(|u| u.id).max().unwrap_or_default();
        let counter = self
            .store
            .get(USER_ID_COUNTER_KEY)
            .await?
            .and_then(|raw| raw.parse::<i64>().ok())
            .unwrap_or_default();
        if counter < highest {
            self.store
                .set(USER_ID_COUNTER_KEY, &highest.to_string())
                .await?;
        }

        info!(count = users.len(), "Demo users loaded");
        Ok(())
    }
}

fn demo_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John".to_string(),
            age: 31,
            city: "New York".to_string(),
        },
        User {
            id: 2,
            name: "Doe".to_string(),
            age: 22,
            city: "Vancouver".to_string(),
        },
    ]
}
