//! Domain-level constants.
//!
//! Key naming and field names for user records in the key-value store.

// =============================================================================
// Key Naming
// =============================================================================

/// Prefix of every user record key (`user:<id>`)
pub const USER_KEY_PREFIX: &str = "user:";

/// Glob matching every user record key with a numeric id
pub const USER_KEY_PATTERN: &str = "user:[0-9]*";

/// Scalar counter holding the last assigned user id
pub const USER_ID_COUNTER_KEY: &str = "userIncrID";

/// Build the store key for a user id
pub fn user_key(id: i64) -> String {
    format!("{}{}", USER_KEY_PREFIX, id)
}

/// Extract the id suffix from a user key, if it carries the user prefix
pub fn user_key_suffix(key: &str) -> Option<&str> {
    key.strip_prefix(USER_KEY_PREFIX)
}

// =============================================================================
// Hash Fields
// =============================================================================

pub const FIELD_ID: &str = "id";
pub const FIELD_NAME: &str = "name";
pub const FIELD_AGE: &str = "age";
pub const FIELD_CITY: &str = "city";

// =============================================================================
// Client-facing messages
// =============================================================================

/// Returned when a user record does not exist
pub const MSG_NO_USER_FOUND: &str = "no user found";

/// Returned when a user id cannot be parsed
pub const MSG_INVALID_USER_ID: &str = "invalid userID";

/// Returned after a record was created
pub const MSG_USER_CREATED: &str = "user created successfully";

/// Returned after a record was overwritten
pub const MSG_USER_UPDATED: &str = "user updated successfully";
