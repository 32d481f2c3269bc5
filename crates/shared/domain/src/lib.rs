//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` record, its hash-field encoding, and the key-naming policy
//! shared by the store gateway and the repository.

pub mod constants;
pub mod error;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use user::{parse_user_id, User, UserPayload, UserResponse, UserSummary};
