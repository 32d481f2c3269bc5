//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling for HTTP and the key-value store
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, StoreError, StoreResult};
