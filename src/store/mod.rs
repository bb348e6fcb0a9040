//! State containers the screens drive.
//!
//! Each store owns one collection, applies mutations to memory first,
//! and rewrites the whole collection through the key-value store. A
//! failed write leaves memory ahead of durable state until the next
//! successful write; the error is logged and returned.

pub mod habits;
pub mod theme;
pub mod users;

// Re-export the main store types
pub use habits::HabitStore;
pub use theme::ThemeStore;
pub use users::UserStore;

use thiserror::Error;

use crate::domain::DomainError;
use crate::storage::StorageError;

/// Errors surfaced by the state containers.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Domain validation error: {0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("User already exists: {email}")]
    UserExists { email: String },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("No user is signed in")]
    NotLoggedIn,
}
