//! Persistence boundary: an async string key-value store.
//!
//! The state containers persist whole collections as JSON strings under
//! well-known keys. The store itself only sees opaque strings; all
//! shaping happens above it.

pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Device-local key-value store.
///
/// This trait is the seam between the state containers and whatever
/// actually holds the bytes, so backends can be swapped without touching
/// the stores.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Key layout used by the state containers.
pub mod keys {
    use crate::domain::UserId;

    /// Registered user list.
    pub const USERS: &str = "my-user";

    /// Current session's user id.
    pub const SESSION: &str = "session";

    /// Theme preference, "dark" or "light".
    pub const THEME: &str = "theme";

    /// Per-user habit collection.
    pub fn habits(user_id: &UserId) -> String {
        format!("habits-{user_id}")
    }
}
