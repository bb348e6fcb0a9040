//! Local-first habit journal.
//!
//! Users register, sign in, and keep recurring good/bad habits with a
//! per-calendar-day completion history. The crate is organized the way
//! the data flows: [`domain`] holds the entities and the pure
//! recurrence rules, [`storage`] the key-value persistence boundary,
//! and [`store`] the state containers a front end drives.

use std::sync::Arc;

use thiserror::Error;

pub mod domain;
pub mod storage;
pub mod store;

// Re-export public modules and types
pub use domain::*;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use store::{HabitStore, StoreError, ThemeStore, UserStore};

/// Errors that can occur during application operation.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application root: one storage handle, the session stores, and the
/// signed-in user's habit collection.
///
/// Screens hold a handle to this instead of reaching for globals; every
/// mutation goes through a method that owns its collection.
pub struct App {
    storage: Arc<dyn KeyValueStore>,
    users: UserStore,
    theme: ThemeStore,
    habits: Option<HabitStore>,
}

impl App {
    /// Wire the stores over `storage`, restoring any persisted session
    /// and, when one exists, that user's habit collection.
    pub async fn new(storage: Arc<dyn KeyValueStore>) -> Result<Self, AppError> {
        let users = UserStore::load(Arc::clone(&storage)).await?;
        let theme = ThemeStore::load(Arc::clone(&storage)).await?;
        let habits = match users.current_user() {
            Some(user) => Some(HabitStore::load(Arc::clone(&storage), &user.id).await?),
            None => None,
        };
        tracing::debug!("Application state loaded ({} users)", users.users().len());
        Ok(Self {
            storage,
            users,
            theme,
            habits,
        })
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeStore {
        &mut self.theme
    }

    /// The signed-in user's habit collection.
    pub fn habits(&self) -> Result<&HabitStore, AppError> {
        self.habits
            .as_ref()
            .ok_or(AppError::Store(StoreError::NotLoggedIn))
    }

    pub fn habits_mut(&mut self) -> Result<&mut HabitStore, AppError> {
        self.habits
            .as_mut()
            .ok_or(AppError::Store(StoreError::NotLoggedIn))
    }

    /// Register a new account and open its (empty) habit collection.
    pub async fn sign_up(&mut self, draft: &mut UserDraft) -> Result<UserId, AppError> {
        let id = self.users.sign_up(draft).await?;
        self.habits = Some(HabitStore::load(Arc::clone(&self.storage), &id).await?);
        Ok(id)
    }

    /// Sign in and load that user's habit collection.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<UserId, AppError> {
        let id = self.users.sign_in(username, password).await?;
        self.habits = Some(HabitStore::load(Arc::clone(&self.storage), &id).await?);
        Ok(id)
    }

    /// Close the session. Persisted habit data stays for the next
    /// sign-in; only the in-memory collection is dropped.
    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        self.users.sign_out().await?;
        if let Some(habits) = self.habits.as_mut() {
            habits.clear();
        }
        self.habits = None;
        Ok(())
    }
}
