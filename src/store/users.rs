//! Registered users and the signed-in session.

use std::sync::Arc;

use crate::domain::{DomainError, User, UserDraft, UserId};
use crate::storage::{keys, KeyValueStore};
use crate::store::StoreError;

/// Owns the user list and the current session.
///
/// The session is persisted under its own key, separate from habit
/// data, so a new process resumes where the last one left off.
pub struct UserStore {
    storage: Arc<dyn KeyValueStore>,
    users: Vec<User>,
    current: Option<User>,
}

impl UserStore {
    /// Load the registered users and any persisted session.
    ///
    /// A session pointing at a user that no longer exists is dropped.
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let users: Vec<User> = match storage.get(keys::USERS).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let current = match storage.get(keys::SESSION).await? {
            Some(raw) => UserId::parse(&raw)
                .ok()
                .and_then(|id| users.iter().find(|u| u.id == id).cloned()),
            None => None,
        };
        tracing::debug!(
            "Loaded {} users, session: {}",
            users.len(),
            current.as_ref().map(|u| u.username.as_str()).unwrap_or("-")
        );
        Ok(Self {
            storage,
            users,
            current,
        })
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Register a new account and sign it in. Fails without touching the
    /// list when a field is blank or the email is already taken.
    pub async fn sign_up(&mut self, draft: &mut UserDraft) -> Result<UserId, StoreError> {
        let user = draft.build()?;
        if self.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UserExists { email: user.email });
        }

        let id = user.id;
        self.users.push(user.clone());
        self.persist_users().await?;
        self.set_session(user).await?;
        draft.clear();
        tracing::info!("Registered user {}", id);
        Ok(id)
    }

    /// Exact username/password match against the registered list.
    pub async fn sign_in(&mut self, username: &str, password: &str) -> Result<UserId, StoreError> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "all required fields must be filled".to_string(),
            }
            .into());
        }

        let user = self
            .users
            .iter()
            .find(|u| u.username == username && u.password == password)
            .cloned()
            .ok_or(StoreError::InvalidCredentials)?;

        let id = user.id;
        self.set_session(user).await?;
        tracing::info!("User {} signed in", id);
        Ok(id)
    }

    /// Close the session. Registered accounts stay.
    pub async fn sign_out(&mut self) -> Result<(), StoreError> {
        self.current = None;
        self.storage.remove(keys::SESSION).await?;
        Ok(())
    }

    async fn set_session(&mut self, user: User) -> Result<(), StoreError> {
        self.storage
            .set(keys::SESSION, user.id.to_string())
            .await?;
        self.current = Some(user);
        Ok(())
    }

    async fn persist_users(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.users)?;
        if let Err(err) = self.storage.set(keys::USERS, payload).await {
            tracing::warn!("Failed to persist user list: {}", err);
            return Err(err.into());
        }
        Ok(())
    }
}
