//! User account entity and the registration form.

use serde::{Deserialize, Serialize};

use crate::domain::types::UserId;
use crate::domain::DomainError;

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Stored as entered; the journal is device-local.
    pub password: String,
}

/// Registration form state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl UserDraft {
    /// Validate the form and build the account with a fresh id.
    pub fn build(&self) -> Result<User, DomainError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.trim().is_empty()
        {
            return Err(DomainError::Validation {
                message: "all required fields must be filled".to_string(),
            });
        }

        Ok(User {
            id: UserId::new(),
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// Reset to the empty form.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
