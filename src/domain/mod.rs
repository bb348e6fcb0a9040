//! Core entities and the rules that decide due-ness and completion.
//!
//! This module defines the Habit and User entities, the calendar-day
//! completion history, and the pure scheduling functions the screens
//! derive their numbers from.

pub mod habit;
pub mod history;
pub mod schedule;
pub mod types;
pub mod user;

// Re-export public types for easy access
pub use habit::*;
pub use history::*;
pub use schedule::*;
pub use types::*;
pub use user::*;

use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
