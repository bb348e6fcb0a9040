//! Light/dark theme preference.

use std::sync::Arc;

use crate::storage::{keys, KeyValueStore};
use crate::store::StoreError;

const DARK: &str = "dark";
const LIGHT: &str = "light";

/// Persisted dark-mode flag.
///
/// Defaults to light; an unrecognized stored value also reads as light.
pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    dark_mode: bool,
}

impl ThemeStore {
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let dark_mode = storage.get(keys::THEME).await?.as_deref() == Some(DARK);
        Ok(Self { storage, dark_mode })
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip and persist the preference, returning the new state.
    pub async fn toggle(&mut self) -> Result<bool, StoreError> {
        self.dark_mode = !self.dark_mode;
        let value = if self.dark_mode { DARK } else { LIGHT };
        if let Err(err) = self.storage.set(keys::THEME, value.to_string()).await {
            tracing::warn!("Failed to persist theme preference: {}", err);
            return Err(err.into());
        }
        Ok(self.dark_mode)
    }
}
