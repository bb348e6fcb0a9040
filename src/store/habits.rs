//! Authoritative habit collection for the signed-in user.

use std::sync::Arc;

use crate::domain::{
    schedule, Behavior, DateKey, Habit, HabitDraft, HabitId, HabitPatch, UserId,
};
use crate::storage::{keys, KeyValueStore};
use crate::store::StoreError;

/// Owns the habit list and every mutation over it.
///
/// The full collection is the unit of persistence: each mutation
/// reserializes the whole list under the user's key.
pub struct HabitStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    habits: Vec<Habit>,
}

impl HabitStore {
    /// Store for `user_id`'s collection, loading anything already
    /// persisted. A missing key is an empty collection.
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        user_id: &UserId,
    ) -> Result<Self, StoreError> {
        let key = keys::habits(user_id);
        let habits: Vec<Habit> = match storage.get(&key).await? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        tracing::debug!("Loaded {} habits for user {}", habits.len(), user_id);
        Ok(Self {
            storage,
            key,
            habits,
        })
    }

    /// The authoritative list, in insertion order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: HabitId) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Validate the draft, append the new habit, persist, and clear the
    /// draft. On a validation error nothing changes and nothing is
    /// written.
    pub async fn add_habit(&mut self, draft: &mut HabitDraft) -> Result<HabitId, StoreError> {
        let habit = draft.build()?;
        let id = habit.id;
        self.habits.push(habit);
        draft.clear();
        self.persist().await?;
        tracing::info!("Added habit {}", id);
        Ok(id)
    }

    /// Remove a habit. An unknown id is a no-op, not an error, and skips
    /// the rewrite.
    pub async fn delete_habit(&mut self, id: HabitId) -> Result<(), StoreError> {
        let before = self.habits.len();
        self.habits.retain(|h| h.id != id);
        if self.habits.len() == before {
            return Ok(());
        }
        self.persist().await?;
        tracing::info!("Deleted habit {}", id);
        Ok(())
    }

    /// Overwrite the fields present in `patch`. An unknown id is a no-op.
    pub async fn edit_habit(&mut self, id: HabitId, patch: HabitPatch) -> Result<(), StoreError> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(());
        };
        habit.apply(patch);
        self.persist().await
    }

    /// Flip one day's completion state, returning the new state. An
    /// unknown id is a no-op and returns `None`.
    pub async fn toggle_completion(
        &mut self,
        id: HabitId,
        date: DateKey,
    ) -> Result<Option<bool>, StoreError> {
        let Some(habit) = self.habits.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };
        let now_done = habit.toggle_completion(date);
        tracing::debug!(
            "Toggled habit {} for {}: completed={}",
            id,
            date,
            now_done
        );
        self.persist().await?;
        Ok(Some(now_done))
    }

    /// Drop the in-memory collection. The persisted data stays put for
    /// the next sign-in.
    pub fn clear(&mut self) {
        self.habits.clear();
    }

    /// Completion percentage for `behavior` on `date`.
    pub fn progress_for(&self, behavior: Behavior, date: DateKey) -> u8 {
        schedule::progress_for(&self.habits, behavior, date)
    }

    /// Good-habit progress for the seven days ending at `today`.
    pub fn week_progress(&self, today: DateKey) -> Vec<(DateKey, u8)> {
        schedule::week_progress(&self.habits, today)
    }

    /// Habits with `behavior` due on `date`, ordered for a list view:
    /// open before completed, morning to night within each group.
    pub fn display_list(&self, behavior: Behavior, date: DateKey) -> Vec<Habit> {
        let mut due: Vec<Habit> = self
            .habits
            .iter()
            .filter(|h| h.behavior == behavior && h.is_due_on(date))
            .cloned()
            .collect();
        schedule::sort_for_display(&mut due, date);
        due
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&self.habits)?;
        if let Err(err) = self.storage.set(&self.key, payload).await {
            tracing::warn!("Failed to persist habit collection: {}", err);
            return Err(err.into());
        }
        Ok(())
    }
}
