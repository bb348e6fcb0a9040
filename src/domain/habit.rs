//! Habit entity, the creation draft, and partial edits.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::history::{CompletionHistory, DateKey};
use crate::domain::types::{weekday_names, Behavior, Frequency, HabitId, TimeRange};
use crate::domain::DomainError;

/// A recurring task the user wants to build up or cut out.
///
/// Field names on the wire keep the shape the app has always persisted:
/// `weekDay`, `timeRange`, `completionHistory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    /// Short title shown in lists.
    pub task: String,
    pub description: String,
    pub frequency: Frequency,
    pub behavior: Behavior,
    /// Days the habit applies to. Only meaningful for weekly habits,
    /// non-empty whenever `frequency` is weekly.
    #[serde(default, with = "weekday_names")]
    pub week_day: Vec<Weekday>,
    pub time_range: TimeRange,
    /// Days marked done. Absent in old records, so it defaults to empty.
    #[serde(default)]
    pub completion_history: CompletionHistory,
}

impl Habit {
    /// True when the recurrence rule selects `date`.
    pub fn is_due_on(&self, date: DateKey) -> bool {
        match self.frequency {
            Frequency::Daily => true,
            Frequency::Weekly => self.week_day.contains(&date.weekday()),
        }
    }

    /// True when `date` is marked done in the history.
    ///
    /// Does not consult [`Habit::is_due_on`]: a habit can be marked done
    /// on a day its rule does not select.
    pub fn is_completed_on(&self, date: DateKey) -> bool {
        self.completion_history.contains(date)
    }

    /// Flip completion for one day, returning the new state.
    pub fn toggle_completion(&mut self, date: DateKey) -> bool {
        self.completion_history.toggle(date)
    }

    /// Shallow per-field overwrite from an edit form. Fields left `None`
    /// keep their current value.
    pub fn apply(&mut self, patch: HabitPatch) {
        if let Some(task) = patch.task {
            self.task = task;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(behavior) = patch.behavior {
            self.behavior = behavior;
        }
        if let Some(week_day) = patch.week_day {
            self.week_day = week_day;
        }
        if let Some(time_range) = patch.time_range {
            self.time_range = time_range;
        }
    }
}

/// In-progress habit form, filled one field at a time.
///
/// Updates go through [`DraftUpdate`] so each field keeps its own type
/// instead of the stringly-keyed setter this replaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitDraft {
    pub task: String,
    pub description: String,
    pub frequency: Option<Frequency>,
    pub behavior: Option<Behavior>,
    pub week_day: Vec<Weekday>,
    pub time_range: Option<TimeRange>,
}

/// A single field assignment applied to a [`HabitDraft`].
#[derive(Debug, Clone, PartialEq)]
pub enum DraftUpdate {
    Task(String),
    Description(String),
    Frequency(Frequency),
    Behavior(Behavior),
    WeekDays(Vec<Weekday>),
    TimeRange(TimeRange),
}

impl HabitDraft {
    pub fn apply(&mut self, update: DraftUpdate) {
        match update {
            DraftUpdate::Task(task) => self.task = task,
            DraftUpdate::Description(description) => self.description = description,
            DraftUpdate::Frequency(frequency) => self.frequency = Some(frequency),
            DraftUpdate::Behavior(behavior) => self.behavior = Some(behavior),
            DraftUpdate::WeekDays(days) => self.week_day = days,
            DraftUpdate::TimeRange(time_range) => self.time_range = Some(time_range),
        }
    }

    /// Reset to the empty form.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the form and build the habit: fresh id, empty history.
    ///
    /// Every field is required, and weekly habits need at least one
    /// weekday. One aggregate error covers all missing fields, which is
    /// all the form surface reports.
    pub fn build(&self) -> Result<Habit, DomainError> {
        let (frequency, behavior, time_range) =
            match (self.frequency, self.behavior, self.time_range) {
                (Some(frequency), Some(behavior), Some(time_range)) => {
                    (frequency, behavior, time_range)
                }
                _ => return Err(Self::incomplete()),
            };

        let task = self.task.trim();
        let description = self.description.trim();
        if task.is_empty() || description.is_empty() {
            return Err(Self::incomplete());
        }
        if frequency == Frequency::Weekly && self.week_day.is_empty() {
            return Err(Self::incomplete());
        }

        Ok(Habit {
            id: HabitId::new(),
            task: task.to_string(),
            description: description.to_string(),
            frequency,
            behavior,
            week_day: self.week_day.clone(),
            time_range,
            completion_history: CompletionHistory::new(),
        })
    }

    fn incomplete() -> DomainError {
        DomainError::Validation {
            message: "all required fields must be filled".to_string(),
        }
    }
}

/// Partial edit of an existing habit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub task: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<Frequency>,
    pub behavior: Option<Behavior>,
    pub week_day: Option<Vec<Weekday>>,
    pub time_range: Option<TimeRange>,
}
