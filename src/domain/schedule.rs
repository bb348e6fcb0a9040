//! Pure evaluation over habit sets: due-ness filtering, aggregate
//! progress, and display ordering.
//!
//! Everything here is deterministic over its inputs; callers pass the
//! date in rather than reading the clock.

use crate::domain::habit::Habit;
use crate::domain::history::DateKey;
use crate::domain::types::Behavior;

/// Habits from `habits` that are due on `date`.
pub fn due_on(habits: &[Habit], date: DateKey) -> Vec<&Habit> {
    habits.iter().filter(|h| h.is_due_on(date)).collect()
}

/// Completion percentage across the habits matching `behavior` that are
/// due on `date`.
///
/// An empty due-set yields 0 rather than a division error. Rounding is
/// to the nearest integer, halves away from zero.
pub fn progress_for(habits: &[Habit], behavior: Behavior, date: DateKey) -> u8 {
    let due: Vec<&Habit> = habits
        .iter()
        .filter(|h| h.behavior == behavior && h.is_due_on(date))
        .collect();
    if due.is_empty() {
        return 0;
    }
    let done = due.iter().filter(|h| h.is_completed_on(date)).count();
    (done as f64 / due.len() as f64 * 100.0).round() as u8
}

/// Order habits for a list view: everything still open before everything
/// completed on `date`, then morning to night within each group.
///
/// The sort is stable, so ties keep their original relative order.
pub fn sort_for_display(habits: &mut [Habit], date: DateKey) {
    habits.sort_by_key(|h| (h.is_completed_on(date), h.time_range.rank()));
}

/// Good-habit progress for each of the seven days ending at `today`,
/// oldest first. Feeds the weekly calendar strip.
pub fn week_progress(habits: &[Habit], today: DateKey) -> Vec<(DateKey, u8)> {
    (0..7)
        .rev()
        .map(|offset| {
            let day = today.days_before(offset);
            (day, progress_for(habits, Behavior::Good, day))
        })
        .collect()
}
