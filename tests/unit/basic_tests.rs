//! Unit tests over the public domain surface.

use chrono::Weekday;
use habit_journal::*;

fn draft(task: &str, frequency: Frequency, behavior: Behavior, days: Vec<Weekday>) -> HabitDraft {
    let mut draft = HabitDraft::default();
    draft.apply(DraftUpdate::Task(task.to_string()));
    draft.apply(DraftUpdate::Description(format!("{task} details")));
    draft.apply(DraftUpdate::Frequency(frequency));
    draft.apply(DraftUpdate::Behavior(behavior));
    draft.apply(DraftUpdate::WeekDays(days));
    draft.apply(DraftUpdate::TimeRange(TimeRange::Morning));
    draft
}

fn key(s: &str) -> DateKey {
    s.parse().unwrap()
}

// 2026-08-03 is a Monday.

#[test]
fn test_daily_habit_is_always_due() {
    let habit = draft("Walk", Frequency::Daily, Behavior::Good, vec![])
        .build()
        .unwrap();
    for date in ["2026-08-03", "2026-08-04", "2026-12-31", "2027-06-15"] {
        assert!(habit.is_due_on(key(date)), "daily habit not due on {date}");
    }
}

#[test]
fn test_weekly_habit_due_only_on_listed_days() {
    let habit = draft("Gym", Frequency::Weekly, Behavior::Good, vec![Weekday::Mon])
        .build()
        .unwrap();

    // a Tuesday
    assert!(!habit.is_due_on(key("2026-08-04")));
    // the next Monday
    assert!(habit.is_due_on(key("2026-08-10")));
}

#[test]
fn test_toggle_twice_restores_history() {
    let mut habit = draft("Read", Frequency::Daily, Behavior::Good, vec![])
        .build()
        .unwrap();
    let original = habit.completion_history.clone();
    let day = key("2026-08-03");

    habit.toggle_completion(day);
    assert_ne!(habit.completion_history, original);
    habit.toggle_completion(day);
    assert_eq!(habit.completion_history, original);
}

#[test]
fn test_date_key_normalization_is_idempotent() {
    let once: DateKey = "2026-08-03".parse().unwrap();
    let twice: DateKey = once.to_string().parse().unwrap();
    assert_eq!(once, twice);
    assert_eq!(twice.to_string(), "2026-08-03");
}

#[test]
fn test_progress_for_empty_collection_is_zero() {
    assert_eq!(progress_for(&[], Behavior::Good, key("2026-08-03")), 0);
    assert_eq!(progress_for(&[], Behavior::Bad, key("2026-08-03")), 0);
}

#[test]
fn test_progress_stays_in_bounds() {
    let today = key("2026-08-03");
    let mut habits: Vec<Habit> = (0..7)
        .map(|i| {
            draft(&format!("Habit {i}"), Frequency::Daily, Behavior::Good, vec![])
                .build()
                .unwrap()
        })
        .collect();

    for done in 0..=habits.len() {
        for habit in habits.iter_mut().take(done) {
            if !habit.is_completed_on(today) {
                habit.toggle_completion(today);
            }
        }
        let percent = progress_for(&habits, Behavior::Good, today);
        assert!(percent <= 100);
        let expected = (done as f64 / habits.len() as f64 * 100.0).round() as u8;
        assert_eq!(percent, expected);
    }
}

#[test]
fn test_single_good_habit_progress_cycle() {
    let today = key("2026-08-03");
    let mut habit = draft("Read", Frequency::Daily, Behavior::Good, vec![])
        .build()
        .unwrap();

    assert_eq!(
        progress_for(std::slice::from_ref(&habit), Behavior::Good, today),
        0
    );

    habit.toggle_completion(today);
    assert_eq!(
        progress_for(std::slice::from_ref(&habit), Behavior::Good, today),
        100
    );

    habit.toggle_completion(today);
    assert_eq!(
        progress_for(std::slice::from_ref(&habit), Behavior::Good, today),
        0
    );
}

#[test]
fn test_two_due_one_done_is_fifty() {
    let today = key("2026-08-03");
    let mut done = draft("Read", Frequency::Daily, Behavior::Good, vec![])
        .build()
        .unwrap();
    done.toggle_completion(today);
    let open = draft("Walk", Frequency::Daily, Behavior::Good, vec![])
        .build()
        .unwrap();

    assert_eq!(progress_for(&[done, open], Behavior::Good, today), 50);
}

#[test]
fn test_collection_wire_round_trip() {
    let mut weekly = draft(
        "Gym",
        Frequency::Weekly,
        Behavior::Bad,
        vec![Weekday::Mon, Weekday::Thu],
    )
    .build()
    .unwrap();
    weekly.toggle_completion(key("2026-08-03"));
    let daily = draft("Read", Frequency::Daily, Behavior::Good, vec![])
        .build()
        .unwrap();

    let habits = vec![weekly, daily];
    let payload = serde_json::to_string(&habits).unwrap();
    let back: Vec<Habit> = serde_json::from_str(&payload).unwrap();
    assert_eq!(back, habits);

    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value[0]["weekDay"][0], "Monday");
    assert_eq!(value[0]["completionHistory"]["2026-08-03"], true);
}

#[test]
fn test_validation_requires_every_field() {
    assert!(HabitDraft::default().build().is_err());

    let mut missing_days = draft("Gym", Frequency::Weekly, Behavior::Good, vec![]);
    assert!(missing_days.build().is_err());
    missing_days.apply(DraftUpdate::WeekDays(vec![Weekday::Fri]));
    assert!(missing_days.build().is_ok());
}
