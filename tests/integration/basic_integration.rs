//! End-to-end tests driving the application state over real stores.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Weekday;
use tempfile::NamedTempFile;

use habit_journal::storage::keys;
use habit_journal::*;

fn key(s: &str) -> DateKey {
    s.parse().unwrap()
}

fn habit_draft(task: &str, frequency: Frequency, behavior: Behavior) -> HabitDraft {
    let mut draft = HabitDraft::default();
    draft.apply(DraftUpdate::Task(task.to_string()));
    draft.apply(DraftUpdate::Description(format!("{task} details")));
    draft.apply(DraftUpdate::Frequency(frequency));
    draft.apply(DraftUpdate::Behavior(behavior));
    draft.apply(DraftUpdate::TimeRange(TimeRange::Morning));
    if frequency == Frequency::Weekly {
        draft.apply(DraftUpdate::WeekDays(vec![Weekday::Mon]));
    }
    draft
}

async fn signed_up_app(storage: Arc<MemoryStore>) -> App {
    let mut app = App::new(storage).await.expect("app should load");
    let mut draft = UserDraft {
        username: "maya".to_string(),
        email: "maya@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    app.sign_up(&mut draft).await.expect("sign up should work");
    app
}

#[tokio::test]
async fn test_full_workflow_survives_reload() {
    let storage = Arc::new(MemoryStore::new());
    let today = key("2026-08-03");

    {
        let mut app = signed_up_app(Arc::clone(&storage)).await;
        let mut draft = habit_draft("Read", Frequency::Daily, Behavior::Good);
        let id = app
            .habits_mut()
            .unwrap()
            .add_habit(&mut draft)
            .await
            .unwrap();
        app.habits_mut()
            .unwrap()
            .toggle_completion(id, today)
            .await
            .unwrap();
        assert_eq!(
            app.habits().unwrap().progress_for(Behavior::Good, today),
            100
        );
    }

    // A fresh process over the same storage resumes the session and the
    // collection.
    let app = App::new(storage).await.unwrap();
    assert!(app.users().is_logged_in());
    let habits = app.habits().unwrap();
    assert_eq!(habits.habits().len(), 1);
    assert_eq!(habits.progress_for(Behavior::Good, today), 100);
}

#[tokio::test]
async fn test_toggle_round_trip_returns_to_zero() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = signed_up_app(storage).await;
    let today = key("2026-08-03");

    let mut draft = habit_draft("Read", Frequency::Daily, Behavior::Good);
    let id = app
        .habits_mut()
        .unwrap()
        .add_habit(&mut draft)
        .await
        .unwrap();

    let habits = app.habits_mut().unwrap();
    assert_eq!(habits.toggle_completion(id, today).await.unwrap(), Some(true));
    assert_eq!(habits.progress_for(Behavior::Good, today), 100);
    assert_eq!(
        habits.toggle_completion(id, today).await.unwrap(),
        Some(false)
    );
    assert_eq!(habits.progress_for(Behavior::Good, today), 0);
}

#[tokio::test]
async fn test_invalid_draft_changes_nothing() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = signed_up_app(Arc::clone(&storage)).await;
    let user_id = app.users().current_user().unwrap().id;

    let mut draft = habit_draft("", Frequency::Daily, Behavior::Good);
    let result = app.habits_mut().unwrap().add_habit(&mut draft).await;

    assert!(result.is_err());
    assert!(app.habits().unwrap().habits().is_empty());
    // nothing was written for this user
    assert_eq!(storage.get(&keys::habits(&user_id)).await.unwrap(), None);
    // the form keeps its state so the user can fix it
    assert_eq!(draft.description, " details");
}

#[tokio::test]
async fn test_delete_unknown_id_is_a_no_op() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = signed_up_app(storage).await;

    let mut draft = habit_draft("Read", Frequency::Daily, Behavior::Good);
    app.habits_mut()
        .unwrap()
        .add_habit(&mut draft)
        .await
        .unwrap();

    let habits = app.habits_mut().unwrap();
    habits.delete_habit(HabitId::new()).await.unwrap();
    assert_eq!(habits.habits().len(), 1);

    let id = habits.habits()[0].id;
    habits.delete_habit(id).await.unwrap();
    assert!(habits.habits().is_empty());
}

#[tokio::test]
async fn test_edit_overwrites_given_fields_only() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = signed_up_app(storage).await;

    let mut draft = habit_draft("Read", Frequency::Daily, Behavior::Good);
    let id = app
        .habits_mut()
        .unwrap()
        .add_habit(&mut draft)
        .await
        .unwrap();

    let habits = app.habits_mut().unwrap();
    habits
        .edit_habit(
            id,
            HabitPatch {
                task: Some("Read fiction".to_string()),
                time_range: Some(TimeRange::Night),
                ..HabitPatch::default()
            },
        )
        .await
        .unwrap();

    let habit = habits.get(id).unwrap();
    assert_eq!(habit.task, "Read fiction");
    assert_eq!(habit.time_range, TimeRange::Night);
    assert_eq!(habit.description, "Read details");

    // editing an unknown id changes nothing
    habits
        .edit_habit(HabitId::new(), HabitPatch::default())
        .await
        .unwrap();
    assert_eq!(habits.habits().len(), 1);
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = signed_up_app(storage).await;
    app.sign_out().await.unwrap();

    let mut draft = UserDraft {
        username: "other".to_string(),
        email: "maya@example.com".to_string(),
        password: "secret".to_string(),
    };
    let result = app.sign_up(&mut draft).await;
    assert!(matches!(
        result,
        Err(AppError::Store(StoreError::UserExists { .. }))
    ));
    assert_eq!(app.users().users().len(), 1);
}

#[tokio::test]
async fn test_sign_in_checks_credentials() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = signed_up_app(storage).await;
    app.sign_out().await.unwrap();
    assert!(!app.users().is_logged_in());
    assert!(app.habits().is_err());

    let result = app.sign_in("maya", "wrong").await;
    assert!(matches!(
        result,
        Err(AppError::Store(StoreError::InvalidCredentials))
    ));
    assert!(!app.users().is_logged_in());

    app.sign_in("maya", "hunter2").await.unwrap();
    assert!(app.users().is_logged_in());
    assert!(app.habits().is_ok());
}

#[tokio::test]
async fn test_sign_out_keeps_persisted_habits() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = signed_up_app(Arc::clone(&storage)).await;

    let mut draft = habit_draft("Read", Frequency::Daily, Behavior::Good);
    app.habits_mut()
        .unwrap()
        .add_habit(&mut draft)
        .await
        .unwrap();
    app.sign_out().await.unwrap();
    assert!(app.habits().is_err());

    app.sign_in("maya", "hunter2").await.unwrap();
    assert_eq!(app.habits().unwrap().habits().len(), 1);
}

#[tokio::test]
async fn test_theme_preference_round_trip() {
    let storage = Arc::new(MemoryStore::new());

    {
        let mut app = App::new(Arc::clone(&storage)).await.unwrap();
        assert!(!app.theme().is_dark_mode());
        assert!(app.theme_mut().toggle().await.unwrap());
    }

    let app = App::new(storage).await.unwrap();
    assert!(app.theme().is_dark_mode());
}

#[tokio::test]
async fn test_sqlite_backed_journal_survives_reopen() {
    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = temp_file.path().to_path_buf();
    let today = key("2026-08-03");

    {
        let storage = Arc::new(SqliteStore::new(db_path.clone()).unwrap());
        let mut app = App::new(storage).await.unwrap();
        let mut user = UserDraft {
            username: "maya".to_string(),
            email: "maya@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        app.sign_up(&mut user).await.unwrap();

        let mut draft = habit_draft("Gym", Frequency::Weekly, Behavior::Good);
        let id = app
            .habits_mut()
            .unwrap()
            .add_habit(&mut draft)
            .await
            .unwrap();
        app.habits_mut()
            .unwrap()
            .toggle_completion(id, today)
            .await
            .unwrap();
    }

    let storage = Arc::new(SqliteStore::new(db_path).unwrap());
    let app = App::new(storage).await.unwrap();
    assert!(app.users().is_logged_in());
    let habits = app.habits().unwrap();
    assert_eq!(habits.habits().len(), 1);
    assert!(habits.habits()[0].is_completed_on(today));
    assert_eq!(habits.habits()[0].week_day, vec![Weekday::Mon]);
}

/// Store whose writes can be switched off, for exercising the
/// persistence-failure posture.
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_writes: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("write rejected".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

#[tokio::test]
async fn test_persistence_failure_is_surfaced_but_memory_wins() {
    let storage = Arc::new(FlakyStore::new());
    let mut app = App::new(Arc::clone(&storage) as Arc<dyn KeyValueStore>)
        .await
        .unwrap();
    let mut user = UserDraft {
        username: "maya".to_string(),
        email: "maya@example.com".to_string(),
        password: "hunter2".to_string(),
    };
    app.sign_up(&mut user).await.unwrap();
    let mut draft = habit_draft("Read", Frequency::Daily, Behavior::Good);
    let id = app
        .habits_mut()
        .unwrap()
        .add_habit(&mut draft)
        .await
        .unwrap();

    storage.fail_writes.store(true, Ordering::SeqCst);

    let today = key("2026-08-03");
    let result = app.habits_mut().unwrap().toggle_completion(id, today).await;
    assert!(matches!(
        result,
        Err(StoreError::Storage(StorageError::Backend(_)))
    ));
    // the in-memory state moved ahead of durable state
    assert!(app.habits().unwrap().get(id).unwrap().is_completed_on(today));

    storage.fail_writes.store(false, Ordering::SeqCst);
    app.habits_mut()
        .unwrap()
        .toggle_completion(id, today)
        .await
        .unwrap();
    assert!(!app.habits().unwrap().get(id).unwrap().is_completed_on(today));
}
