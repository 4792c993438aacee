use chrono::{Days, NaiveDate};
use scheduler_core::date::FixedClock;
use scheduler_core::db::establish_connection;
use scheduler_core::error::{CoreError, ErrorKind};
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::models::{CompletionResult, NewTaskData, UpdateTaskData};
use scheduler_core::recurrence::RuleError;
use scheduler_core::repository::{SqliteRepository, TaskStore};
use std::sync::Arc;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 26).unwrap()
}

fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y%m%d").unwrap()
}

/// Helper function to create a lifecycle over a fresh on-disk database
async fn setup_test_db() -> (TaskLifecycle<SqliteRepository>, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");

    let pool = establish_connection(&db_path.to_string_lossy())
        .await
        .expect("Failed to establish test database connection");

    let lifecycle = TaskLifecycle::new(SqliteRepository::new(pool), Arc::new(FixedClock(today())));
    (lifecycle, temp_dir)
}

fn new_task(date: Option<&str>, title: &str, repeat: &str) -> NewTaskData {
    NewTaskData {
        date: date.map(str::to_string),
        title: title.to_string(),
        comment: format!("comment for {}", title),
        repeat: repeat.to_string(),
    }
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let (lifecycle, _temp_dir) = setup_test_db().await;

    let id = lifecycle
        .create_task(new_task(Some("20240301"), "Dentist", "y"))
        .await
        .unwrap();
    let task = lifecycle.get_task(id).await.unwrap();

    assert_eq!(task.id, id);
    assert_eq!(task.date, date("20240301"));
    assert_eq!(task.title, "Dentist");
    assert_eq!(task.comment, "comment for Dentist");
    assert_eq!(task.repeat, "y");
    assert!(task.date >= today());
}

#[tokio::test]
async fn test_create_date_normalization() {
    let (lifecycle, _temp_dir) = setup_test_db().await;

    let cases = [
        (None, "", today()),
        (Some(""), "", today()),
        (Some("20240101"), "", today()),
        (Some("20240126"), "", today()),
        (Some("20240120"), "d 3", date("20240129")),
        // A date equal to today is advanced when a rule is present.
        (Some("20240126"), "d 1", date("20240127")),
        (Some("20240210"), "d 5", date("20240210")),
    ];

    for (raw_date, repeat, expected) in cases {
        let id = lifecycle
            .create_task(new_task(raw_date, "Task", repeat))
            .await
            .unwrap();
        let task = lifecycle.get_task(id).await.unwrap();
        assert_eq!(task.date, expected, "date {:?} with rule '{}'", raw_date, repeat);
        assert!(task.date >= today());
    }
}

#[tokio::test]
async fn test_create_rejects_invalid_input_without_writing() {
    let (lifecycle, _temp_dir) = setup_test_db().await;

    let result = lifecycle.create_task(new_task(None, "", "")).await;
    assert!(matches!(result, Err(CoreError::InvalidInput(_))));

    let result = lifecycle.create_task(new_task(Some("2024-01-01"), "Task", "")).await;
    assert!(matches!(result, Err(CoreError::InvalidInput(_))));

    let result = lifecycle.create_task(new_task(Some("20240101"), "Task", "d 401")).await;
    assert!(matches!(
        result,
        Err(CoreError::InvalidRule(RuleError::IntervalOutOfRange(401)))
    ));

    // Future date: the rule is still validated.
    let result = lifecycle.create_task(new_task(Some("20250101"), "Task", "x")).await;
    assert!(matches!(result, Err(CoreError::InvalidRule(RuleError::UnknownKind(_)))));

    let long_rule = "w ".to_string() + &"1,".repeat(70);
    let result = lifecycle.create_task(new_task(None, "Task", &long_rule)).await;
    assert!(matches!(result, Err(CoreError::InvalidInput(_))));

    assert!(lifecycle.list_tasks(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_one_off_task_removes_it() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle.create_task(new_task(None, "Call mom", "")).await.unwrap();

    let result = lifecycle.complete_task(id).await.unwrap();
    assert!(matches!(result, CompletionResult::Removed(ref task) if task.id == id));

    assert!(matches!(lifecycle.get_task(id).await, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_complete_recurring_task_advances_date_only() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle
        .store()
        .insert(today(), "Water plants", "balcony", "d 3")
        .await
        .unwrap();

    let result = lifecycle.complete_task(id).await.unwrap();
    match result {
        CompletionResult::Rescheduled { task, previous } => {
            assert_eq!(previous, today());
            assert_eq!(task.date, today().checked_add_days(Days::new(3)).unwrap());
        }
        other => panic!("Expected a rescheduled task, got {:?}", other),
    }

    let stored = lifecycle.get_task(id).await.unwrap();
    assert_eq!(stored.date, date("20240129"));
    assert_eq!(stored.title, "Water plants");
    assert_eq!(stored.comment, "balcony");
    assert_eq!(stored.repeat, "d 3");
}

#[tokio::test]
async fn test_complete_with_malformed_stored_rule_is_surfaced() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle
        .store()
        .insert(today(), "Broken", "", "q 1")
        .await
        .unwrap();

    let result = lifecycle.complete_task(id).await;
    assert!(matches!(result, Err(CoreError::InvalidRule(_))));
    assert_eq!(lifecycle.get_task(id).await.unwrap().date, today());
}

#[tokio::test]
async fn test_corrupt_stored_date_is_a_storage_error() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let db_path = temp_dir.path().join("test.db");
    let pool = establish_connection(&db_path.to_string_lossy()).await.unwrap();

    sqlx::query("INSERT INTO scheduler (date, title, comment, repeat) VALUES ($1, $2, '', '')")
        .bind("2024-01-01")
        .bind("x")
        .execute(&pool)
        .await
        .unwrap();

    let lifecycle =
        TaskLifecycle::new(SqliteRepository::new(pool), Arc::new(FixedClock(today())));

    let err = lifecycle.list_tasks(None).await.unwrap_err();
    assert!(matches!(err, CoreError::Corrupt(_)));
    assert_eq!(err.kind(), ErrorKind::Storage);

    let err = lifecycle.get_task(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Storage);
}

#[tokio::test]
async fn test_complete_missing_task() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    assert!(matches!(lifecycle.complete_task(404).await, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_edit_replaces_all_fields() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle
        .create_task(new_task(Some("20240301"), "Gym", "w 1,3,5"))
        .await
        .unwrap();

    let edited = lifecycle
        .edit_task(UpdateTaskData {
            id,
            date: Some("20240110".to_string()),
            title: "Swimming".to_string(),
            comment: String::new(),
            repeat: String::new(),
        })
        .await
        .unwrap();

    // Edit stores the date as given, even in the past.
    assert_eq!(edited.date, date("20240110"));
    assert_eq!(lifecycle.get_task(id).await.unwrap(), edited);
}

#[tokio::test]
async fn test_edit_without_date_defaults_to_today() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle
        .create_task(new_task(Some("20240301"), "Gym", ""))
        .await
        .unwrap();

    let edited = lifecycle
        .edit_task(UpdateTaskData {
            id,
            date: None,
            title: "Gym".to_string(),
            comment: String::new(),
            repeat: "d 2".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(edited.date, today());
}

#[tokio::test]
async fn test_edit_with_invalid_rule_leaves_record_untouched() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle
        .create_task(new_task(Some("20240301"), "Rent", "m 1"))
        .await
        .unwrap();
    let before = lifecycle.get_task(id).await.unwrap();

    let result = lifecycle
        .edit_task(UpdateTaskData {
            id,
            date: Some("20240401".to_string()),
            title: "Rent (new flat)".to_string(),
            comment: "changed".to_string(),
            repeat: "m 40".to_string(),
        })
        .await;

    assert!(matches!(
        result,
        Err(CoreError::InvalidRule(RuleError::DayOutOfRange(40)))
    ));
    assert_eq!(lifecycle.get_task(id).await.unwrap(), before);
}

#[tokio::test]
async fn test_edit_validation_errors() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle.create_task(new_task(None, "Task", "")).await.unwrap();

    let missing = lifecycle
        .edit_task(UpdateTaskData {
            id: id + 100,
            title: "Task".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(missing, Err(CoreError::NotFound(_))));

    let empty_title = lifecycle
        .edit_task(UpdateTaskData {
            id,
            title: "  ".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(empty_title, Err(CoreError::InvalidInput(_))));

    let bad_date = lifecycle
        .edit_task(UpdateTaskData {
            id,
            date: Some("20240230".to_string()),
            title: "Task".to_string(),
            ..Default::default()
        })
        .await;
    assert!(matches!(bad_date, Err(CoreError::InvalidInput(_))));
}

#[tokio::test]
async fn test_delete_task() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let id = lifecycle.create_task(new_task(None, "Temp", "d 1")).await.unwrap();

    lifecycle.delete_task(id).await.unwrap();
    assert!(matches!(lifecycle.get_task(id).await, Err(CoreError::NotFound(_))));
    assert!(matches!(lifecycle.delete_task(id).await, Err(CoreError::NotFound(_))));
}

#[tokio::test]
async fn test_list_orders_and_limits() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    let store = lifecycle.store();
    store.insert(date("20240103"), "third", "", "").await.unwrap();
    store.insert(date("20240101"), "first", "", "").await.unwrap();
    store.insert(date("20240102"), "second", "", "").await.unwrap();

    let tasks = lifecycle.list_tasks(Some(2)).await.unwrap();
    let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);

    for limit in [None, Some(0), Some(-5)] {
        assert_eq!(lifecycle.list_tasks(limit).await.unwrap().len(), 3);
    }
}

#[tokio::test]
async fn test_list_default_limit_is_fifty() {
    let (lifecycle, _temp_dir) = setup_test_db().await;
    for n in 0..55 {
        lifecycle
            .store()
            .insert(today(), &format!("task {}", n), "", "")
            .await
            .unwrap();
    }

    assert_eq!(lifecycle.list_tasks(None).await.unwrap().len(), 50);
    assert_eq!(lifecycle.list_tasks(Some(55)).await.unwrap().len(), 55);
}
