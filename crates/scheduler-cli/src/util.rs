use chrono::NaiveDate;
use chrono_humanize::HumanTime;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::repository::SqliteRepository;

/// The lifecycle wired to the SQLite store, as used by the binary.
pub type Lifecycle = TaskLifecycle<SqliteRepository>;

/// Human description of `date` relative to `today` ("today", "in 3 days", ...).
pub fn describe_due(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "today".to_string()
    } else {
        HumanTime::from(date.signed_duration_since(today)).to_string()
    }
}
