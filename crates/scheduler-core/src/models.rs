use crate::date::{self, DATE_FORMAT};
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use sqlx::FromRow;

/// Store-assigned task identifier.
pub type TaskId = i64;

/// Longest accepted repeat rule, mirrored by a CHECK constraint in the schema.
pub const MAX_REPEAT_LEN: usize = 128;

/// Number of tasks returned by a listing when no usable limit is given.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Rendered as a decimal string on the wire.
    #[serde_as(as = "DisplayFromStr")]
    pub id: TaskId,
    #[serde(with = "date::compact")]
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub comment: String,
    /// Empty for one-off tasks.
    #[serde(default)]
    pub repeat: String,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}

/// Raw row of the `scheduler` table; dates are kept in canonical text form.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TaskRow {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = CoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT).map_err(|_| {
            CoreError::Corrupt(format!(
                "task {} has a malformed date '{}'",
                row.id, row.date
            ))
        })?;
        Ok(Task {
            id: row.id,
            date,
            title: row.title,
            comment: row.comment,
            repeat: row.repeat,
        })
    }
}

/// User input for creating a task. An empty or missing `date` means today.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTaskData {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

/// User input for replacing every editable field of an existing task.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub id: TaskId,
    pub date: Option<String>,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// A one-off task was completed and removed from the store.
    Removed(Task),
    /// A recurring task was moved to its next occurrence.
    Rescheduled { task: Task, previous: NaiveDate },
}

/// Parses a wire identifier into a [`TaskId`].
pub fn parse_task_id(raw: &str) -> Result<TaskId, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::InvalidInput("Task id is required".to_string()));
    }
    raw.parse::<TaskId>()
        .map_err(|_| CoreError::InvalidInput(format!("Task id '{}' is not a number", raw)))
}
