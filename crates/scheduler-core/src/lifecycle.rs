//! Task lifecycle: create, edit, complete, delete and list.
//!
//! Every operation validates its input completely before the store is
//! written, so a rejected request never leaves a partial mutation behind.
//!
//! Edit and complete read a task and later write it back without isolation;
//! a concurrent mutation of the same id between those two steps is lost.

use crate::date::{parse_date, Clock, SystemClock};
use crate::error::CoreError;
use crate::models::{
    CompletionResult, NewTaskData, Task, TaskId, UpdateTaskData, DEFAULT_LIST_LIMIT,
    MAX_REPEAT_LEN,
};
use crate::recurrence::next_date;
use crate::repository::TaskStore;
use chrono::NaiveDate;
use std::sync::Arc;

pub struct TaskLifecycle<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: TaskStore> TaskLifecycle<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// A lifecycle whose "today" is the local calendar day.
    pub fn with_system_clock(store: S) -> Self {
        Self::new(store, Arc::new(SystemClock))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Creates a task and returns its id.
    ///
    /// A missing date means today. A date on or before today is moved to
    /// today for one-off tasks, and to the next occurrence after today for
    /// recurring ones.
    pub async fn create_task(&self, data: NewTaskData) -> Result<TaskId, CoreError> {
        require_title(&data.title)?;
        require_repeat_len(&data.repeat)?;

        let today = self.today();
        let mut date = match non_empty(data.date.as_deref()) {
            Some(raw) => parse_date(raw)?,
            None => today,
        };

        if date <= today {
            date = if data.repeat.is_empty() {
                today
            } else {
                next_date(today, date, &data.repeat)?
            };
        } else if !data.repeat.is_empty() {
            // Future dates are kept, but the rule must still be valid.
            next_date(today, date, &data.repeat)?;
        }

        let id = self
            .store
            .insert(date, &data.title, &data.comment, &data.repeat)
            .await?;
        tracing::info!(id, %date, repeat = %data.repeat, "created task");
        Ok(id)
    }

    pub async fn get_task(&self, id: TaskId) -> Result<Task, CoreError> {
        self.store.get_by_id(id).await
    }

    /// Replaces date, title, comment and repeat of an existing task.
    ///
    /// The date is stored as given (today when omitted); a non-empty rule is
    /// checked by evaluating it once against that date.
    pub async fn edit_task(&self, data: UpdateTaskData) -> Result<Task, CoreError> {
        self.store.get_by_id(data.id).await?;

        require_title(&data.title)?;
        require_repeat_len(&data.repeat)?;

        let today = self.today();
        let date = match non_empty(data.date.as_deref()) {
            Some(raw) => parse_date(raw)?,
            None => today,
        };
        if !data.repeat.is_empty() {
            next_date(today, date, &data.repeat)?;
        }

        let task = Task {
            id: data.id,
            date,
            title: data.title,
            comment: data.comment,
            repeat: data.repeat,
        };
        self.store.update(&task).await?;
        tracing::info!(id = task.id, %date, "edited task");
        Ok(task)
    }

    /// Marks a task done: one-off tasks are deleted, recurring tasks move to
    /// their next occurrence after today.
    pub async fn complete_task(&self, id: TaskId) -> Result<CompletionResult, CoreError> {
        let mut task = self.store.get_by_id(id).await?;

        if !task.is_recurring() {
            self.store.delete(id).await?;
            tracing::info!(id, "completed one-off task, removed");
            return Ok(CompletionResult::Removed(task));
        }

        let previous = task.date;
        task.date = next_date(self.today(), previous, &task.repeat)?;
        self.store.update(&task).await?;
        tracing::info!(id, %previous, next = %task.date, "completed recurring task");
        Ok(CompletionResult::Rescheduled { task, previous })
    }

    pub async fn delete_task(&self, id: TaskId) -> Result<(), CoreError> {
        self.store.delete(id).await?;
        tracing::info!(id, "deleted task");
        Ok(())
    }

    /// Tasks in ascending date order. A missing or non-positive limit falls
    /// back to [`DEFAULT_LIST_LIMIT`].
    pub async fn list_tasks(&self, limit: Option<i64>) -> Result<Vec<Task>, CoreError> {
        let limit = limit
            .filter(|l| *l > 0)
            .map_or(DEFAULT_LIST_LIMIT, |l| u32::try_from(l).unwrap_or(u32::MAX));
        self.store.list(limit).await
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn require_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput("Task title is required".to_string()));
    }
    Ok(())
}

fn require_repeat_len(repeat: &str) -> Result<(), CoreError> {
    if repeat.chars().count() > MAX_REPEAT_LEN {
        return Err(CoreError::InvalidInput(format!(
            "Repeat rule is longer than {} characters",
            MAX_REPEAT_LEN
        )));
    }
    Ok(())
}
