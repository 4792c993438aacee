use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{Task, TaskId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod tasks;

/// Keyed task storage.
///
/// Implementations assign ids on insert; ids are unique, stable and ordered
/// by insertion, but carry no other meaning. Mutations addressed at a missing
/// id fail with [`CoreError::NotFound`].
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert(
        &self,
        date: NaiveDate,
        title: &str,
        comment: &str,
        repeat: &str,
    ) -> Result<TaskId, CoreError>;
    async fn get_by_id(&self, id: TaskId) -> Result<Task, CoreError>;
    /// Replaces date, title, comment and repeat of the task with `task.id`.
    async fn update(&self, task: &Task) -> Result<(), CoreError>;
    async fn delete(&self, id: TaskId) -> Result<(), CoreError>;
    /// Tasks ordered by ascending date, then id, at most `limit` of them.
    async fn list(&self, limit: u32) -> Result<Vec<Task>, CoreError>;
}

/// SQLite implementation of [`TaskStore`]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
