use crate::date::format_date;
use crate::error::CoreError;
use crate::models::{Task, TaskId, TaskRow};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl super::TaskStore for SqliteRepository {
    async fn insert(
        &self,
        date: NaiveDate,
        title: &str,
        comment: &str,
        repeat: &str,
    ) -> Result<TaskId, CoreError> {
        let result = sqlx::query(
            "INSERT INTO scheduler (date, title, comment, repeat) VALUES ($1, $2, $3, $4)",
        )
        .bind(format_date(date))
        .bind(title)
        .bind(comment)
        .bind(repeat)
        .execute(self.pool())
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(id, %date, "inserted task");
        Ok(id)
    }

    async fn get_by_id(&self, id: TaskId) -> Result<Task, CoreError> {
        let row: TaskRow = sqlx::query_as(
            "SELECT id, date, title, comment, repeat FROM scheduler WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        row.try_into()
    }

    async fn update(&self, task: &Task) -> Result<(), CoreError> {
        let result = sqlx::query(
            r#"UPDATE scheduler
            SET date = $1, title = $2, comment = $3, repeat = $4
            WHERE id = $5
            "#,
        )
        .bind(format_date(task.date))
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .bind(task.id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(task.id.to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM scheduler WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list(&self, limit: u32) -> Result<Vec<Task>, CoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, date, title, comment, repeat FROM scheduler ORDER BY date, id LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(Task::try_from).collect()
    }
}
