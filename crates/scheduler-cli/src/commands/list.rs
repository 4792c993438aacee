use anyhow::Result;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::repository::TaskStore;

use crate::cli::ListCommand;
use crate::views::table::display_tasks;

pub async fn list_tasks<S: TaskStore>(
    lifecycle: &TaskLifecycle<S>,
    command: ListCommand,
) -> Result<()> {
    let tasks = lifecycle.list_tasks(command.limit).await?;
    display_tasks(&tasks, lifecycle.today());
    Ok(())
}
