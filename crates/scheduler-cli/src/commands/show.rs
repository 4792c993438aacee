use anyhow::Result;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::models::parse_task_id;
use scheduler_core::repository::TaskStore;

use crate::cli::ShowCommand;
use crate::views::table::display_task_details;

pub async fn show_task<S: TaskStore>(
    lifecycle: &TaskLifecycle<S>,
    command: ShowCommand,
) -> Result<()> {
    let id = parse_task_id(&command.id)?;
    let task = lifecycle.get_task(id).await?;
    display_task_details(&task, lifecycle.today());
    Ok(())
}
