use anyhow::Result;
use dialoguer::Confirm;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::models::parse_task_id;
use scheduler_core::repository::TaskStore;

use crate::cli::DeleteCommand;

pub async fn delete_task<S: TaskStore>(
    lifecycle: &TaskLifecycle<S>,
    command: DeleteCommand,
) -> Result<()> {
    let id = parse_task_id(&command.id)?;
    let task = lifecycle.get_task(id).await?;

    if !command.force {
        let confirmation = Confirm::new()
            .with_prompt(format!(
                "Are you sure you want to delete task '{}'?",
                task.title
            ))
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    lifecycle.delete_task(id).await?;
    println!("Deleted task: '{}'", task.title);
    Ok(())
}
