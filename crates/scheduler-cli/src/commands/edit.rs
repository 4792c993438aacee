use anyhow::Result;
use scheduler_core::date::format_date;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::models::{parse_task_id, Task, UpdateTaskData};
use scheduler_core::repository::TaskStore;

use crate::cli::EditCommand;

pub async fn edit_task<S: TaskStore>(
    lifecycle: &TaskLifecycle<S>,
    command: EditCommand,
) -> Result<()> {
    let id = parse_task_id(&command.id)?;
    let current = lifecycle.get_task(id).await?;

    let update = merge_update(&current, command);
    let task = lifecycle.edit_task(update).await?;
    println!("Updated task {}: '{}'", task.id, task.title);
    Ok(())
}

/// Builds a full replacement record, keeping the stored value of every
/// field the user did not mention.
fn merge_update(current: &Task, command: EditCommand) -> UpdateTaskData {
    let comment = if command.comment_clear {
        String::new()
    } else {
        command.comment.unwrap_or_else(|| current.comment.clone())
    };
    let repeat = if command.repeat_clear {
        String::new()
    } else {
        command.repeat.unwrap_or_else(|| current.repeat.clone())
    };

    UpdateTaskData {
        id: current.id,
        date: Some(command.date.unwrap_or_else(|| format_date(current.date))),
        title: command.title.unwrap_or_else(|| current.title.clone()),
        comment,
        repeat,
    }
}
