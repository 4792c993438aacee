use anyhow::Result;
use owo_colors::OwoColorize;
use scheduler_core::date::format_date;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::models::{parse_task_id, CompletionResult};
use scheduler_core::repository::TaskStore;

use crate::cli::DoCommand;

pub async fn do_task<S: TaskStore>(lifecycle: &TaskLifecycle<S>, command: DoCommand) -> Result<()> {
    let id = parse_task_id(&command.id)?;

    match lifecycle.complete_task(id).await? {
        CompletionResult::Removed(task) => {
            println!("Completed task: '{}'", task.title);
        }
        CompletionResult::Rescheduled { task, previous } => {
            println!("Completed task: '{}' ({})", task.title, format_date(previous));
            println!(
                "Next occurrence: {}",
                format_date(task.date).green()
            );
        }
    }
    Ok(())
}
