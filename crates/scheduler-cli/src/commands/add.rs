use anyhow::Result;
use owo_colors::OwoColorize;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::models::NewTaskData;
use scheduler_core::repository::TaskStore;

use crate::cli::AddCommand;
use crate::util::describe_due;

pub async fn add_task<S: TaskStore>(
    lifecycle: &TaskLifecycle<S>,
    command: AddCommand,
) -> Result<()> {
    let new_task_data = NewTaskData {
        date: command.date,
        title: command.title,
        comment: command.comment,
        repeat: command.repeat,
    };

    let id = lifecycle.create_task(new_task_data).await?;
    let task = lifecycle.get_task(id).await?;

    println!(
        "Added task {}: '{}' due {}",
        task.id.to_string().cyan(),
        task.title,
        describe_due(task.date, lifecycle.today())
    );
    if task.is_recurring() {
        println!("  Repeats: {}", task.repeat);
    }
    Ok(())
}
