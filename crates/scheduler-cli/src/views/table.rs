use crate::util::describe_due;
use chrono::NaiveDate;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use scheduler_core::date::format_date;
use scheduler_core::models::Task;

pub fn display_tasks(tasks: &[Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Due", "Title", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(task.id));
        row.add_cell(date_cell(task.date, today));
        row.add_cell(Cell::new(describe_due(task.date, today)));

        // Build name with visual indicators
        let mut display_name = String::new();
        if task.is_recurring() {
            display_name.push('↻'); // Recurring symbol
            display_name.push(' ');
        }
        display_name.push_str(&task.title);
        row.add_cell(Cell::new(display_name).add_attribute(Attribute::Bold));

        row.add_cell(Cell::new(if task.repeat.is_empty() {
            "None"
        } else {
            task.repeat.as_str()
        }));
        row.add_cell(Cell::new(&task.comment).fg(Color::DarkGrey));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task_details(task: &Task, today: NaiveDate) {
    let mut table = Table::new();
    table.add_row(vec![Cell::new("ID"), Cell::new(task.id)]);
    table.add_row(vec![Cell::new("Title"), Cell::new(&task.title).add_attribute(Attribute::Bold)]);
    table.add_row(vec![
        Cell::new("Date"),
        Cell::new(format!("{} ({})", format_date(task.date), describe_due(task.date, today))),
    ]);
    table.add_row(vec![
        Cell::new("Repeat"),
        Cell::new(if task.repeat.is_empty() { "None" } else { task.repeat.as_str() }),
    ]);
    table.add_row(vec![
        Cell::new("Comment"),
        Cell::new(if task.comment.is_empty() { "None" } else { task.comment.as_str() }),
    ]);

    println!("{table}");
}

fn date_cell(date: NaiveDate, today: NaiveDate) -> Cell {
    let cell = Cell::new(format_date(date));
    if date < today {
        cell.fg(Color::Red) // Overdue
    } else if date == today {
        cell.fg(Color::Yellow) // Due today
    } else {
        cell
    }
}
