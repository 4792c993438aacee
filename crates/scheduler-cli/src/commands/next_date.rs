use anyhow::Result;
use scheduler_core::date::{format_date, parse_date, Clock, SystemClock};
use scheduler_core::error::CoreError;
use scheduler_core::recurrence::next_date;

use crate::cli::NextDateCommand;

/// Prints the next occurrence of a rule. Needs no database.
pub fn print_next_date(command: NextDateCommand) -> Result<()> {
    println!("{}", compute(&command, &SystemClock)?);
    Ok(())
}

fn compute(command: &NextDateCommand, clock: &dyn Clock) -> Result<String, CoreError> {
    let now = match command.now.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => clock.today(),
    };
    let base = parse_date(&command.date)?;
    Ok(format_date(next_date(now, base, &command.repeat)?))
}
