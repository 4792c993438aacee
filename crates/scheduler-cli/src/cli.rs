use clap::{Parser, Subcommand};

/// A personal task scheduler with compact repeat rules
///
/// Repeat rules: `d <N>` every N days, `y` yearly, `w <1..7,...>` on weekdays
/// (1 = Monday), `m <days> [months]` on days of month (-1 last, -2 penultimate).
#[derive(Parser, Debug)]
#[command(name = "scheduler", author, version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides TODO_DBFILE and scheduler.toml)
    #[clap(long, global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new task
    Add(AddCommand),
    /// List upcoming tasks
    List(ListCommand),
    /// Show a single task
    Show(ShowCommand),
    /// Edit a task
    Edit(EditCommand),
    /// Mark a task as done (one-off tasks are removed, recurring ones move on)
    #[command(alias = "done")]
    Do(DoCommand),
    /// Delete a task
    Delete(DeleteCommand),
    /// Compute the next date of a repeat rule
    NextDate(NextDateCommand),
    /// Run the HTTP API and serve the web front-end
    Serve(ServeCommand),
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the task
    pub title: String,
    /// The date of the task (YYYYMMDD, defaults to today)
    #[clap(short, long)]
    pub date: Option<String>,
    /// A free-text comment
    #[clap(short, long, default_value = "")]
    pub comment: String,
    /// The repeat rule of the task (e.g. "d 7", "w 1,3,5", "m -1")
    #[clap(short, long, default_value = "")]
    pub repeat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Maximum number of tasks to show
    #[clap(short, long)]
    pub limit: Option<i64>,
}

#[derive(Parser, Debug, Clone)]
pub struct ShowCommand {
    /// The ID of the task to show
    pub id: String,
}

/// Flags that are omitted keep the task's current value.
#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the task to edit
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    /// New date (YYYYMMDD)
    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub comment: Option<String>,
    #[arg(long, conflicts_with = "comment")]
    pub comment_clear: bool,

    #[arg(long, help = "Update repeat rule")]
    pub repeat: Option<String>,
    #[arg(long, conflicts_with = "repeat", help = "Remove repeat rule (convert to one-off task)")]
    pub repeat_clear: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DoCommand {
    /// The ID of the task to mark as done
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the task to delete
    pub id: String,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct NextDateCommand {
    /// Reference date (YYYYMMDD, defaults to today)
    #[clap(long)]
    pub now: Option<String>,
    /// Anchor date the rule is evaluated from (YYYYMMDD)
    #[clap(long)]
    pub date: String,
    /// The repeat rule
    #[clap(long)]
    pub repeat: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeCommand {
    /// Port to listen on (overrides TODO_PORT)
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Address to bind to
    #[clap(long)]
    pub bind: Option<String>,
    /// Directory of static front-end files
    #[clap(long)]
    pub web_dir: Option<std::path::PathBuf>,
}
