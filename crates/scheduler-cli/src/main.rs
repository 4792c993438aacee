use clap::Parser;
use owo_colors::{OwoColorize, Style};
use scheduler_core::db;
use scheduler_core::error::CoreError;
use scheduler_core::lifecycle::TaskLifecycle;
use scheduler_core::repository::SqliteRepository;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::Config;
use util::Lifecycle;

mod cli;
mod commands;
mod config;
mod server;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve(_)));

    if let Err(e) = run(cli).await {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// takes precedence over the default level.
fn init_tracing(serving: bool) {
    let default = if serving {
        "scheduler=info,scheduler_core=info,tower_http=info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::new()?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Commands::NextDate(command) => commands::next_date::print_next_date(command),
        Commands::Add(command) => commands::add::add_task(&connect(&config).await?, command).await,
        Commands::List(command) => {
            commands::list::list_tasks(&connect(&config).await?, command).await
        }
        Commands::Show(command) => {
            commands::show::show_task(&connect(&config).await?, command).await
        }
        Commands::Edit(command) => {
            commands::edit::edit_task(&connect(&config).await?, command).await
        }
        Commands::Do(command) => commands::r#do::do_task(&connect(&config).await?, command).await,
        Commands::Delete(command) => {
            commands::delete::delete_task(&connect(&config).await?, command).await
        }
        Commands::Serve(command) => {
            let lifecycle = connect(&config).await?;
            commands::serve::serve(lifecycle, config, command).await
        }
    }
}

async fn connect(config: &Config) -> Result<Lifecycle, CoreError> {
    let pool = db::establish_connection(&config.database_path).await?;
    Ok(TaskLifecycle::with_system_clock(SqliteRepository::new(pool)))
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(id) => {
                eprintln!("{} Task with ID '{}' not found.", "Error:".style(error_style), id);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidRule(rule_error) => {
                eprintln!(
                    "{} Invalid repeat rule: {}",
                    "Error:".style(error_style),
                    rule_error.yellow()
                );
            }
            _ => eprintln!("{} {:#}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
