mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use todo_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TODO_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "todo", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    let file_path = cli.file.unwrap_or_else(|| config.effective_storage_file());
    let mut ctx = CliContext::load(&file_path, &config);

    match cli.command {
        None | Some(Commands::Dashboard) => {
            output::output_success(ctx.dashboard());
        }
        Some(Commands::List(list_cmd)) => {
            handlers::list::handle(&mut ctx, list_cmd.action)?;
        }
        Some(Commands::Task(task_cmd)) => {
            handlers::task::handle(&mut ctx, task_cmd.action)?;
        }
        Some(Commands::Theme(theme_cmd)) => {
            handlers::theme::handle(&mut ctx, theme_cmd.action)?;
        }
        Some(Commands::Watch { list }) => {
            handlers::watch::handle(&mut ctx, list).await?;
        }
        Some(Commands::Completions { .. }) => {}
    }

    Ok(())
}
