use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use todo_domain::MoveDirection;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT_HASH"), ")");

#[derive(Parser)]
#[command(name = "todo")]
#[command(about = "Named to-do lists kept in a local storage file", long_about = None)]
#[command(version = VERSION, arg_required_else_help = false)]
pub struct Cli {
    /// Path to the storage file (or set TODO_FILE env var)
    #[arg(long, short, value_name = "FILE", env = "TODO_FILE", global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every list with its completion summary
    Dashboard,
    /// List operations
    List(ListCommand),
    /// Task operations
    Task(TaskCommand),
    /// Colour theme preference
    Theme(ThemeCommand),
    /// Print the view again whenever another instance changes the storage file
    Watch {
        /// Watch one list instead of the dashboard
        #[arg(long)]
        list: Option<String>,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// List commands
#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a new list
    Create {
        #[arg(long)]
        name: String,
    },
    /// List all lists
    #[command(visible_alias = "ls")]
    List,
    /// Get a specific list with its tasks
    Get {
        #[arg(long)]
        id: String,
    },
    /// Show the detail view of a list
    Show {
        #[arg(long)]
        id: String,
    },
    /// Rename a list
    Rename {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
    },
    /// Delete a list and all of its tasks
    Delete {
        #[arg(long)]
        id: String,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task to the end of a list
    Add {
        #[arg(long)]
        list: String,
        #[arg(long)]
        text: String,
    },
    /// List the tasks of a list in order
    #[command(visible_alias = "ls")]
    List {
        #[arg(long)]
        list: String,
    },
    /// Flip a task between open and completed
    Toggle {
        #[arg(long)]
        list: String,
        #[arg(long)]
        id: String,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        list: String,
        #[arg(long)]
        id: String,
    },
    /// Move the task at one position to another
    Reorder {
        #[arg(long)]
        list: String,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Move a task one position up or down
    Move {
        #[arg(long)]
        list: String,
        #[arg(long)]
        id: String,
        #[arg(long, value_enum)]
        direction: DirectionArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DirectionArg {
    Up,
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}

// Theme commands
#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub action: ThemeAction,
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Show the current theme
    Get,
    /// Set the theme to light or dark
    Set { theme: String },
    /// Switch between light and dark
    Toggle,
}
