//! CLI 模块

pub mod init;
pub mod oneshot;
pub mod shell;

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tudu")]
#[command(version)]
#[command(about = "Interactive to-do list manager")]
pub struct Cli {
    /// Task file (defaults to storage.path from the config, then ~/.tudu/tasks.json)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,
    /// Config file (defaults to ~/.tudu/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive shell (default)
    Shell,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    #[command(flatten)]
    Task(TaskCommand),
}

/// Verbs that operate on a task list, shared by the shell and one-shot runs
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TaskCommand {
    /// Add a task. Usage: add [--due DATE] [--priority N] <description...>
    Add {
        /// Due date, YYYY-MM-DD or RFC 3339 (defaults to now + defaults.due_in_days)
        #[arg(short, long, value_parser = parse_due)]
        due: Option<DateTime<Utc>>,
        /// Priority (defaults to defaults.priority)
        #[arg(short, long, allow_hyphen_values = true)]
        priority: Option<i64>,
        /// Task description
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        description: Vec<String>,
    },
    /// Remove a task by number
    #[command(visible_alias = "rm")]
    Remove {
        /// Task number, as shown by `list`
        position: usize,
    },
    /// Mark a task as completed
    #[command(visible_alias = "done")]
    Complete {
        /// Task number, as shown by `list`
        position: usize,
    },
    /// Move a task to a new position
    #[command(visible_alias = "mv")]
    Prioritize {
        /// Current task number
        position: usize,
        /// Target task number (the last number moves the task to the end)
        new_position: usize,
    },
    /// List all tasks
    #[command(visible_alias = "ls")]
    List {
        /// Hide completed tasks
        #[arg(long)]
        pending: bool,
    },
    /// Remove every task
    Clear,
    /// Show the number of tasks
    Count,
    /// Save tasks to a file (defaults to the task file)
    Save { path: Option<PathBuf> },
    /// Load tasks from a file, replacing the current list (defaults to the task file)
    Load { path: Option<PathBuf> },
}

/// 解析截止时间: `YYYY-MM-DD`（UTC 零点）或 RFC 3339
pub fn parse_due(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("expected YYYY-MM-DD or an RFC 3339 timestamp, got '{}'", value))
}
