//! Task commands shared between the interactive shell and one-shot runs
//!
//! The dispatcher turns a parsed [`TaskCommand`] into calls on a caller-owned
//! [`TaskStore`] and reports what happened as an [`Outcome`]. It never prints;
//! rendering the message (or the error) is the caller's job.
//!
//! ```text
//! shell (src/cli/shell.rs)     ──┐
//!                                ├──> operations::tasks::execute ──> storage::tasks::TaskStore
//! one-shot (src/cli/oneshot.rs) ─┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};

use crate::cli::TaskCommand;
use crate::error::{Result, TodoError};
use crate::storage::config::DefaultsConfig;
use crate::storage::tasks::{Task, TaskStore};

/// Per-run settings the dispatcher needs besides the store
#[derive(Debug, Clone)]
pub struct Session {
    /// File used by `save` / `load` without an explicit path
    pub tasks_path: PathBuf,
    /// Defaults for `add`
    pub defaults: DefaultsConfig,
}

/// Result of a dispatched command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Human-readable report for the caller to display
    pub message: String,
    /// Whether the in-memory list was modified
    pub changed: bool,
}

impl Outcome {
    fn changed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: true,
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            changed: false,
        }
    }
}

/// Run one command against the store
///
/// `now` anchors the default due date of `add`.
pub fn execute(
    store: &mut TaskStore,
    command: TaskCommand,
    session: &Session,
    now: DateTime<Utc>,
) -> Result<Outcome> {
    match command {
        TaskCommand::Add {
            due,
            priority,
            description,
        } => {
            let due = match due {
                Some(due) => due,
                None => default_due(now, session.defaults.due_in_days)?,
            };
            let priority = priority.unwrap_or(session.defaults.priority);
            store.add(Task::new(description.join(" "), due, priority));
            Ok(Outcome::changed(format!("Task added (#{}).", store.count())))
        }
        TaskCommand::Remove { position } => {
            let task = store.remove(position)?;
            Ok(Outcome::changed(format!(
                "Removed #{}: {}",
                position, task.description
            )))
        }
        TaskCommand::Complete { position } => {
            store.complete(position)?;
            let task = store.get(position)?;
            Ok(Outcome::changed(format!(
                "Completed #{}: {}",
                position, task.description
            )))
        }
        TaskCommand::Prioritize {
            position,
            new_position,
        } => {
            store.prioritize(position, new_position)?;
            Ok(Outcome::changed(format!(
                "Moved #{} to #{}.",
                position, new_position
            )))
        }
        TaskCommand::List { pending } => Ok(Outcome::unchanged(render_list(store, pending))),
        TaskCommand::Clear => {
            let removed = store.count();
            store.clear();
            Ok(Outcome::changed(format!("Cleared {} task(s).", removed)))
        }
        TaskCommand::Count => Ok(Outcome::unchanged(format!("{} task(s)", store.count()))),
        TaskCommand::Save { path } => {
            let path = resolve_path(path.as_deref(), session);
            store.save(path)?;
            Ok(Outcome::unchanged(format!(
                "Saved {} task(s) to {}",
                store.count(),
                path.display()
            )))
        }
        TaskCommand::Load { path } => {
            let path = resolve_path(path.as_deref(), session);
            store.load(path)?;
            Ok(Outcome::changed(format!(
                "Loaded {} task(s) from {}",
                store.count(),
                path.display()
            )))
        }
    }
}

/// `now + days`; out-of-range values come from the config, not the user
fn default_due(now: DateTime<Utc>, days: i64) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| TodoError::Config(format!("defaults.due_in_days out of range: {}", days)))
}

fn resolve_path<'a>(path: Option<&'a Path>, session: &'a Session) -> &'a Path {
    path.unwrap_or(session.tasks_path.as_path())
}

/// Numbered listing; hidden completed tasks keep their numbers
pub fn render_list(store: &TaskStore, pending_only: bool) -> String {
    let lines: Vec<String> = store
        .list()
        .iter()
        .enumerate()
        .filter(|(_, task)| !(pending_only && task.completed))
        .map(|(i, task)| format_task(i + 1, task))
        .collect();

    if store.is_empty() {
        "No tasks.".to_string()
    } else if lines.is_empty() {
        "No pending tasks.".to_string()
    } else {
        lines.join("\n")
    }
}

fn format_task(position: usize, task: &Task) -> String {
    format!(
        "{}. [{}] {} (due {}, priority {})",
        position,
        if task.completed { "x" } else { " " },
        task.description,
        task.due_date.format("%Y-%m-%d %H:%M"),
        task.priority
    )
}
