//! 交互式 shell（read-eval-print loop）

use std::io::{self, BufRead, Write};

use chrono::Utc;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use super::TaskCommand;
use crate::operations::tasks::{self, Session};
use crate::storage::config::StorageConfig;
use crate::storage::tasks::TaskStore;

const PROMPT: &str = "tudu> ";

/// 一行 shell 输入
#[derive(Parser)]
#[command(name = "tudu", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Task(TaskCommand),
    /// Leave the shell
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

/// 启动交互式 shell，读写 stdin / stdout / stderr
pub fn run(session: &Session, storage: &StorageConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    run_session(session, storage, stdin.lock(), &mut stdout, &mut stderr)
}

/// 一次完整会话：按配置自动加载 → 主循环 → 按配置自动保存
///
/// 自动加载失败时本次会话不再自动保存，任务文件保持原样。
pub fn run_session<R: BufRead, W: Write, E: Write>(
    session: &Session,
    storage: &StorageConfig,
    input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    let path = &session.tasks_path;
    let mut store = TaskStore::new();
    let mut autosave = storage.autosave;

    if storage.autoload && path.exists() {
        match store.load(path) {
            Ok(()) => info!(path = %path.display(), count = store.count(), "loaded tasks"),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "autoload failed");
                writeln!(err, "error: could not load {}: {}", path.display(), e)?;
                if autosave {
                    writeln!(
                        err,
                        "error: autosave is off for this session so {} is left untouched",
                        path.display()
                    )?;
                    autosave = false;
                }
            }
        }
    }

    writeln!(out, "To-Do List Application (type `help` for commands)")?;
    run_with(&mut store, session, input, out, err)?;

    if autosave {
        match store.save(path) {
            Ok(()) => info!(path = %path.display(), count = store.count(), "saved tasks"),
            Err(e) => {
                warn!(error = %e, "autosave failed");
                writeln!(err, "error: autosave failed: {}", e)?;
            }
        }
    }

    Ok(())
}

/// shell 主循环：读到 `quit` 或 EOF 为止
///
/// 命令结果写到 `out`，错误写到 `err`，单条命令失败不会结束循环。
pub fn run_with<R: BufRead, W: Write, E: Write>(
    store: &mut TaskStore,
    session: &Session,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    let mut line = String::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            // EOF
            writeln!(out)?;
            break;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // help 也通过 Err 返回
                match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                        write!(out, "{}", e)?
                    }
                    _ => write!(err, "{}", e)?,
                }
                continue;
            }
        };

        let command = match parsed.command {
            ShellCommand::Quit => break,
            ShellCommand::Task(command) => command,
        };

        debug!(?command, "dispatching");
        match tasks::execute(store, command, session, Utc::now()) {
            Ok(outcome) => writeln!(out, "{}", outcome.message)?,
            Err(e) => writeln!(err, "error: {}", e)?,
        }
    }

    Ok(())
}
