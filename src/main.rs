mod cli;
mod error;
mod operations;
mod storage;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, TaskCommand};
use operations::tasks::Session;
use storage::config::{self, Config};

/// 日志写到 stderr，默认只显示 warn 以上，`RUST_LOG` 可覆盖
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();
}

/// 加载配置：显式指定的 `--config` 必须能读能解析，默认路径则宽松处理
fn load_config(cli: &Cli) -> error::Result<Config> {
    match &cli.config {
        Some(path) => config::try_load_config(path),
        None => Ok(config::load_config(&config::config_path())),
    }
}

/// 写出默认配置文件
fn run_init(cli: &Cli, force: bool) -> ExitCode {
    let path = cli.config.clone().unwrap_or_else(config::config_path);
    match cli::init::execute(&path, force) {
        Ok(cli::init::InitResult::Created) => {
            println!("Wrote default config to {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(cli::init::InitResult::AlreadyExists) => {
            println!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// 读写任务列表的模式
enum Mode {
    Shell,
    Task(TaskCommand),
}

/// 按配置运行 shell 或单次命令
fn run_tasks(cli: &Cli, mode: Mode) -> ExitCode {
    let config = match load_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let session = Session {
        tasks_path: cli
            .file
            .clone()
            .unwrap_or_else(|| config.storage.tasks_path()),
        defaults: config.defaults.clone(),
    };
    tracing::debug!(path = %session.tasks_path.display(), "using task file");

    let result = match mode {
        Mode::Task(command) => cli::oneshot::execute(command, &session).map(|message| {
            println!("{}", message);
        }),
        Mode::Shell => cli::shell::run(&session, &config.storage).map_err(error::TodoError::from),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    // 解析命令行参数
    let mut cli = Cli::parse();

    // 无子命令：进入交互式 shell
    let command = cli.command.take().unwrap_or(Commands::Shell);

    match command {
        Commands::Init { force } => run_init(&cli, force),
        Commands::Shell => run_tasks(&cli, Mode::Shell),
        Commands::Task(command) => run_tasks(&cli, Mode::Task(command)),
    }
}
