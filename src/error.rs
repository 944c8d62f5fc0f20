//! tudu 统一错误类型定义
//!
//! 使用 `thiserror` 库提供统一的错误处理，核心操作只返回错误值，从不打印。

use std::io;
use thiserror::Error;

/// tudu 错误类型
#[derive(Debug, Error)]
pub enum TodoError {
    /// 位置越界（1-based，空列表上的任何位置也算越界）
    #[error("invalid position {position}: the list has {len} task(s)")]
    InvalidPosition { position: usize, len: usize },

    /// 持久化读写失败
    #[error("persistence error: {0}")]
    Persistence(#[from] io::Error),

    /// 任务文件内容无法解析
    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),

    /// 配置错误
    #[error("config error: {0}")]
    Config(String),
}

/// tudu Result 类型别名
pub type Result<T> = std::result::Result<T, TodoError>;

impl TodoError {
    /// 创建 InvalidPosition 错误
    pub fn invalid_position(position: usize, len: usize) -> Self {
        Self::InvalidPosition { position, len }
    }
}

impl From<toml::de::Error> for TodoError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
