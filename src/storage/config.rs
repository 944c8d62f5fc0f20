//! 应用配置持久化

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

use super::{default_tasks_path, expand_home, save_toml, tudu_dir};
use crate::error::Result;

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// 任务文件配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 任务文件路径，支持 `~/` 开头
    #[serde(default)]
    pub path: Option<String>,
    /// shell 启动时自动加载任务文件
    #[serde(default = "default_true")]
    pub autoload: bool,
    /// shell 退出时自动保存
    #[serde(default)]
    pub autosave: bool,
}

fn default_true() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            autoload: true,
            autosave: false,
        }
    }
}

impl StorageConfig {
    /// 实际使用的任务文件路径
    pub fn tasks_path(&self) -> PathBuf {
        match self.path.as_deref() {
            Some(p) if !p.trim().is_empty() => expand_home(p.trim()),
            _ => default_tasks_path(),
        }
    }
}

/// `add` 的默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_priority")]
    pub priority: i64,
    /// 截止时间 = 现在 + N 天
    #[serde(default)]
    pub due_in_days: i64,
}

fn default_priority() -> i64 {
    1
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            priority: default_priority(),
            due_in_days: 0,
        }
    }
}

/// 获取默认配置文件路径
pub fn config_path() -> PathBuf {
    tudu_dir().join("config.toml")
}

/// 严格加载配置，读取或解析失败都返回错误（用于显式指定的 `--config`）
pub fn try_load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// 加载配置（不存在或解析失败则返回默认值）
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    try_load_config(path).unwrap_or_default()
}

/// 保存配置
pub fn save_config(path: &Path, config: &Config) -> io::Result<()> {
    save_toml(path, config)
}
