pub mod config;
pub mod tasks;

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// 获取 ~/.tudu/ 目录路径（找不到 home 时退回当前目录）
pub fn tudu_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tudu")
}

/// 默认任务文件: ~/.tudu/tasks.json
pub fn default_tasks_path() -> PathBuf {
    tudu_dir().join("tasks.json")
}

/// 展开开头的 `~/`
pub fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}

/// 读取整个文件
pub fn read_file(path: &Path) -> io::Result<Vec<u8>> {
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read file");
    Ok(bytes)
}

/// 写入整个文件（父目录不存在时自动创建）
pub fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, data)?;
    debug!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(())
}

/// 将数据序列化后保存到 TOML 文件
pub fn save_toml<T: serde::Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let content =
        toml::to_string_pretty(data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    write_file(path, content.as_bytes())
}
