//! init 子命令实现：写出默认配置文件

use std::io;
use std::path::Path;

use crate::storage::config::{save_config, Config};

/// 执行结果
#[derive(Debug, PartialEq, Eq)]
pub enum InitResult {
    Created,
    AlreadyExists,
}

/// 写出默认配置；已存在且未指定 `force` 时不覆盖
pub fn execute(path: &Path, force: bool) -> io::Result<InitResult> {
    if path.exists() && !force {
        return Ok(InitResult::AlreadyExists);
    }
    save_config(path, &Config::default())?;
    Ok(InitResult::Created)
}
