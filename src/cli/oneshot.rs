//! 单次命令：加载任务文件 → 执行 → 有修改则写回

use chrono::Utc;
use tracing::{debug, info};

use super::TaskCommand;
use crate::error::Result;
use crate::operations::tasks::{self, Session};
use crate::storage::tasks::TaskStore;

/// 执行单条命令，返回要显示的消息
///
/// 任务文件不存在时按空列表处理。
pub fn execute(command: TaskCommand, session: &Session) -> Result<String> {
    let mut store = TaskStore::new();
    if session.tasks_path.exists() {
        store.load(&session.tasks_path)?;
    }

    debug!(?command, "dispatching");
    let outcome = tasks::execute(&mut store, command, session, Utc::now())?;

    if outcome.changed {
        store.save(&session.tasks_path)?;
        info!(
            path = %session.tasks_path.display(),
            count = store.count(),
            "saved tasks"
        );
    }

    Ok(outcome.message)
}
