//! 任务列表
//!
//! `TaskStore` 持有一个有序的任务序列。对外的位置一律从 1 开始，
//! 与用户看到的编号一致；所有越界访问返回 `TodoError::InvalidPosition`，
//! 不修改任何状态。

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{read_file, write_file};
use crate::error::{Result, TodoError};

/// 任务数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// 任务描述
    pub description: String,
    /// 截止时间
    pub due_date: DateTime<Utc>,
    /// 优先级（仅作记录，不影响排序）
    pub priority: i64,
    /// 是否已完成
    pub completed: bool,
}

impl Task {
    /// 创建新任务（未完成）
    pub fn new(description: impl Into<String>, due_date: DateTime<Utc>, priority: i64) -> Self {
        Self {
            description: description.into(),
            due_date,
            priority,
            completed: false,
        }
    }
}

/// 有序任务列表
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    /// 创建空列表
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加到末尾
    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// 删除指定位置的任务，后面的任务前移一位
    pub fn remove(&mut self, position: usize) -> Result<Task> {
        let index = self.index_of(position)?;
        Ok(self.tasks.remove(index))
    }

    /// 标记完成（重复调用无副作用）
    pub fn complete(&mut self, position: usize) -> Result<()> {
        let index = self.index_of(position)?;
        self.tasks[index].completed = true;
        Ok(())
    }

    /// 把 `position` 的任务移到 `new_position`
    ///
    /// 两个位置都按当前长度检查。`new_position == count()` 表示移到末尾：
    /// 先取出任务，再插入到下标 `new_position - 1`，此时该下标正好是追加位置。
    pub fn prioritize(&mut self, position: usize, new_position: usize) -> Result<()> {
        let from = self.index_of(position)?;
        let to = self.index_of(new_position)?;
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        Ok(())
    }

    /// 清空列表
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// 只读视图，按当前顺序
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// 任务数量
    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// 读取指定位置的任务
    pub fn get(&self, position: usize) -> Result<&Task> {
        let index = self.index_of(position)?;
        Ok(&self.tasks[index])
    }

    /// 序列化为持久化格式（JSON 数组）
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.tasks)?)
    }

    /// 从持久化格式解析任务序列，不触碰任何列表
    pub fn decode(bytes: &[u8]) -> Result<Vec<Task>> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// 保存整个列表
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.encode()?;
        write_file(path, &bytes)?;
        Ok(())
    }

    /// 从文件加载并整体替换当前列表；任何失败都保持原内容
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let bytes = read_file(path)?;
        let tasks = Self::decode(&bytes)?;
        self.tasks = tasks;
        Ok(())
    }

    /// 1-based 位置转为下标
    fn index_of(&self, position: usize) -> Result<usize> {
        if position == 0 || position > self.tasks.len() {
            return Err(TodoError::invalid_position(position, self.tasks.len()));
        }
        Ok(position - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn due(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
    }

    fn store_with(names: &[&str]) -> TaskStore {
        let mut store = TaskStore::new();
        for (i, name) in names.iter().enumerate() {
            store.add(Task::new(*name, due(i as u32 + 1), i as i64 + 1));
        }
        store
    }

    fn descriptions(store: &TaskStore) -> Vec<&str> {
        store.list().iter().map(|t| t.description.as_str()).collect()
    }

    #[test]
    fn test_new_task() {
        let task = Task::new("Task 1", due(1), 1);
        assert_eq!(task.description, "Task 1");
        assert_eq!(task.due_date, due(1));
        assert_eq!(task.priority, 1);
        assert!(!task.completed);
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = TaskStore::new();
        assert_eq!(store.count(), 0);
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_add_appends() {
        let mut store = store_with(&["a", "b"]);
        store.add(Task::new("c", due(3), 1));
        assert_eq!(store.count(), 3);
        assert_eq!(descriptions(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_shifts_later_tasks() {
        let mut store = store_with(&["a", "b", "c", "d"]);

        let removed = store.remove(2).unwrap();

        assert_eq!(removed.description, "b");
        assert_eq!(store.count(), 3);
        assert_eq!(descriptions(&store), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut store = store_with(&["a", "b"]);

        for position in [0, 3, 100] {
            let err = store.remove(position).unwrap_err();
            assert!(matches!(
                err,
                TodoError::InvalidPosition { position: p, len: 2 } if p == position
            ));
        }
        assert_eq!(descriptions(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_on_empty_store() {
        let mut store = TaskStore::new();
        assert!(store.remove(1).is_err());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut store = store_with(&["only"]);

        store.complete(1).unwrap();
        store.complete(1).unwrap();

        let task = store.get(1).unwrap();
        assert!(task.completed);
        assert_eq!(task.description, "only");
        assert_eq!(task.due_date, due(1));
        assert_eq!(task.priority, 1);
    }

    #[test]
    fn test_complete_touches_only_target() {
        let mut store = store_with(&["a", "b", "c"]);
        let before = store.list().to_vec();

        store.complete(2).unwrap();

        let after = store.list();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);

        let mut expected = before[1].clone();
        expected.completed = true;
        assert_eq!(after[1], expected);
    }

    #[test]
    fn test_complete_out_of_bounds() {
        let mut store = store_with(&["a"]);
        assert!(store.complete(0).is_err());
        assert!(store.complete(2).is_err());
        assert!(!store.get(1).unwrap().completed);
        assert!(TaskStore::new().complete(1).is_err());
    }

    #[test]
    fn test_prioritize_moves_up() {
        let mut store = store_with(&["Buy milk", "Write report"]);

        store.prioritize(2, 1).unwrap();

        assert_eq!(descriptions(&store), vec!["Write report", "Buy milk"]);
    }

    #[test]
    fn test_prioritize_moves_down() {
        let mut store = store_with(&["a", "b", "c", "d", "e"]);

        store.prioritize(2, 4).unwrap();

        assert_eq!(descriptions(&store), vec!["a", "c", "d", "b", "e"]);
    }

    #[test]
    fn test_prioritize_to_last_position_moves_to_end() {
        let mut store = store_with(&["a", "b", "c"]);

        store.prioritize(1, 3).unwrap();

        assert_eq!(descriptions(&store), vec!["b", "c", "a"]);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_prioritize_same_position_is_noop() {
        let mut store = store_with(&["a", "b", "c"]);
        store.prioritize(2, 2).unwrap();
        assert_eq!(descriptions(&store), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_prioritize_every_pair() {
        let names = ["a", "b", "c", "d"];
        for from in 1..=names.len() {
            for to in 1..=names.len() {
                let mut store = store_with(&names);
                store.prioritize(from, to).unwrap();

                let moved = names[from - 1];
                assert_eq!(store.get(to).unwrap().description, moved);

                let mut others: Vec<&str> = descriptions(&store);
                others.retain(|d| *d != moved);
                let mut expected: Vec<&str> = names.to_vec();
                expected.retain(|d| *d != moved);
                assert_eq!(others, expected, "prioritize({from}, {to})");
            }
        }
    }

    #[test]
    fn test_prioritize_out_of_bounds() {
        let mut store = store_with(&["a", "b"]);
        assert!(store.prioritize(10, 1).is_err());
        assert!(store.prioritize(1, 10).is_err());
        assert!(store.prioritize(0, 1).is_err());
        assert!(store.prioritize(1, 0).is_err());
        assert_eq!(descriptions(&store), vec!["a", "b"]);

        let mut empty = TaskStore::new();
        assert!(empty.prioritize(1, 1).is_err());
    }

    #[test]
    fn test_clear() {
        let mut store = store_with(&["a", "b"]);
        store.clear();
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_encoded_field_names() {
        let mut store = store_with(&["Task 1"]);
        store.complete(1).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&store.encode().unwrap()).unwrap();
        let first = &value[0];
        assert_eq!(first["description"], "Task 1");
        assert_eq!(first["due_date"], "2024-03-01T09:30:00Z");
        assert_eq!(first["priority"], 1);
        assert_eq!(first["completed"], true);
    }

    #[test]
    fn test_decode_ignores_unknown_fields_and_normalizes_offsets() {
        let json = r#"[{
            "description": "Ship it",
            "due_date": "2024-03-01T11:30:00+02:00",
            "priority": 4,
            "completed": false,
            "tags": ["work"]
        }]"#;

        let tasks = TaskStore::decode(json.as_bytes()).unwrap();

        assert_eq!(tasks, vec![Task::new("Ship it", due(1), 4)]);
    }

    #[test]
    fn test_decode_missing_field_is_format_error() {
        let json = r#"[{"description": "no date", "priority": 1, "completed": false}]"#;
        let err = TaskStore::decode(json.as_bytes()).unwrap_err();
        assert!(matches!(err, TodoError::Format(_)));
    }

    #[test]
    fn test_save_clear_load_restores_tasks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = store_with(&["a", "b", "c"]);
        store.complete(2).unwrap();
        store.add(Task::new(
            "precise",
            Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap(),
            -3,
        ));
        let before = store.list().to_vec();

        store.save(&path).unwrap();
        store.clear();
        store.load(&path).unwrap();

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_save_does_not_mutate() {
        let dir = TempDir::new().unwrap();
        let store = store_with(&["a", "b"]);
        let before = store.list().to_vec();

        store.save(&dir.path().join("tasks.json")).unwrap();

        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_save_to_unwritable_path_is_persistence_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let store = store_with(&["a"]);
        let err = store.save(&blocker.join("tasks.json")).unwrap_err();

        assert!(matches!(err, TodoError::Persistence(_)));
    }

    #[test]
    fn test_load_missing_file_keeps_contents() {
        let dir = TempDir::new().unwrap();
        let mut store = store_with(&["a", "b"]);

        let err = store.load(&dir.path().join("nope.json")).unwrap_err();

        assert!(matches!(err, TodoError::Persistence(_)));
        assert_eq!(descriptions(&store), vec!["a", "b"]);
    }

    #[test]
    fn test_load_malformed_file_keeps_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, r#"[{"description": "half"#).unwrap();
        let mut store = store_with(&["a"]);

        let err = store.load(&path).unwrap_err();

        assert!(matches!(err, TodoError::Format(_)));
        assert_eq!(descriptions(&store), vec!["a"]);
    }
}
