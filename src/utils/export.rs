use crate::core::data::Task;
use crate::utils::error::{AppError, AppResult};
use crate::utils::format::file_stamp;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Backup file contents
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub exported_at: DateTime<Local>,
    pub task_count: usize,
    pub tasks: Vec<Task>,
}

pub fn snapshot_file_name(at: &DateTime<Local>) -> String {
    format!("todoist-tasks-{}.json", file_stamp(at))
}

/// Write `tasks` as a pretty JSON snapshot into `dir`, creating it if needed.
/// Returns the path of the new file.
pub fn write_snapshot(dir: &Path, tasks: Vec<Task>, at: DateTime<Local>) -> AppResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

    let path = dir.join(snapshot_file_name(&at));
    let snapshot = Snapshot {
        exported_at: at,
        task_count: tasks.len(),
        tasks,
    };

    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| AppError::System(format!("Failed to serialize tasks to JSON: {}", e)))?;

    std::fs::write(&path, json)
        .map_err(|e| AppError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    Ok(path)
}
