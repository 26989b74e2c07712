use crate::cli::ExportArgs;
use crate::commands::handlers::connect;
use crate::config::Config;
use crate::core::traits::TaskService;
use crate::utils::error::AppResult;
use crate::utils::export::write_snapshot;
use crate::utils::print_success;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Back up every active task, across all projects, to a JSON file.
pub async fn handle_export_command(config: &Config, args: &ExportArgs) -> AppResult<()> {
    let client = connect(config)?;
    let (count, path) = export_all(&client, &args.dir, Local::now()).await?;

    print_success(&format!("Exported {} task(s) to {}", count, path.display()));
    Ok(())
}

/// Fetch tasks from every project and write them under `dir`.
pub async fn export_all(
    service: &dyn TaskService,
    dir: &Path,
    at: DateTime<Local>,
) -> AppResult<(usize, PathBuf)> {
    let tasks = service.list_tasks(None).await?;
    let count = tasks.len();
    let path = write_snapshot(dir, tasks, at)?;
    tracing::debug!(count, path = %path.display(), "snapshot written");
    Ok((count, path))
}
