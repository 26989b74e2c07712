use crate::cli::AddArgs;
use crate::commands::handlers::{open_session, record_done, task_content};
use crate::config::Config;
use crate::utils::error::AppResult;
use crate::utils::print_success;

/// Record something already finished: create the task, then close it.
pub async fn handle_done_command(
    config: &Config,
    args: &AddArgs,
    project_name: Option<&str>,
) -> AppResult<()> {
    let content = task_content(&args.text)?;
    let session = open_session(config, project_name).await?;

    record_done(&session.client, &session.project, config, &content, &args.due_choice()).await?;
    print_success("Task complete");
    Ok(())
}
