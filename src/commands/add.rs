use crate::cli::AddArgs;
use crate::commands::handlers::{create_task_in, open_session, task_content};
use crate::config::Config;
use crate::utils::error::AppResult;
use crate::utils::print_success;

pub async fn handle_add_command(
    config: &Config,
    args: &AddArgs,
    project_name: Option<&str>,
) -> AppResult<()> {
    let content = task_content(&args.text)?;
    let session = open_session(config, project_name).await?;

    create_task_in(&session.client, &session.project, config, &content, &args.due_choice()).await?;
    print_success("Task created");
    Ok(())
}
