use crate::commands::handlers::open_session;
use crate::config::Config;
use crate::core::traits::TaskService;
use crate::core::view::view_lines;
use crate::utils::error::AppResult;
use crate::utils::output::OutputStyle;
use crate::utils::pagination::print_paged;
use crate::utils::print_info;

pub async fn handle_view_command(config: &Config, project_name: Option<&str>) -> AppResult<()> {
    let session = open_session(config, project_name).await?;
    let project = &session.project;

    let tasks = session.client.list_tasks(Some(&project.id)).await?;
    let sections = session.client.list_sections(&project.id).await?;
    tracing::debug!(tasks = tasks.len(), sections = sections.len(), "fetched project");

    let title = format!("Here are the active tasks in the {} project:", project.name);
    if tasks.is_empty() {
        println!("{}", OutputStyle::title(&title));
        print_info("No active tasks");
        return Ok(());
    }

    let mut lines = vec![OutputStyle::title(&title).to_string()];
    lines.extend(view_lines(&tasks, &sections).iter().map(OutputStyle::view_line));
    print_paged(&lines)
}
