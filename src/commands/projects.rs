use crate::commands::handlers::connect;
use crate::config::Config;
use crate::core::traits::TaskService;
use crate::utils::error::AppResult;
use crate::utils::output::OutputStyle;
use crate::utils::print_info;

pub async fn handle_projects_command(config: &Config) -> AppResult<()> {
    let client = connect(config)?;
    let projects = client.list_projects().await?;

    if projects.is_empty() {
        print_info("No projects found");
        return Ok(());
    }

    for project in &projects {
        let marker = if project.name == config.general.default_project {
            "*"
        } else {
            " "
        };
        println!("{} {}  {}", marker, project.name, OutputStyle::muted(&project.id));
    }
    Ok(())
}
