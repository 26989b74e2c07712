use crate::config::Config;
use crate::core::data::{Credential, NewTask, ProjectRef, Task};
use crate::core::import::split_due_tag;
use crate::core::traits::TaskService;
use crate::credentials::{CredentialResolver, CredentialSettings, KeyringVault};
use crate::remote::TodoistClient;
use crate::utils::TerminalPrompter;
use crate::utils::error::{AppError, AppResult};
use std::io::{self, IsTerminal};

/// What a shell leaves behind when an unquoted comma list is passed through
const MANGLED_LIST: &str = "System.Object[]";

/// An authenticated client bound to one project
pub struct Session<S = TodoistClient> {
    pub client: S,
    pub project: ProjectRef,
}

/// How a new task gets its due date when the text carries no tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueChoice {
    Default,
    Phrase(String),
    Never,
}

/// Join command words into task content and reject unusable input.
pub fn task_content(words: &[String]) -> AppResult<String> {
    let content = words.join(" ").trim().to_string();

    if content.is_empty() {
        return Err(AppError::UserInput("task content not given".to_string()));
    }
    if content.contains(MANGLED_LIST) {
        return Err(AppError::UserInput(
            "put quotes around the input when it has commas".to_string(),
        ));
    }

    Ok(content)
}

/// Build the creation request for one task typed on the command line.
pub fn new_task(content: &str, project: &ProjectRef, due: &DueChoice, config: &Config) -> NewTask {
    let draft = split_due_tag(content);
    let phrase = match due {
        DueChoice::Default => config.general.default_due.clone(),
        DueChoice::Phrase(p) => Some(p.clone()),
        DueChoice::Never => None,
    };

    NewTask::new(draft.content, project.id.clone())
        .due_on(draft.due_date)
        .due_by(phrase)
}

/// Credential settings for one run. Save offers need a terminal on stdin,
/// otherwise the question would swallow a line of piped input.
pub fn session_settings(config: &Config, stdin_is_terminal: bool) -> CredentialSettings {
    let mut settings = CredentialSettings::from_config(config);
    settings.offer_to_save &= stdin_is_terminal;
    settings
}

/// Resolve the token and build a client. No project lookup.
pub fn connect(config: &Config) -> AppResult<TodoistClient> {
    let settings = session_settings(config, io::stdin().is_terminal());
    let vault = KeyringVault;
    let prompter = TerminalPrompter;

    let token = CredentialResolver::new(&settings, &vault, &prompter).resolve_token()?;
    TodoistClient::new(&config.api, token)
}

/// Resolve token and project against the real keyring and Todoist.
pub async fn open_session(config: &Config, project_name: Option<&str>) -> AppResult<Session> {
    let settings = session_settings(config, io::stdin().is_terminal());
    let vault = KeyringVault;
    let prompter = TerminalPrompter;
    let resolver = CredentialResolver::new(&settings, &vault, &prompter);

    start_session(&resolver, project_name, |token| {
        TodoistClient::new(&config.api, token)
    })
    .await
}

/// Resolve the token, build a client from it, then find the project.
pub async fn start_session<S, F>(
    resolver: &CredentialResolver<'_>,
    project_name: Option<&str>,
    make_client: F,
) -> AppResult<Session<S>>
where
    S: TaskService,
    F: FnOnce(Credential) -> AppResult<S>,
{
    let token = resolver.resolve_token()?;
    let client = make_client(token)?;
    let project = resolver.resolve_project(&client, project_name).await?;
    tracing::debug!(project = %project.name, id = %project.id, "session ready");

    Ok(Session { client, project })
}

/// Create one task typed on the command line.
pub async fn create_task_in(
    service: &dyn TaskService,
    project: &ProjectRef,
    config: &Config,
    content: &str,
    due: &DueChoice,
) -> AppResult<Task> {
    let request = new_task(content, project, due, config);
    let task = service.create_task(&request).await?;
    tracing::debug!(id = %task.id, "task created");
    Ok(task)
}

/// Create a task, then close it.
pub async fn record_done(
    service: &dyn TaskService,
    project: &ProjectRef,
    config: &Config,
    content: &str,
    due: &DueChoice,
) -> AppResult<Task> {
    let task = create_task_in(service, project, config, content, due).await?;
    service.complete_task(&task.id).await?;
    Ok(task)
}
