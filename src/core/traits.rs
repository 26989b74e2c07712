//! Core trait definitions
//!
//! These traits are the seams between the client logic and its external
//! collaborators: the Todoist REST API, the OS secret vault, and the
//! terminal.

use crate::core::data::{NewTask, ProjectRef, Section, Task};
use crate::utils::error::AppResult;
use async_trait::async_trait;

/// Remote task service operations
///
/// Implementations make a single attempt per call and surface failures
/// as `AppError::Remote`.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// List every project visible to the token
    async fn list_projects(&self) -> AppResult<Vec<ProjectRef>>;

    /// List active tasks, either of one project or of all projects
    async fn list_tasks(&self, project_id: Option<&str>) -> AppResult<Vec<Task>>;

    /// List the sections of a project
    async fn list_sections(&self, project_id: &str) -> AppResult<Vec<Section>>;

    /// Create a task and return it as stored by the service
    async fn create_task(&self, task: &NewTask) -> AppResult<Task>;

    /// Create a section and return it as stored by the service
    async fn create_section(&self, name: &str, project_id: &str) -> AppResult<Section>;

    /// Mark a task complete
    async fn complete_task(&self, task_id: &str) -> AppResult<()>;
}

/// Secret storage keyed by (service, account)
pub trait SecretVault {
    /// Read a secret. A missing entry is `Ok(None)`.
    fn get(&self, service: &str, key: &str) -> AppResult<Option<String>>;

    /// Store or replace a secret
    fn set(&self, service: &str, key: &str, value: &str) -> AppResult<()>;

    /// Delete a secret. Returns `false` when there was nothing to delete.
    fn delete(&self, service: &str, key: &str) -> AppResult<bool>;
}

/// Interactive questions asked while resolving credentials
pub trait Prompter {
    /// Read a line without echoing it
    fn read_secret(&self, prompt: &str) -> AppResult<String>;

    /// Ask a yes/no question; anything but an explicit yes is a no
    fn confirm(&self, question: &str) -> AppResult<bool>;
}
