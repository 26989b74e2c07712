//! In-memory collaborators used by unit tests.

use crate::core::data::{NewTask, ProjectRef, Section, Task};
use crate::core::traits::{Prompter, SecretVault, TaskService};
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListProjects,
    ListTasks { project_id: Option<String> },
    ListSections { project_id: String },
    CreateTask { content: String, section_id: Option<String>, due_date: Option<String> },
    CreateSection { name: String, project_id: String },
    CompleteTask { task_id: String },
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    next_id: usize,
}

/// Records every successful call; ids are handed out as `section-N` / `task-N`.
#[derive(Default)]
pub struct FakeService {
    projects: Vec<ProjectRef>,
    fail_after: Option<usize>,
    state: Mutex<State>,
}

impl FakeService {
    pub fn with_projects(names: &[(&str, &str)]) -> Self {
        Self {
            projects: names
                .iter()
                .map(|(id, name)| ProjectRef {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Fail every call once `n` calls have succeeded.
    pub fn failing_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    fn record(&self, call: Call) -> AppResult<usize> {
        let mut state = self.state.lock().unwrap();
        if self.fail_after.is_some_and(|n| state.calls.len() >= n) {
            return Err(AppError::Remote {
                status: Some(500),
                message: "Internal Server Error".to_string(),
            });
        }
        state.calls.push(call);
        state.next_id += 1;
        Ok(state.next_id)
    }
}

#[async_trait]
impl TaskService for FakeService {
    async fn list_projects(&self) -> AppResult<Vec<ProjectRef>> {
        self.record(Call::ListProjects)?;
        Ok(self.projects.clone())
    }

    async fn list_tasks(&self, project_id: Option<&str>) -> AppResult<Vec<Task>> {
        self.record(Call::ListTasks {
            project_id: project_id.map(str::to_string),
        })?;
        Ok(Vec::new())
    }

    async fn list_sections(&self, project_id: &str) -> AppResult<Vec<Section>> {
        self.record(Call::ListSections {
            project_id: project_id.to_string(),
        })?;
        Ok(Vec::new())
    }

    async fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        let id = self.record(Call::CreateTask {
            content: task.content.clone(),
            section_id: task.section_id.clone(),
            due_date: task.due_date.as_ref().map(|d| d.as_str().to_string()),
        })?;
        Ok(Task {
            id: format!("task-{}", id),
            content: task.content.clone(),
            project_id: task.project_id.clone(),
            section_id: task.section_id.clone(),
            due: None,
            is_completed: false,
            extra: serde_json::Map::new(),
        })
    }

    async fn create_section(&self, name: &str, project_id: &str) -> AppResult<Section> {
        self.record(Call::CreateSection {
            name: name.to_string(),
            project_id: project_id.to_string(),
        })?;
        Ok(Section {
            id: format!("section-{}", self.sections_created()),
            name: name.to_string(),
            project_id: Some(project_id.to_string()),
        })
    }

    async fn complete_task(&self, task_id: &str) -> AppResult<()> {
        self.record(Call::CompleteTask {
            task_id: task_id.to_string(),
        })?;
        Ok(())
    }
}

impl FakeService {
    pub fn sections_created(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::CreateSection { .. }))
            .count()
    }
}

/// Keyring stand-in; seeded entries live under the `todo-cli` service.
#[derive(Default)]
pub struct MemoryVault {
    entries: RefCell<HashMap<(String, String), String>>,
    broken: bool,
}

impl MemoryVault {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let vault = Self::default();
        for (key, value) in entries {
            vault
                .entries
                .borrow_mut()
                .insert(("todo-cli".to_string(), key.to_string()), value.to_string());
        }
        vault
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(&("todo-cli".to_string(), key.to_string()))
            .cloned()
    }
}

impl SecretVault for MemoryVault {
    fn get(&self, service: &str, key: &str) -> AppResult<Option<String>> {
        if self.broken {
            return Err(AppError::Vault("no keyring backend".to_string()));
        }
        Ok(self.entries.borrow().get(&(service.to_string(), key.to_string())).cloned())
    }

    fn set(&self, service: &str, key: &str, value: &str) -> AppResult<()> {
        if self.broken {
            return Err(AppError::Vault("no keyring backend".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert((service.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> AppResult<bool> {
        Ok(self
            .entries
            .borrow_mut()
            .remove(&(service.to_string(), key.to_string()))
            .is_some())
    }
}

pub struct ScriptedPrompter {
    secret: String,
    answer: bool,
    pub secrets_asked: Cell<usize>,
    pub confirms_asked: Cell<usize>,
}

impl ScriptedPrompter {
    pub fn new(secret: &str, answer: bool) -> Self {
        Self {
            secret: secret.to_string(),
            answer,
            secrets_asked: Cell::new(0),
            confirms_asked: Cell::new(0),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_secret(&self, _prompt: &str) -> AppResult<String> {
        self.secrets_asked.set(self.secrets_asked.get() + 1);
        Ok(self.secret.clone())
    }

    fn confirm(&self, _question: &str) -> AppResult<bool> {
        self.confirms_asked.set(self.confirms_asked.get() + 1);
        Ok(self.answer)
    }
}
