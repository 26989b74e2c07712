use crate::config::ApiConfig;
use crate::core::data::{Credential, NewTask, ProjectRef, Section, Task};
use crate::core::traits::TaskService;
use crate::utils::error::{AppError, AppResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use uuid::Uuid;

/// Header carrying a per-call id so the service can drop replayed writes
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

#[derive(Debug, Serialize)]
struct CreateSectionRequest<'a> {
    name: &'a str,
    project_id: &'a str,
}

/// Todoist REST API client. One attempt per call, no retries.
pub struct TodoistClient {
    client: Client,
    base_url: String,
    token: Credential,
}

impl TodoistClient {
    pub fn new(api: &ApiConfig, token: Credential) -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("todo-cli/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(|e| AppError::remote(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> AppResult<T> {
        tracing::debug!(path, ?query, "GET");

        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(self.token.expose())
            .query(query)
            .send()
            .await
            .map_err(|e| transport_error(what, e))?;

        let response = check_status(response, what).await?;
        response
            .json()
            .await
            .map_err(|e| AppError::remote(format!("Failed to parse {} response: {}", what, e)))
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
        what: &str,
    ) -> AppResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        tracing::debug!(path, request_id = %request_id, "POST");

        let mut request = self
            .client
            .post(self.url(path))
            .bearer_auth(self.token.expose())
            .header(REQUEST_ID_HEADER, request_id);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| transport_error(what, e))?;
        check_status(response, what).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        what: &str,
    ) -> AppResult<T> {
        self.post(path, Some(body), what)
            .await?
            .json()
            .await
            .map_err(|e| AppError::remote(format!("Failed to parse {} response: {}", what, e)))
    }
}

fn transport_error(what: &str, err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        format!("Failed to {}: request timed out", what)
    } else {
        format!("Failed to {}: {}", what, err)
    };
    AppError::Remote {
        status: err.status().map(|s| s.as_u16()),
        message,
    }
}

async fn check_status(response: Response, what: &str) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    Err(AppError::Remote {
        status: Some(status.as_u16()),
        message: format!("Failed to {}: {} - {}", what, status, error_text.trim()),
    })
}

#[async_trait]
impl TaskService for TodoistClient {
    async fn list_projects(&self) -> AppResult<Vec<ProjectRef>> {
        self.get_json("projects", &[], "list projects").await
    }

    async fn list_tasks(&self, project_id: Option<&str>) -> AppResult<Vec<Task>> {
        match project_id {
            Some(id) => self.get_json("tasks", &[("project_id", id)], "list tasks").await,
            None => self.get_json("tasks", &[], "list tasks").await,
        }
    }

    async fn list_sections(&self, project_id: &str) -> AppResult<Vec<Section>> {
        self.get_json("sections", &[("project_id", project_id)], "list sections")
            .await
    }

    async fn create_task(&self, task: &NewTask) -> AppResult<Task> {
        self.post_json("tasks", task, "create task").await
    }

    async fn create_section(&self, name: &str, project_id: &str) -> AppResult<Section> {
        let request = CreateSectionRequest { name, project_id };
        self.post_json("sections", &request, "create section").await
    }

    async fn complete_task(&self, task_id: &str) -> AppResult<()> {
        self.post::<()>(&format!("tasks/{}/close", task_id), None, "complete task")
            .await?;
        Ok(())
    }
}
