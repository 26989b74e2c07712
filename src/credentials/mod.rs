//! Token and project resolution
//!
//! The API token is looked up through an ordered chain of sources (keyring,
//! environment, config file, interactive prompt). The project id comes from
//! the keyring or, failing that, from the project list by name. Values typed
//! in by the user are saved to the keyring only after they agree to it.

pub mod vault;

use crate::config::{Config, TokenSource};
use crate::core::data::{Credential, ProjectRef};
use crate::core::traits::{Prompter, SecretVault, TaskService};
use crate::utils::error::{AppError, AppResult};
use crate::utils::{print_info, print_success, print_warning};

pub use vault::KeyringVault;

const TOKEN_PROMPT: &str = "Enter your Todoist API token: ";

/// Everything the resolver needs to know, fixed for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialSettings {
    /// Keyring service name
    pub service_id: String,
    /// Keyring account for the token; the project id lives under
    /// `"<username> project_id"`
    pub username: String,
    pub sources: Vec<TokenSource>,
    pub token_env: String,
    pub config_token: Option<String>,
    pub offer_to_save: bool,
    pub default_project: String,
}

impl CredentialSettings {
    pub fn from_config(config: &Config) -> Self {
        let creds = &config.credentials;
        Self {
            service_id: creds.service_id.clone(),
            username: creds.resolved_username(),
            sources: creds.sources.clone(),
            token_env: creds.token_env.clone(),
            config_token: creds.api_token.clone(),
            offer_to_save: creds.offer_to_save,
            default_project: config.general.default_project.clone(),
        }
    }

    pub fn token_key(&self) -> &str {
        &self.username
    }

    pub fn project_key(&self) -> String {
        format!("{} project_id", self.username)
    }
}

/// What `forget` removed from the keyring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Forgotten {
    pub token: bool,
    pub project_id: bool,
}

pub struct CredentialResolver<'a> {
    settings: &'a CredentialSettings,
    vault: &'a dyn SecretVault,
    prompter: &'a dyn Prompter,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(
        settings: &'a CredentialSettings,
        vault: &'a dyn SecretVault,
        prompter: &'a dyn Prompter,
    ) -> Self {
        Self {
            settings,
            vault,
            prompter,
        }
    }

    /// Find the API token, asking for it if no configured source has one.
    pub fn resolve_token(&self) -> AppResult<Credential> {
        for source in &self.settings.sources {
            let found = match source {
                TokenSource::Vault => self.vault_lookup(self.settings.token_key()),
                TokenSource::Env => std::env::var(&self.settings.token_env)
                    .ok()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty()),
                TokenSource::Config => self.settings.config_token.clone(),
                TokenSource::Prompt => return self.prompt_for_token(),
            };

            if let Some(token) = found {
                tracing::debug!(?source, "API token found");
                return Ok(Credential::new(token));
            }
        }

        Err(AppError::UserInput("No API token received".to_string()))
    }

    /// Find the project to work in.
    ///
    /// An explicit name always goes to the project list and is never saved.
    /// Otherwise the saved id wins, then the default project by name.
    pub async fn resolve_project(
        &self,
        service: &dyn TaskService,
        explicit_name: Option<&str>,
    ) -> AppResult<ProjectRef> {
        if let Some(name) = explicit_name {
            return find_project(service, name).await;
        }

        let key = self.settings.project_key();
        if let Some(id) = self.vault_lookup(&key) {
            tracing::debug!(%id, "project id found in keyring");
            return Ok(ProjectRef {
                id,
                name: self.settings.default_project.clone(),
            });
        }

        let project = find_project(service, &self.settings.default_project).await?;
        print_info(&format!("Using project {} with ID {}", project.name, project.id));

        self.offer_to_save(
            &key,
            &project.id,
            "Would you like to save the Todoist project ID into your device's keyring?",
            "Todoist project ID saved",
        )?;

        Ok(project)
    }

    /// Remove the saved token and project id. Missing entries are not errors.
    pub fn forget(&self) -> AppResult<Forgotten> {
        let service = &self.settings.service_id;
        Ok(Forgotten {
            token: self.vault.delete(service, self.settings.token_key())?,
            project_id: self.vault.delete(service, &self.settings.project_key())?,
        })
    }

    fn prompt_for_token(&self) -> AppResult<Credential> {
        let token = self.prompter.read_secret(TOKEN_PROMPT)?.trim().to_string();
        if token.is_empty() {
            return Err(AppError::UserInput("No API token received".to_string()));
        }

        self.offer_to_save(
            self.settings.token_key(),
            &token,
            "Would you like to save the Todoist API token into your device's keyring?",
            "Todoist API token saved",
        )?;

        Ok(Credential::new(token))
    }

    /// A keyring that cannot be reached counts as empty.
    fn vault_lookup(&self, key: &str) -> Option<String> {
        match self.vault.get(&self.settings.service_id, key) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, key, "keyring lookup failed");
                None
            }
        }
    }

    fn offer_to_save(&self, key: &str, value: &str, question: &str, saved: &str) -> AppResult<()> {
        if !self.settings.offer_to_save || !self.prompter.confirm(question)? {
            return Ok(());
        }

        match self.vault.set(&self.settings.service_id, key, value) {
            Ok(()) => print_success(saved),
            Err(e) => print_warning(&format!("{} (continuing without saving)", e)),
        }
        Ok(())
    }
}

/// Look a project up by exact name.
pub async fn find_project(service: &dyn TaskService, name: &str) -> AppResult<ProjectRef> {
    let projects = service.list_projects().await?;
    projects
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| AppError::NotFound(format!("no project named '{}' found", name)))
}
