//! todo-cli - a personal Todoist command-line client
//!
//! Creates, completes, views, bulk-imports and exports tasks in one Todoist
//! project. The API token and project id are resolved through the OS
//! keyring, the environment, the config file or an interactive prompt.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod credentials;
pub mod remote;
pub mod utils;

pub use crate::core::{
    data::{Credential, DueDate, NewTask, ProjectRef, Section, Task},
    import::{ImportSummary, parse_and_emit},
    traits::{Prompter, SecretVault, TaskService},
};
pub use credentials::{CredentialResolver, CredentialSettings};
pub use remote::TodoistClient;
pub use utils::error::{AppError, AppResult};
