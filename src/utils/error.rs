use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("{0}")]
    UserInput(String),

    #[error("Keyring error: {0}")]
    Vault(String),

    #[error("Todoist error: {message}")]
    Remote { status: Option<u16>, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("System error: {0}")]
    System(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn remote(message: impl Into<String>) -> Self {
        AppError::Remote {
            status: None,
            message: message.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Io(_) | AppError::System(_) => 1,
            AppError::UserInput(_) => 2,
            AppError::NotFound(_) => 3,
            AppError::Remote { .. } => 4,
            AppError::Vault(_) => 5,
        }
    }

    /// True when the service rejected the credential.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AppError::Remote {
                status: Some(401 | 403),
                ..
            }
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

pub fn report_error(err: &AppError) {
    match err {
        AppError::Remote { .. } => {
            eprintln!("🌐 {}", OutputStyle::error(&err.to_string()));
            if err.is_auth_failure() {
                let hint = "The saved API token may be invalid. Run `todo logout` and try again.";
                eprintln!("💡 {}", OutputStyle::muted(hint));
            }
        }
        AppError::NotFound(msg) => {
            eprintln!("⚠️  {}", OutputStyle::warning(&format!("Error: {}", msg)));
        }
        AppError::UserInput(msg) => {
            eprintln!("❌ {}", OutputStyle::error(&format!("Error: {}", msg)));
        }
        AppError::Vault(_) | AppError::Io(_) | AppError::System(_) => {
            eprintln!("❌ {}", OutputStyle::error(&err.to_string()));
        }
    }
}
