use crate::utils::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml_edit::{Array, DocumentMut, Item, Value};

pub const APP_DIR: &str = "todo-cli";
pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/rest/v2";
/// Keyring service the earlier scripts saved tokens under
pub const DEFAULT_SERVICE_ID: &str = "github.com/wheelercj/todo";

/// Environment variables naming the login user, most specific first
const USER_ENV_VARS: [&str; 4] = ["LOGNAME", "USER", "LNAME", "USERNAME"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub default_project: String,
    #[serde(
        serialize_with = "crate::utils::format::serialize_option_string",
        deserialize_with = "crate::utils::format::deserialize_option_string"
    )]
    pub default_due: Option<String>,
    pub color: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub service_id: String,
    #[serde(
        serialize_with = "crate::utils::format::serialize_option_string",
        deserialize_with = "crate::utils::format::deserialize_option_string"
    )]
    pub username: Option<String>,
    pub sources: Vec<TokenSource>,
    pub token_env: String,
    #[serde(
        serialize_with = "crate::utils::format::serialize_option_string",
        deserialize_with = "crate::utils::format::deserialize_option_string"
    )]
    pub api_token: Option<String>,
    pub offer_to_save: bool,
}

/// Where an API token may come from, tried in configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    Vault,
    Env,
    Config,
    Prompt,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_project: "Inbox".to_string(),
            default_due: Some("today".to_string()),
            color: true,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            service_id: DEFAULT_SERVICE_ID.to_string(),
            username: None,
            sources: vec![
                TokenSource::Vault,
                TokenSource::Env,
                TokenSource::Config,
                TokenSource::Prompt,
            ],
            token_env: "TODOIST_API_TOKEN".to_string(),
            api_token: None,
            offer_to_save: true,
        }
    }
}

impl CredentialsConfig {
    /// Account name used for vault keys: the configured one, else the OS user.
    pub fn resolved_username(&self) -> String {
        match &self.username {
            Some(name) => name.clone(),
            None => login_name(|var| std::env::var(var).ok(), dirs::home_dir()),
        }
    }
}

/// Login name from the usual environment variables, then from the home
/// directory's name (which `dirs` takes from the passwd entry when `HOME`
/// is unset).
fn login_name(env: impl Fn(&str) -> Option<String>, home: Option<PathBuf>) -> String {
    USER_ENV_VARS
        .iter()
        .filter_map(|var| env(var))
        .find(|name| !name.trim().is_empty())
        .or_else(|| {
            home.as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "default".to_string())
}

impl Config {
    /// Load from `config_path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| AppError::System(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::System("API base URL cannot be empty".to_string()));
        }

        if self.api.timeout_secs == 0 {
            return Err(AppError::System(
                "API timeout must be at least one second".to_string(),
            ));
        }

        if self.credentials.service_id.trim().is_empty() {
            return Err(AppError::System(
                "Keyring service id cannot be empty".to_string(),
            ));
        }

        if self.credentials.sources.is_empty() {
            return Err(AppError::System(
                "At least one token source must be configured".to_string(),
            ));
        }

        if self.general.default_project.trim().is_empty() {
            return Err(AppError::System(
                "Default project name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;

        Ok(())
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Set one dotted key (`section.key`) in the file at `config_path`,
    /// keeping the rest of the file's formatting and comments.
    ///
    /// The value is read with the type of the key's current value; arrays
    /// take a comma separated list.
    pub fn set_value(config_path: &Path, key: &str, raw: &str) -> AppResult<Config> {
        let content = std::fs::read_to_string(config_path)?;
        let mut doc = content
            .parse::<DocumentMut>()
            .map_err(|e| AppError::System(format!("Failed to parse config file: {}", e)))?;

        let (section, field) = key.split_once('.').ok_or_else(|| {
            AppError::UserInput(format!("Config key must look like section.key, got '{}'", key))
        })?;

        // Fill in keys missing from older files so any documented key can be set.
        let defaults = toml::to_string(&Config::default())
            .map_err(|e| AppError::System(format!("Failed to serialize config: {}", e)))?
            .parse::<DocumentMut>()
            .map_err(|e| AppError::System(format!("Failed to parse default config: {}", e)))?;
        let template = defaults
            .get(section)
            .and_then(|s| s.get(field))
            .and_then(Item::as_value)
            .ok_or_else(|| AppError::UserInput(format!("Unknown config key '{}'", key)))?;

        let current = doc
            .get(section)
            .and_then(|s| s.get(field))
            .and_then(Item::as_value)
            .unwrap_or(template);

        let mut value = coerce_value(current, raw).ok_or_else(|| {
            AppError::UserInput(format!("Invalid value '{}' for '{}'", raw, key))
        })?;
        // Keep the spacing and trailing comment around the old value.
        *value.decor_mut() = current.decor().clone();

        if !doc.contains_table(section) {
            doc[section] = toml_edit::table();
        }
        doc[section][field] = toml_edit::value(value);

        let updated = doc.to_string();
        let config = Config::parse(&updated)?;
        std::fs::write(config_path, updated)?;
        Ok(config)
    }
}

fn coerce_value(current: &Value, raw: &str) -> Option<Value> {
    match current {
        Value::Boolean(_) => raw.trim().parse::<bool>().ok().map(Value::from),
        Value::Integer(_) => raw.trim().parse::<i64>().ok().map(Value::from),
        Value::Array(_) => {
            let items: Array = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            Some(Value::Array(items))
        }
        _ => Some(Value::from(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::parse(&text).unwrap();

        assert_eq!(parsed, config);
        assert!(text.contains("default_project = \"Inbox\""));
        assert!(text.contains("\"vault\""));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::parse("[general]\ndefault_project = \"Work\"\n").unwrap();

        assert_eq!(config.general.default_project, "Work");
        assert_eq!(config.general.default_due.as_deref(), Some("today"));
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.credentials.token_env, "TODOIST_API_TOKEN");
    }

    #[test]
    fn test_empty_strings_mean_unset() {
        let config = Config::parse(
            "[general]\ndefault_due = \"\"\n[credentials]\napi_token = \"\"\nusername = \"\"\n",
        )
        .unwrap();

        assert_eq!(config.general.default_due, None);
        assert_eq!(config.credentials.api_token, None);
        assert_eq!(config.credentials.username, None);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(Config::parse("[api]\ntimeout_secs = 0\n").is_err());
        assert!(Config::parse("[api]\nbase_url = \"\"\n").is_err());
        assert!(Config::parse("[credentials]\nsources = []\n").is_err());
        assert!(Config::parse("[credentials]\nsources = [\"carrier-pigeon\"]\n").is_err());
    }

    #[test]
    fn test_load_custom_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_custom(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_set_value_keeps_comments_and_types() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let original = concat!(
            "# my settings\n",
            "[general]\n",
            "default_project = \"Inbox\" # where tasks go\n",
            "color = true\n",
        );
        std::fs::write(&path, original).unwrap();

        let config = Config::set_value(&path, "general.default_project", "Errands").unwrap();
        assert_eq!(config.general.default_project, "Errands");

        let config = Config::set_value(&path, "general.color", "false").unwrap();
        assert!(!config.general.color);

        let config = Config::set_value(&path, "api.timeout_secs", "10").unwrap();
        assert_eq!(config.api.timeout_secs, 10);

        let config = Config::set_value(&path, "credentials.sources", "env, prompt").unwrap();
        assert_eq!(config.credentials.sources, vec![TokenSource::Env, TokenSource::Prompt]);

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# my settings"));
        assert!(text.contains("default_project = \"Errands\" # where tasks go\n"));
        assert!(text.contains("color = false\n"));
    }

    #[test]
    fn test_login_name_follows_env_order_then_home() {
        let env = |vars: &'static [(&'static str, &'static str)]| {
            move |name: &str| {
                vars.iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| v.to_string())
            }
        };
        let home = Some(PathBuf::from("/home/carol"));

        let both = env(&[("USER", "bob"), ("LOGNAME", "alice")]);
        assert_eq!(login_name(both, home.clone()), "alice");

        let blank_logname = env(&[("LOGNAME", " "), ("USERNAME", "dave")]);
        assert_eq!(login_name(blank_logname, home.clone()), "dave");

        assert_eq!(login_name(env(&[]), home), "carol");
        assert_eq!(login_name(env(&[]), None), "default");
    }

    #[test]
    fn test_configured_username_wins() {
        let creds = CredentialsConfig {
            username: Some("eve".to_string()),
            ..CredentialsConfig::default()
        };
        assert_eq!(creds.resolved_username(), "eve");
        assert_eq!(creds.service_id, DEFAULT_SERVICE_ID);
    }

    #[test]
    fn test_set_value_rejects_unknown_keys_and_bad_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save_to(&path).unwrap();

        assert!(matches!(
            Config::set_value(&path, "general.nope", "x"),
            Err(AppError::UserInput(_))
        ));
        assert!(matches!(
            Config::set_value(&path, "nodot", "x"),
            Err(AppError::UserInput(_))
        ));
        assert!(matches!(
            Config::set_value(&path, "general.color", "maybe"),
            Err(AppError::UserInput(_))
        ));
        assert!(Config::set_value(&path, "api.timeout_secs", "0").is_err());
    }
}
