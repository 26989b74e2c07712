use crate::cli::ConfigCommands;
use crate::config::{Config, TokenSource};
use crate::utils;
use crate::utils::error::AppResult;
use crate::utils::output::OutputStyle;
use std::path::Path;

pub fn handle_config_command(
    config: &Config,
    config_path: &Path,
    command: Option<ConfigCommands>,
) -> AppResult<()> {
    match command {
        Some(ConfigCommands::Show) => handle_show_command(config, config_path),
        Some(ConfigCommands::Path) => {
            println!("{}", config_path.display());
            Ok(())
        }
        Some(ConfigCommands::Reset { force }) => handle_reset_command(config_path, force),
        Some(ConfigCommands::Set { key, value }) => handle_set_command(config_path, &key, &value),
        None => handle_config_help(config_path),
    }
}

fn handle_show_command(config: &Config, config_path: &Path) -> AppResult<()> {
    OutputStyle::print_header("⚙️  todo-cli Configuration");
    println!("{}", OutputStyle::muted(&config_path.display().to_string()));

    println!("{}", OutputStyle::header("General"));
    OutputStyle::print_field("Default project", &config.general.default_project);
    OutputStyle::print_field(
        "Default due",
        config.general.default_due.as_deref().unwrap_or("(none)"),
    );
    OutputStyle::print_field("Color", &config.general.color.to_string());

    println!("{}", OutputStyle::header("API"));
    OutputStyle::print_field("Base URL", &config.api.base_url);
    OutputStyle::print_field("Timeout", &format!("{}s", config.api.timeout_secs));

    let creds = &config.credentials;
    println!("{}", OutputStyle::header("Credentials"));
    OutputStyle::print_field("Keyring service", &creds.service_id);
    OutputStyle::print_field("Username", &creds.resolved_username());
    OutputStyle::print_field("Sources", &source_list(&creds.sources));
    OutputStyle::print_field("Token env var", &creds.token_env);
    if creds.api_token.is_some() {
        OutputStyle::print_field("API token", "✓");
    }
    OutputStyle::print_field("Offer to save", &creds.offer_to_save.to_string());

    Ok(())
}

fn source_list(sources: &[TokenSource]) -> String {
    sources
        .iter()
        .map(|s| match s {
            TokenSource::Vault => "vault",
            TokenSource::Env => "env",
            TokenSource::Config => "config",
            TokenSource::Prompt => "prompt",
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

fn handle_config_help(config_path: &Path) -> AppResult<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  todo config show             - Show current configuration");
    println!("  todo config path             - Print the configuration file location");
    println!("  todo config reset            - Reset configuration to defaults");
    println!("  todo config set <KEY> <VAL>  - Change one setting, e.g. general.default_project");
    println!();
    println!("Configuration file location: {}", config_path.display());
    Ok(())
}

fn handle_reset_command(config_path: &Path, force: bool) -> AppResult<()> {
    if force
        || utils::prompt_yes_no(
            "Reset configuration to defaults? This overwrites your current settings.",
        )?
    {
        Config::default().save_to(config_path)?;
        utils::print_success("Configuration reset to defaults");
    } else {
        println!("Reset cancelled.");
    }
    Ok(())
}

fn handle_set_command(config_path: &Path, key: &str, value: &str) -> AppResult<()> {
    Config::set_value(config_path, key, value)?;
    utils::print_success(&format!("{} = {}", key, value));
    Ok(())
}
