use crate::config::Config;
use crate::credentials::{CredentialResolver, CredentialSettings, KeyringVault};
use crate::utils::error::AppResult;
use crate::utils::{TerminalPrompter, print_info, print_success};

pub fn handle_logout_command(config: &Config) -> AppResult<()> {
    let settings = CredentialSettings::from_config(config);
    let vault = KeyringVault;
    let prompter = TerminalPrompter;

    let forgotten = CredentialResolver::new(&settings, &vault, &prompter).forget()?;

    if forgotten.token {
        print_success("Todoist API token deleted");
    } else {
        print_info("You already did not have a Todoist API token saved");
    }
    if forgotten.project_id {
        print_success("Todoist project ID deleted");
    } else {
        print_info("You already did not have a Todoist project ID saved");
    }
    Ok(())
}
