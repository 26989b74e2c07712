use crate::core::traits::SecretVault;
use crate::utils::error::{AppError, AppResult};
use keyring::Entry;

/// OS keyring (Keychain, Credential Manager, Secret Service / keyutils)
pub struct KeyringVault;

fn entry(service: &str, key: &str) -> AppResult<Entry> {
    Entry::new(service, key)
        .map_err(|e| AppError::Vault(format!("Failed to open keyring entry '{}': {}", key, e)))
}

impl SecretVault for KeyringVault {
    fn get(&self, service: &str, key: &str) -> AppResult<Option<String>> {
        match entry(service, key)?.get_password() {
            Ok(secret) => Ok(Some(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AppError::Vault(format!("Failed to read '{}': {}", key, e))),
        }
    }

    fn set(&self, service: &str, key: &str, value: &str) -> AppResult<()> {
        entry(service, key)?
            .set_password(value)
            .map_err(|e| AppError::Vault(format!("Failed to save '{}': {}", key, e)))
    }

    fn delete(&self, service: &str, key: &str) -> AppResult<bool> {
        match entry(service, key)?.delete_credential() {
            Ok(()) => Ok(true),
            Err(keyring::Error::NoEntry) => Ok(false),
            Err(e) => Err(AppError::Vault(format!("Failed to delete '{}': {}", key, e))),
        }
    }
}
