//! In-memory settings store.
//!
//! Thread-safe storage for tests and short-lived processes. Nothing is
//! persisted.

use parking_lot::RwLock;
use tracing::debug;

use nem_core::error::Result;
use nem_core::traits::SettingsStore;

#[derive(Debug, Default, Clone)]
struct Settings {
    authentication_salt: Option<String>,
    application_password: Option<String>,
}

/// In-memory implementation of [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding previously persisted values.
    pub fn with_values(salt_hex: impl Into<String>, token_hex: impl Into<String>) -> Self {
        Self {
            settings: RwLock::new(Settings {
                authentication_salt: Some(salt_hex.into()),
                application_password: Some(token_hex.into()),
            }),
        }
    }

    /// Forgets both settings.
    pub fn clear(&self) {
        *self.settings.write() = Settings::default();
        debug!("Settings cleared");
    }
}

impl SettingsStore for MemorySettingsStore {
    fn authentication_salt(&self) -> Result<Option<String>> {
        Ok(self.settings.read().authentication_salt.clone())
    }

    fn set_authentication_salt(&self, salt_hex: &str) -> Result<()> {
        self.settings.write().authentication_salt = Some(salt_hex.to_string());
        Ok(())
    }

    fn application_password(&self) -> Result<Option<String>> {
        Ok(self.settings.read().application_password.clone())
    }

    fn set_application_password(&self, token_hex: &str) -> Result<()> {
        self.settings.write().application_password = Some(token_hex.to_string());
        Ok(())
    }

    fn set_password_record(&self, salt_hex: &str, token_hex: &str) -> Result<()> {
        let mut settings = self.settings.write();
        settings.authentication_salt = Some(salt_hex.to_string());
        settings.application_password = Some(token_hex.to_string());
        Ok(())
    }
}
