//! Storage port consumed by the password manager.
//!
//! The application decides where settings live (keychain, database, file);
//! this crate only reads and writes two hex strings through this trait.

use std::sync::Arc;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// SETTINGS STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Key-value access to the stored password settings.
///
/// Implementations might use:
/// - In-memory storage (tests, short-lived tools)
/// - A JSON file (the `nemkey` CLI)
/// - Platform secure storage (wallet apps)
pub trait SettingsStore: Send + Sync {
    /// Returns the hex-encoded authentication salt, if one was stored.
    fn authentication_salt(&self) -> Result<Option<String>>;

    /// Stores the hex-encoded authentication salt.
    fn set_authentication_salt(&self, salt_hex: &str) -> Result<()>;

    /// Returns the hex-encoded password verification token, if one was stored.
    fn application_password(&self) -> Result<Option<String>>;

    /// Stores the hex-encoded password verification token.
    fn set_application_password(&self, token_hex: &str) -> Result<()>;

    /// Stores salt and token together.
    ///
    /// On error the previous salt must still be in place, since a new salt
    /// next to an old token verifies no password at all. The default writes
    /// the salt, then the token, and puts the old salt back if the token
    /// write fails. Stores that can write both at once should override this.
    fn set_password_record(&self, salt_hex: &str, token_hex: &str) -> Result<()> {
        let previous = self.authentication_salt()?;
        self.set_authentication_salt(salt_hex)?;

        if let Err(e) = self.set_application_password(token_hex) {
            if let Some(previous) = previous {
                self.set_authentication_salt(&previous)?;
            }
            return Err(e);
        }
        Ok(())
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for Arc<T> {
    fn authentication_salt(&self) -> Result<Option<String>> {
        (**self).authentication_salt()
    }

    fn set_authentication_salt(&self, salt_hex: &str) -> Result<()> {
        (**self).set_authentication_salt(salt_hex)
    }

    fn application_password(&self) -> Result<Option<String>> {
        (**self).application_password()
    }

    fn set_application_password(&self, token_hex: &str) -> Result<()> {
        (**self).set_application_password(token_hex)
    }

    fn set_password_record(&self, salt_hex: &str, token_hex: &str) -> Result<()> {
        (**self).set_password_record(salt_hex, token_hex)
    }
}

impl<T: SettingsStore + ?Sized> SettingsStore for &T {
    fn authentication_salt(&self) -> Result<Option<String>> {
        (**self).authentication_salt()
    }

    fn set_authentication_salt(&self, salt_hex: &str) -> Result<()> {
        (**self).set_authentication_salt(salt_hex)
    }

    fn application_password(&self) -> Result<Option<String>> {
        (**self).application_password()
    }

    fn set_application_password(&self, token_hex: &str) -> Result<()> {
        (**self).set_application_password(token_hex)
    }

    fn set_password_record(&self, salt_hex: &str, token_hex: &str) -> Result<()> {
        (**self).set_password_record(salt_hex, token_hex)
    }
}
