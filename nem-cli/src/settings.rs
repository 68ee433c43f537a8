//! JSON file settings store.
//!
//! Keeps the authentication salt and password token in a small JSON file:
//!
//! ```json
//! {
//!   "authentication_salt": "2399ff99...",
//!   "application_password": "9b316300..."
//! }
//! ```
//!
//! Every write rewrites the whole file through a temporary sibling that is
//! renamed into place.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use nem_core::error::{NemError, Result};
use nem_core::traits::SettingsStore;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    authentication_salt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    application_password: Option<String>,
}

/// Settings store backed by a JSON file.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    settings: RwLock<SettingsFile>,
}

impl FileSettingsStore {
    /// Opens the store at `path`, loading it if the file exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let settings = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                NemError::StorageError(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let settings: SettingsFile = serde_json::from_str(&contents).map_err(|e| {
                NemError::StorageError(format!("Invalid settings file {}: {}", path.display(), e))
            })?;
            debug!(path = ?path, "Settings loaded");
            settings
        } else {
            SettingsFile::default()
        };

        Ok(Self {
            path,
            settings: RwLock::new(settings),
        })
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip_all)]
    fn save(&self, settings: &SettingsFile) -> Result<()> {
        let serialized = serde_json::to_string_pretty(settings)
            .map_err(|e| NemError::StorageError(e.to_string()))?;

        let io_err = |e: std::io::Error| {
            NemError::StorageError(format!("Failed to write {}: {}", self.path.display(), e))
        };

        // Write atomically (write to temp, then rename)
        let temp_path = self.path.with_extension("tmp");
        let mut file = File::create(&temp_path).map_err(io_err)?;
        file.write_all(serialized.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        std::fs::rename(&temp_path, &self.path).map_err(io_err)?;

        info!(path = ?self.path, "Settings saved");
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut SettingsFile),
    {
        let mut settings = self.settings.write();
        let mut next = settings.clone();
        apply(&mut next);
        self.save(&next)?;
        *settings = next;
        Ok(())
    }
}

impl SettingsStore for FileSettingsStore {
    fn authentication_salt(&self) -> Result<Option<String>> {
        Ok(self.settings.read().authentication_salt.clone())
    }

    fn set_authentication_salt(&self, salt_hex: &str) -> Result<()> {
        self.update(|s| s.authentication_salt = Some(salt_hex.to_string()))
    }

    fn application_password(&self) -> Result<Option<String>> {
        Ok(self.settings.read().application_password.clone())
    }

    fn set_application_password(&self, token_hex: &str) -> Result<()> {
        self.update(|s| s.application_password = Some(token_hex.to_string()))
    }

    fn set_password_record(&self, salt_hex: &str, token_hex: &str) -> Result<()> {
        self.update(|s| {
            s.authentication_salt = Some(salt_hex.to_string());
            s.application_password = Some(token_hex.to_string());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nem_core::KdfParams;
    use nem_keystore::PasswordManager;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::open(dir.path().join("settings.json")).unwrap();

        assert!(store.authentication_salt().unwrap().is_none());
        assert!(store.application_password().unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        {
            let store = FileSettingsStore::open(&path).unwrap();
            store.set_authentication_salt("abcd").unwrap();
            store.set_application_password("ef01").unwrap();
        }

        let reopened = FileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.authentication_salt().unwrap().as_deref(), Some("abcd"));
        assert_eq!(reopened.application_password().unwrap().as_deref(), Some("ef01"));
    }

    #[test]
    fn test_reads_existing_wallet_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "authentication_salt": "2399ff99c31a18a519c8e477c3ab9e8e1e97af883bab0367e9c6a226149eb0f9",
                "application_password": "9b316300436d1dd4f7d5575a5f6227a67ef0491f2e523a0385f508a20438e6e9"
            }"#,
        )
        .unwrap();

        let manager = PasswordManager::new(FileSettingsStore::open(&path).unwrap(), KdfParams::default());
        assert!(manager.check_password("123123"));
        assert!(!manager.check_password("123"));
    }

    #[test]
    fn test_password_manager_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let params = KdfParams::default().with_rounds(10);
        PasswordManager::new(FileSettingsStore::open(&path).unwrap(), params)
            .set_password("file pw")
            .unwrap();

        let manager = PasswordManager::new(FileSettingsStore::open(&path).unwrap(), params);
        assert!(manager.check_password("file pw"));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileSettingsStore::open(&path).unwrap();
        store.set_password_record("abcd", "ef01").unwrap();
        store.set_application_password("2345").unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("settings.json")]);

        let reopened = FileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.authentication_salt().unwrap().as_deref(), Some("abcd"));
        assert_eq!(reopened.application_password().unwrap().as_deref(), Some("2345"));
    }

    #[test]
    fn test_failed_save_keeps_previous_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileSettingsStore::open(&path).unwrap();
        store.set_password_record("abcd", "ef01").unwrap();

        // A directory in the temp file's place makes the write fail.
        std::fs::create_dir(path.with_extension("tmp")).unwrap();
        assert!(matches!(
            store.set_password_record("9999", "8888"),
            Err(NemError::StorageError(_))
        ));

        assert_eq!(store.authentication_salt().unwrap().as_deref(), Some("abcd"));
        let reopened = FileSettingsStore::open(&path).unwrap();
        assert_eq!(reopened.authentication_salt().unwrap().as_deref(), Some("abcd"));
        assert_eq!(reopened.application_password().unwrap().as_deref(), Some("ef01"));
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            FileSettingsStore::open(&path),
            Err(NemError::StorageError(_))
        ));
    }
}
