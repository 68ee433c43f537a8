//! Application password management over a [`SettingsStore`].
//!
//! Two settings back the password:
//!
//! ```text
//! authentication_salt   = hex(salt)
//! application_password  = hex(PBKDF2(password, salt))
//! ```
//!
//! The stored token is also the key that encrypts private keys, so changing
//! the password means re-encrypting every blob (see [`PasswordManager::change_password`]).

use tracing::{debug, info, instrument, warn};

use nem_core::config::{KdfParams, KeyLength};
use nem_core::error::{NemError, Result};
use nem_core::traits::SettingsStore;
use nem_core::types::{DerivedPasswordKey, EncryptedPrivateKeyBlob, PasswordRecord, Salt};
use nem_crypto::kdf;

use crate::store::reencrypt;

/// Sets and checks the application password.
pub struct PasswordManager<S: SettingsStore> {
    store: S,
    params: KdfParams,
}

impl<S: SettingsStore> PasswordManager<S> {
    /// Creates a manager over `store` using `params` for every derivation.
    pub fn new(store: S, params: KdfParams) -> Self {
        Self { store, params }
    }

    /// Returns the settings store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the KDF parameters.
    pub fn params(&self) -> &KdfParams {
        &self.params
    }

    /// Reads the stored salt. An empty value counts as absent.
    pub fn stored_salt(&self) -> Result<Option<Salt>> {
        let stored = self.store.authentication_salt()?;
        Salt::from_stored(stored.as_deref())
    }

    /// Reads the stored token. An empty value counts as absent.
    pub fn stored_token(&self) -> Result<Option<DerivedPasswordKey>> {
        match self.store.application_password()?.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(hex) => DerivedPasswordKey::from_hex(hex).map(Some),
        }
    }

    /// Returns true once both salt and token are stored.
    pub fn is_password_set(&self) -> Result<bool> {
        Ok(self.stored_salt()?.is_some() && self.stored_token()?.is_some())
    }

    /// Derives and persists a new password token.
    ///
    /// Follows the configured [`SaltPolicy`](nem_core::SaltPolicy) for the salt.
    #[instrument(skip_all)]
    pub fn set_password(&self, password: &str) -> Result<PasswordRecord> {
        let record = self.prepare(password)?;
        self.persist(&record)?;
        info!("Application password set");
        Ok(record)
    }

    /// Checks a candidate password. Fails closed on any storage error.
    #[instrument(skip_all)]
    pub fn check_password(&self, candidate: &str) -> bool {
        let (salt, token) = match (self.stored_salt(), self.stored_token()) {
            (Ok(salt), Ok(token)) => (salt, token),
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Cannot read stored password settings");
                return false;
            }
        };

        let ok = kdf::check_password(candidate, salt.as_ref(), token.as_ref(), &self.params);
        debug!(ok, "Password checked");
        ok
    }

    /// Verifies `password` and returns the key protecting private keys.
    ///
    /// # Errors
    /// `PasswordNotSet` if nothing is stored, `InvalidPassword` on mismatch.
    pub fn derived_key(&self, password: &str) -> Result<DerivedPasswordKey> {
        let (Some(salt), Some(token)) = (self.stored_salt()?, self.stored_token()?) else {
            return Err(NemError::PasswordNotSet);
        };

        let params = self.params_for(&token)?;
        let derived = kdf::derive_key(password, &salt, &params)?;
        if !derived.ct_eq(&token) {
            return Err(NemError::InvalidPassword);
        }
        Ok(derived)
    }

    /// Replaces the password and re-encrypts `blobs` under the new key.
    ///
    /// Nothing is written unless the old password verifies and every blob
    /// re-encrypts. The returned blobs are in input order.
    #[instrument(skip_all, fields(blobs = blobs.len()))]
    pub fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        blobs: &[EncryptedPrivateKeyBlob],
    ) -> Result<Vec<EncryptedPrivateKeyBlob>> {
        let old_key = self.derived_key(old_password)?;
        let record = self.prepare(new_password)?;

        let reencrypted = blobs
            .iter()
            .map(|blob| reencrypt(blob, &old_key, &record.token))
            .collect::<Result<Vec<_>>>()?;

        self.persist(&record)?;
        info!(count = reencrypted.len(), "Password changed");
        Ok(reencrypted)
    }

    fn prepare(&self, password: &str) -> Result<PasswordRecord> {
        let existing = self.stored_salt()?;
        kdf::set_password(password, existing.as_ref(), &self.params)
    }

    fn persist(&self, record: &PasswordRecord) -> Result<()> {
        self.store
            .set_password_record(&record.salt_hex(), &record.token_hex())
    }

    // Tokens written with a different key length stay usable.
    fn params_for(&self, token: &DerivedPasswordKey) -> Result<KdfParams> {
        if token.len() == self.params.key_len.bytes() {
            return Ok(self.params);
        }
        let key_len = KeyLength::from_bytes(token.len())?;
        Ok(self.params.with_key_len(key_len))
    }
}

impl<S: SettingsStore> std::fmt::Debug for PasswordManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordManager")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySettingsStore;
    use crate::store::protect_with_key;
    use nem_core::config::SaltPolicy;
    use nem_core::types::PrivateKey;

    const SALT: &str = "2399ff99c31a18a519c8e477c3ab9e8e1e97af883bab0367e9c6a226149eb0f9";
    const TOKEN: &str = "9b316300436d1dd4f7d5575a5f6227a67ef0491f2e523a0385f508a20438e6e9";

    fn manager() -> PasswordManager<MemorySettingsStore> {
        PasswordManager::new(MemorySettingsStore::new(), KdfParams::default().with_rounds(10))
    }

    #[test]
    fn test_not_set_initially() {
        let manager = manager();
        assert!(!manager.is_password_set().unwrap());
        assert!(!manager.check_password("anything"));
        assert!(!manager.check_password(""));
        assert!(matches!(manager.derived_key("x"), Err(NemError::PasswordNotSet)));
    }

    #[test]
    fn test_set_then_check() {
        let manager = manager();
        let record = manager.set_password("correct horse").unwrap();

        assert!(manager.is_password_set().unwrap());
        assert_eq!(
            manager.store().authentication_salt().unwrap(),
            Some(record.salt_hex())
        );
        assert!(manager.check_password("correct horse"));
        assert!(manager.check_password("correct horse"));
        assert!(!manager.check_password("correct horse "));
        assert!(!manager.check_password("battery staple"));
    }

    #[test]
    fn test_stored_vector() {
        let manager = PasswordManager::new(
            MemorySettingsStore::with_values(SALT, TOKEN),
            KdfParams::default(),
        );
        assert!(manager.check_password("123123"));
        assert_eq!(manager.derived_key("123123").unwrap().to_hex(), TOKEN);
        assert!(matches!(manager.derived_key("321321"), Err(NemError::InvalidPassword)));
    }

    #[test]
    fn test_empty_stored_salt_counts_as_absent() {
        let manager = PasswordManager::new(
            MemorySettingsStore::with_values("", TOKEN),
            KdfParams::default().with_rounds(10),
        );
        assert!(!manager.is_password_set().unwrap());
        assert!(!manager.check_password("123123"));

        manager.set_password("pw").unwrap();
        assert_eq!(manager.stored_salt().unwrap().unwrap().len(), 32);
    }

    #[test]
    fn test_corrupt_settings_fail_closed() {
        let manager = PasswordManager::new(
            MemorySettingsStore::with_values("not hex", TOKEN),
            KdfParams::default(),
        );
        assert!(!manager.check_password("123123"));
        assert!(manager.derived_key("123123").is_err());
    }

    #[test]
    fn test_salt_kept_across_password_changes() {
        let manager = manager();
        let first = manager.set_password("one").unwrap();
        let second = manager.set_password("two").unwrap();

        assert_eq!(first.salt, second.salt);
        assert!(!manager.check_password("one"));
        assert!(manager.check_password("two"));
    }

    #[test]
    fn test_salt_regenerated_when_configured() {
        let manager = PasswordManager::new(
            MemorySettingsStore::new(),
            KdfParams::default()
                .with_rounds(10)
                .with_salt_policy(SaltPolicy::Regenerate),
        );
        let first = manager.set_password("one").unwrap();
        let second = manager.set_password("two").unwrap();
        assert_ne!(first.salt, second.salt);
    }

    #[test]
    fn test_change_password_reencrypts() {
        let manager = manager();
        manager.set_password("old").unwrap();
        let old_key = manager.derived_key("old").unwrap();

        let private = PrivateKey::from_array([7u8; 32]);
        let blob = protect_with_key(&private, &old_key).unwrap();

        let updated = manager.change_password("old", "new", &[blob]).unwrap();
        assert_eq!(updated.len(), 1);
        assert!(manager.check_password("new"));
        assert!(!manager.check_password("old"));

        let new_key = manager.derived_key("new").unwrap();
        let revealed = crate::store::reveal_with_key(&updated[0], &new_key).unwrap();
        assert_eq!(revealed.as_bytes(), private.as_bytes());
    }

    #[test]
    fn test_change_password_wrong_old_leaves_store() {
        let manager = manager();
        manager.set_password("old").unwrap();

        let result = manager.change_password("wrong", "new", &[]);
        assert!(matches!(result, Err(NemError::InvalidPassword)));
        assert!(manager.check_password("old"));
    }

    // Token writes fail once `refuse_token` is set.
    #[derive(Default)]
    struct TokenWriteFails {
        inner: MemorySettingsStore,
        refuse_token: std::sync::atomic::AtomicBool,
    }

    impl SettingsStore for TokenWriteFails {
        fn authentication_salt(&self) -> Result<Option<String>> {
            self.inner.authentication_salt()
        }

        fn set_authentication_salt(&self, salt_hex: &str) -> Result<()> {
            self.inner.set_authentication_salt(salt_hex)
        }

        fn application_password(&self) -> Result<Option<String>> {
            self.inner.application_password()
        }

        fn set_application_password(&self, token_hex: &str) -> Result<()> {
            if self.refuse_token.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(NemError::StorageError("disk full".into()));
            }
            self.inner.set_application_password(token_hex)
        }
    }

    #[test]
    fn test_failed_token_write_keeps_old_password() {
        let manager = PasswordManager::new(
            TokenWriteFails::default(),
            KdfParams::default()
                .with_rounds(10)
                .with_salt_policy(SaltPolicy::Regenerate),
        );
        manager.set_password("old").unwrap();
        let salt_before = manager.stored_salt().unwrap();

        manager
            .store()
            .refuse_token
            .store(true, std::sync::atomic::Ordering::SeqCst);

        let result = manager.change_password("old", "new", &[]);
        assert!(matches!(result, Err(NemError::StorageError(_))));
        assert_eq!(manager.stored_salt().unwrap(), salt_before);
        assert!(manager.check_password("old"));
        assert!(!manager.check_password("new"));

        assert!(manager.set_password("new").is_err());
        assert!(manager.check_password("old"));
    }
}
