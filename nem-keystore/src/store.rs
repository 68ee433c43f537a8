//! Encrypted private key store.
//!
//! Protects private keys with the key derived from the application password
//! and checks imported keys against known accounts.
//!
//! ## Protect / Reveal Flow
//!
//! ```text
//! password ──PBKDF2(stored salt)──► key ──┐
//!                                         ├─ AES-CBC ─► IV || ciphertext
//! private key (32 bytes) ─────────────────┘
//! ```

use tracing::{debug, info, instrument, warn};
use zeroize::Zeroizing;

use nem_core::config::CryptoConfig;
use nem_core::error::{NemError, Result};
use nem_core::traits::SettingsStore;
use nem_core::types::{
    DerivedPasswordKey, EncryptedPrivateKeyBlob, NetworkVersion, PrivateKey, PublicKey,
};
use nem_crypto::{derive_address, generate_iv, generate_public_key, SymmetricCipher};

use crate::password::PasswordManager;

// ═══════════════════════════════════════════════════════════════════════════════
// KEY-LEVEL OPERATIONS
// ═══════════════════════════════════════════════════════════════════════════════

/// Encrypts a private key under `key` with a fresh IV.
pub fn protect_with_key(
    private_key: &PrivateKey,
    key: &DerivedPasswordKey,
) -> Result<EncryptedPrivateKeyBlob> {
    let iv = generate_iv()?;
    let cipher = SymmetricCipher::new(key.as_bytes(), &iv)?;
    let ciphertext = cipher.encrypt(private_key.as_bytes());
    EncryptedPrivateKeyBlob::new(iv, ciphertext)
}

/// Decrypts a blob under `key`.
///
/// Every failure, including a plaintext of the wrong size, is reported as
/// `DecryptionFailed`.
pub fn reveal_with_key(
    blob: &EncryptedPrivateKeyBlob,
    key: &DerivedPasswordKey,
) -> Result<PrivateKey> {
    let cipher =
        SymmetricCipher::new(key.as_bytes(), blob.iv()).map_err(|_| NemError::DecryptionFailed)?;
    let plaintext = Zeroizing::new(cipher.decrypt(blob.ciphertext())?);
    PrivateKey::from_bytes(&plaintext).map_err(|_| NemError::DecryptionFailed)
}

/// Moves a blob from `old_key` to `new_key`.
pub fn reencrypt(
    blob: &EncryptedPrivateKeyBlob,
    old_key: &DerivedPasswordKey,
    new_key: &DerivedPasswordKey,
) -> Result<EncryptedPrivateKeyBlob> {
    let private_key = reveal_with_key(blob, old_key)?;
    protect_with_key(&private_key, new_key)
}

/// Fails with `AccountAlreadyPresent` if `private_key` belongs to a known account.
pub fn validate_does_not_exist(
    private_key: &PrivateKey,
    known_accounts: &[PublicKey],
    network: NetworkVersion,
) -> Result<()> {
    let public_key = generate_public_key(private_key);

    if known_accounts.contains(&public_key) {
        let address = derive_address(&public_key, network);
        debug!(%address, "Account already present");
        return Err(NemError::AccountAlreadyPresent {
            public_key: public_key.to_hex(),
            address: address.to_string(),
        });
    }

    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// FAÇADE
// ═══════════════════════════════════════════════════════════════════════════════

/// Password-based private key protection.
#[derive(Debug)]
pub struct EncryptedPrivateKeyStore<S: SettingsStore> {
    passwords: PasswordManager<S>,
    network: NetworkVersion,
}

impl<S: SettingsStore> EncryptedPrivateKeyStore<S> {
    /// Creates a store over an existing password manager.
    pub fn new(passwords: PasswordManager<S>, network: NetworkVersion) -> Self {
        Self { passwords, network }
    }

    /// Creates a store from a settings port and configuration.
    pub fn from_config(settings: S, config: &CryptoConfig) -> Self {
        Self::new(PasswordManager::new(settings, config.kdf), config.network)
    }

    /// Returns the password manager.
    pub fn password_manager(&self) -> &PasswordManager<S> {
        &self.passwords
    }

    /// Returns the network used for addresses.
    pub fn network(&self) -> NetworkVersion {
        self.network
    }

    /// Encrypts a private key under the application password.
    ///
    /// # Errors
    /// `PasswordNotSet` or `InvalidPassword` if the password does not verify.
    #[instrument(skip_all)]
    pub fn protect(&self, private_key: &PrivateKey, password: &str) -> Result<EncryptedPrivateKeyBlob> {
        let key = self.passwords.derived_key(password)?;
        let blob = protect_with_key(private_key, &key)?;
        debug!(ciphertext_len = blob.ciphertext().len(), "Private key protected");
        Ok(blob)
    }

    /// Decrypts a private key.
    ///
    /// Wrong passwords and corrupted blobs both give `DecryptionFailed`.
    #[instrument(skip_all)]
    pub fn reveal(&self, blob: &EncryptedPrivateKeyBlob, password: &str) -> Result<PrivateKey> {
        let key = self.passwords.derived_key(password).map_err(|e| {
            warn!(error = %e, "Cannot derive decryption key");
            NemError::DecryptionFailed
        })?;
        reveal_with_key(blob, &key)
    }

    /// Encrypts with an already derived key.
    pub fn protect_with_key(
        &self,
        private_key: &PrivateKey,
        key: &DerivedPasswordKey,
    ) -> Result<EncryptedPrivateKeyBlob> {
        protect_with_key(private_key, key)
    }

    /// Decrypts with an already derived key.
    pub fn reveal_with_key(
        &self,
        blob: &EncryptedPrivateKeyBlob,
        key: &DerivedPasswordKey,
    ) -> Result<PrivateKey> {
        reveal_with_key(blob, key)
    }

    /// Moves a blob from `old_key` to `new_key`.
    pub fn reencrypt(
        &self,
        blob: &EncryptedPrivateKeyBlob,
        old_key: &DerivedPasswordKey,
        new_key: &DerivedPasswordKey,
    ) -> Result<EncryptedPrivateKeyBlob> {
        reencrypt(blob, old_key, new_key)
    }

    /// Checks `private_key` against already known public keys.
    pub fn validate_does_not_exist(
        &self,
        private_key: &PrivateKey,
        known_accounts: &[PublicKey],
    ) -> Result<()> {
        validate_does_not_exist(private_key, known_accounts, self.network)
    }

    /// Changes the password and re-encrypts `blobs`.
    #[instrument(skip_all)]
    pub fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
        blobs: &[EncryptedPrivateKeyBlob],
    ) -> Result<Vec<EncryptedPrivateKeyBlob>> {
        let updated = self
            .passwords
            .change_password(old_password, new_password, blobs)?;
        info!(count = updated.len(), "Private keys re-encrypted");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySettingsStore;
    use nem_core::config::{KdfParams, KeyLength};
    use proptest::prelude::*;

    const SALT: &str = "2399ff99c31a18a519c8e477c3ab9e8e1e97af883bab0367e9c6a226149eb0f9";
    const TOKEN: &str = "9b316300436d1dd4f7d5575a5f6227a67ef0491f2e523a0385f508a20438e6e9";
    const STORED_BLOB: &str = "86234100b8bc3c337779380a2c80287a7b439170b179c8097f3e1532bd9659dc\
                               34f6c2bf5439bfce43d4216580cf9f67a498b917b684842d11aa22abe2f4d85f";
    const STORED_PRIVATE: &str = "3f996eafce31549cb6271b5c5b9626e26322ebd0225b559bfd135f9fbaf6bf3a";

    fn store_with_password(password: &str) -> EncryptedPrivateKeyStore<MemorySettingsStore> {
        let passwords =
            PasswordManager::new(MemorySettingsStore::new(), KdfParams::default().with_rounds(10));
        passwords.set_password(password).unwrap();
        EncryptedPrivateKeyStore::new(passwords, NetworkVersion::Testnet)
    }

    #[test]
    fn test_protect_reveal_roundtrip() {
        let store = store_with_password("p");
        let private = PrivateKey::from_hex(STORED_PRIVATE).unwrap();

        let blob = store.protect(&private, "p").unwrap();
        assert_eq!(blob.to_hex().len(), 128);

        let revealed = store.reveal(&blob, "p").unwrap();
        assert_eq!(revealed.as_bytes(), private.as_bytes());
    }

    #[test]
    fn test_protect_is_randomized() {
        let store = store_with_password("p");
        let private = PrivateKey::from_hex(STORED_PRIVATE).unwrap();

        let a = store.protect(&private, "p").unwrap();
        let b = store.protect(&private, "p").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_password() {
        let store = store_with_password("p");
        let private = PrivateKey::from_hex(STORED_PRIVATE).unwrap();
        let blob = store.protect(&private, "p").unwrap();

        assert!(matches!(store.reveal(&blob, "q"), Err(NemError::DecryptionFailed)));
        assert!(matches!(store.protect(&private, "q"), Err(NemError::InvalidPassword)));
    }

    #[test]
    fn test_reveal_without_password_set() {
        let store = EncryptedPrivateKeyStore::from_config(
            MemorySettingsStore::new(),
            &CryptoConfig::default(),
        );
        let blob = EncryptedPrivateKeyBlob::from_hex(STORED_BLOB).unwrap();
        assert!(matches!(store.reveal(&blob, "123123"), Err(NemError::DecryptionFailed)));
    }

    #[test]
    fn test_reveal_stored_blob() {
        let store = EncryptedPrivateKeyStore::from_config(
            MemorySettingsStore::with_values(SALT, TOKEN),
            &CryptoConfig::default(),
        );
        let blob = EncryptedPrivateKeyBlob::from_hex(STORED_BLOB).unwrap();

        let private = store.reveal(&blob, "123123").unwrap();
        assert_eq!(private.to_hex().as_str(), STORED_PRIVATE);
    }

    #[test]
    fn test_reveal_with_wrong_key_fails() {
        let blob = EncryptedPrivateKeyBlob::from_hex(STORED_BLOB).unwrap();
        let right = DerivedPasswordKey::from_hex(TOKEN).unwrap();
        let wrong = DerivedPasswordKey::from_bytes(vec![0u8; 32]).unwrap();

        assert!(reveal_with_key(&blob, &right).is_ok());
        // Garbage that happens to unpad is still rejected unless it is 32 bytes.
        assert!(matches!(reveal_with_key(&blob, &wrong), Err(NemError::DecryptionFailed)));
    }

    #[test]
    fn test_aes128_keys() {
        let passwords = PasswordManager::new(
            MemorySettingsStore::new(),
            KdfParams::default()
                .with_rounds(10)
                .with_key_len(KeyLength::Aes128),
        );
        passwords.set_password("short").unwrap();
        let store = EncryptedPrivateKeyStore::new(passwords, NetworkVersion::Mainnet);

        let private = PrivateKey::from_array([9u8; 32]);
        let blob = store.protect(&private, "short").unwrap();
        assert_eq!(store.reveal(&blob, "short").unwrap().as_bytes(), private.as_bytes());
    }

    #[test]
    fn test_reencrypt() {
        let old_key = DerivedPasswordKey::from_bytes(vec![1u8; 32]).unwrap();
        let new_key = DerivedPasswordKey::from_bytes(vec![2u8; 32]).unwrap();
        let private = PrivateKey::from_array([3u8; 32]);

        let blob = protect_with_key(&private, &old_key).unwrap();
        let moved = reencrypt(&blob, &old_key, &new_key).unwrap();

        assert_eq!(reveal_with_key(&moved, &new_key).unwrap().as_bytes(), private.as_bytes());
        assert!(reencrypt(&blob, &new_key, &old_key).is_err());
    }

    #[test]
    fn test_validate_does_not_exist() {
        let private = PrivateKey::from_hex(
            "4846c7752fe1f4ce151224d2ca9b9d38411631cea1a3a87169b35e9058bc729a",
        )
        .unwrap();
        let own = generate_public_key(&private);
        let other = PublicKey::from_hex(
            "802d0efbb574857eb444c60b3728d8acb13cd163aa672e33871c963583fa7f0b",
        )
        .unwrap();

        assert!(validate_does_not_exist(&private, &[], NetworkVersion::Testnet).is_ok());
        assert!(validate_does_not_exist(&private, &[other], NetworkVersion::Testnet).is_ok());

        match validate_does_not_exist(&private, &[other, own], NetworkVersion::Testnet) {
            Err(NemError::AccountAlreadyPresent { public_key, address }) => {
                assert_eq!(public_key, own.to_hex());
                assert_eq!(address, "TB2DA2KFAM4GE2JU4XIPRGO72KBRMJUYS7CUXGLD");
            }
            other => panic!("expected AccountAlreadyPresent, got {:?}", other),
        }
    }

    #[test]
    fn test_store_change_password() {
        let store = store_with_password("first");
        let private = PrivateKey::from_array([4u8; 32]);
        let blob = store.protect(&private, "first").unwrap();

        let updated = store.change_password("first", "second", &[blob.clone()]).unwrap();

        assert!(matches!(store.reveal(&blob, "second"), Err(NemError::DecryptionFailed)));
        assert_eq!(
            store.reveal(&updated[0], "second").unwrap().as_bytes(),
            private.as_bytes()
        );
    }

    proptest! {
        #[test]
        fn prop_roundtrip_any_key(bytes in proptest::array::uniform32(any::<u8>())) {
            let key = DerivedPasswordKey::from_bytes(vec![0x5C; 32]).unwrap();
            let private = PrivateKey::from_array(bytes);

            let blob = protect_with_key(&private, &key).unwrap();
            prop_assert_eq!(blob.ciphertext().len(), 48);
            let revealed = reveal_with_key(&blob, &key).unwrap();
            prop_assert_eq!(revealed.as_bytes(), private.as_bytes());
        }
    }
}
