//! Account creation and import.
//!
//! Produces the material the account layer persists: public key, address
//! and the password-protected private key. The plaintext private key never
//! leaves these functions.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use nem_core::error::Result;
use nem_core::traits::SettingsStore;
use nem_core::types::{Address, EncryptedPrivateKeyBlob, PrivateKey, PublicKey};
use nem_crypto::{derive_address, generate_keypair, generate_public_key};

use crate::store::EncryptedPrivateKeyStore;

/// Persistable account record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMaterial {
    /// Public key.
    pub public_key: PublicKey,
    /// Address on the store's network.
    pub address: Address,
    /// Private key encrypted under the application password.
    pub encrypted_private_key: EncryptedPrivateKeyBlob,
}

/// Creates a new account with a freshly generated key.
#[instrument(skip_all)]
pub fn create_account<S: SettingsStore>(
    store: &EncryptedPrivateKeyStore<S>,
    password: &str,
) -> Result<AccountMaterial> {
    let keypair = generate_keypair()?;
    let material = seal(store, &keypair.private, keypair.public, password)?;
    info!(address = %material.address, "Account created");
    Ok(material)
}

/// Imports an account from a textual private key.
///
/// # Errors
/// - `InvalidKeyMaterial` if the text is not a key
/// - `AccountAlreadyPresent` if its public key is in `known_accounts`
/// - `PasswordNotSet` / `InvalidPassword` if the password does not verify
#[instrument(skip_all, fields(known = known_accounts.len()))]
pub fn import_account<S: SettingsStore>(
    store: &EncryptedPrivateKeyStore<S>,
    private_key_text: &str,
    password: &str,
    known_accounts: &[PublicKey],
) -> Result<AccountMaterial> {
    let private_key = PrivateKey::from_hex(private_key_text)?;
    store.validate_does_not_exist(&private_key, known_accounts)?;

    let public_key = generate_public_key(&private_key);
    let material = seal(store, &private_key, public_key, password)?;
    info!(address = %material.address, "Account imported");
    Ok(material)
}

fn seal<S: SettingsStore>(
    store: &EncryptedPrivateKeyStore<S>,
    private_key: &PrivateKey,
    public_key: PublicKey,
    password: &str,
) -> Result<AccountMaterial> {
    let encrypted_private_key = store.protect(private_key, password)?;
    Ok(AccountMaterial {
        public_key,
        address: derive_address(&public_key, store.network()),
        encrypted_private_key,
    })
}
