//! # NEM Keystore
//!
//! Password-protected storage of NEM account private keys.
//!
//! This crate provides:
//!
//! - **Password Manager**: Set, check and change the application password
//!   through an injected [`SettingsStore`](nem_core::SettingsStore)
//! - **Encrypted Store**: Protect and reveal private keys, detect duplicates
//! - **Accounts**: Create or import an account as persistable material
//! - **Memory Store**: Thread-safe in-memory settings for tests and tools
//!
//! ## Quick Start
//!
//! ```rust
//! use nem_core::{KdfParams, NetworkVersion};
//! use nem_keystore::{
//!     create_account, EncryptedPrivateKeyStore, MemorySettingsStore, PasswordManager,
//! };
//!
//! let passwords = PasswordManager::new(MemorySettingsStore::new(), KdfParams::default());
//! passwords.set_password("correct horse").unwrap();
//!
//! let store = EncryptedPrivateKeyStore::new(passwords, NetworkVersion::Testnet);
//! let account = create_account(&store, "correct horse").unwrap();
//!
//! let private = store.reveal(&account.encrypted_private_key, "correct horse").unwrap();
//! assert_eq!(nem_crypto::generate_public_key(&private), account.public_key);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod account;
pub mod memory;
pub mod password;
pub mod store;

pub use account::{create_account, import_account, AccountMaterial};
pub use memory::MemorySettingsStore;
pub use password::PasswordManager;
pub use store::{
    protect_with_key, reencrypt, reveal_with_key, validate_does_not_exist,
    EncryptedPrivateKeyStore,
};
