//! Domain types for NEM account cryptography.
//!
//! - [`PrivateKey`] / [`PublicKey`]: Ed25519 key material with hex text forms
//! - [`NetworkVersion`]: Address namespace selector
//! - [`Address`]: 25-byte checksummed address with base-32 text form
//! - [`EncryptedPrivateKeyBlob`]: IV + ciphertext of a protected private key
//! - [`Salt`], [`DerivedPasswordKey`], [`PasswordRecord`]: password hashing values

mod keys;
mod network;
mod address;
mod blob;
mod password;

pub use keys::*;
pub use network::*;
pub use address::*;
pub use blob::*;
pub use password::*;
