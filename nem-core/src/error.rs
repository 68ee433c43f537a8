//! Error types for NEM account cryptography.
//!
//! This module provides a single error hierarchy using `thiserror`.
//! Decryption failures are deliberately opaque: callers learn that the
//! plaintext could not be recovered, never why.

use thiserror::Error;

/// Result type alias using `NemError`.
pub type Result<T> = std::result::Result<T, NemError>;

/// Main error type for all account cryptography operations.
#[derive(Debug, Error)]
pub enum NemError {
    // ═══════════════════════════════════════════════════════════════════════════
    // KEY MATERIAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Textual key could not be normalized (bad hex, wrong length, bad pad).
    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Key has the wrong number of bytes.
    #[error("Invalid key: expected {expected} bytes, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    /// The operating system random source failed.
    ///
    /// Key, salt and IV generation abort on this error; there is no fallback.
    #[error("Secure random source unavailable: {0}")]
    EntropyUnavailable(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CIPHER ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Cipher key or IV has an unsupported length.
    #[error("Invalid cipher configuration: key {key_len} bytes, iv {iv_len} bytes")]
    InvalidCipherConfig { key_len: usize, iv_len: usize },

    /// Ciphertext could not be turned back into plaintext.
    #[error("Cannot recover plaintext")]
    DecryptionFailed,

    // ═══════════════════════════════════════════════════════════════════════════
    // ADDRESS ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Address text or bytes are malformed or fail the checksum.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Version byte does not belong to a known network.
    #[error("Unknown network version byte: {0:#04x}")]
    UnknownNetwork(u8),

    // ═══════════════════════════════════════════════════════════════════════════
    // PASSWORD & ACCOUNT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// No salt/token has been stored yet.
    #[error("Application password has not been set")]
    PasswordNotSet,

    /// Supplied password does not match the stored token.
    #[error("Invalid password")]
    InvalidPassword,

    /// An account with the same key is already known.
    #[error("Account already present: {address} ({public_key})")]
    AccountAlreadyPresent { public_key: String, address: String },

    // ═══════════════════════════════════════════════════════════════════════════
    // ENVIRONMENT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════
    /// Settings storage port failed.
    #[error("Settings storage error: {0}")]
    StorageError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl NemError {
    /// Returns true if this is a cryptographic error.
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            NemError::InvalidCipherConfig { .. }
                | NemError::DecryptionFailed
                | NemError::EntropyUnavailable(_)
                | NemError::InvalidKeySize { .. }
        )
    }

    /// Returns true if this is a validation error on caller input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            NemError::InvalidKeyMaterial(_)
                | NemError::InvalidKeySize { .. }
                | NemError::HexError(_)
                | NemError::InvalidAddress(_)
                | NemError::UnknownNetwork(_)
                | NemError::AccountAlreadyPresent { .. }
        )
    }
}
