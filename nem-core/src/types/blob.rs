//! Encrypted private key blob.
//!
//! Stored form is a single lowercase hex string:
//!
//! ```text
//! hex( IV (16 bytes) || AES-CBC-PKCS7(private key) )
//! ```
//!
//! A 32-byte private key pads to 48 bytes of ciphertext, so a blob made by
//! this workspace is 64 bytes, 128 hex characters.

use serde::{Deserialize, Serialize};

use crate::constants::{AES_BLOCK_SIZE, IV_SIZE};
use crate::error::{NemError, Result};

/// IV and ciphertext of a password-protected private key.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptedPrivateKeyBlob {
    iv: [u8; IV_SIZE],
    ciphertext: Vec<u8>,
}

impl EncryptedPrivateKeyBlob {
    /// Creates a blob, checking that the ciphertext is whole blocks.
    pub fn new(iv: [u8; IV_SIZE], ciphertext: Vec<u8>) -> Result<Self> {
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(NemError::DecryptionFailed);
        }
        Ok(Self { iv, ciphertext })
    }

    /// Splits raw bytes into IV and ciphertext.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() <= IV_SIZE {
            return Err(NemError::DecryptionFailed);
        }
        let (iv_bytes, ciphertext) = bytes.split_at(IV_SIZE);
        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(iv_bytes);
        Self::new(iv, ciphertext.to_vec())
    }

    /// Parses the stored hex form.
    ///
    /// Any malformed input maps to `DecryptionFailed`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s.trim()).map_err(|_| NemError::DecryptionFailed)?;
        Self::from_bytes(&bytes)
    }

    /// Returns `IV || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(IV_SIZE + self.ciphertext.len());
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Returns the stored hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Returns the initialization vector.
    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    /// Returns the ciphertext without the IV.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl std::fmt::Debug for EncryptedPrivateKeyBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedPrivateKeyBlob")
            .field("iv", &hex::encode(self.iv))
            .field("ciphertext_len", &self.ciphertext.len())
            .finish()
    }
}

impl std::fmt::Display for EncryptedPrivateKeyBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for EncryptedPrivateKeyBlob {
    type Err = NemError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for EncryptedPrivateKeyBlob {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EncryptedPrivateKeyBlob {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
