//! Password hashing values.

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{AES128_KEY_SIZE, AES256_KEY_SIZE};
use crate::error::{NemError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// SALT
// ═══════════════════════════════════════════════════════════════════════════════

/// Authentication salt, stored as hex.
#[derive(Clone, PartialEq, Eq)]
pub struct Salt(Vec<u8>);

impl Salt {
    /// Wraps raw salt bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Parses a stored salt.
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self(hex::decode(s.trim())?))
    }

    /// Parses a stored salt, treating a missing or empty value as absent.
    pub fn from_stored(s: Option<&str>) -> Result<Option<Self>> {
        match s.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => Self::from_hex(s).map(Some),
        }
    }

    /// Returns the raw salt bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the stored hex form.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// Returns the salt length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the salt has no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for Salt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Salt({})", self.to_hex())
    }
}

impl Serialize for Salt {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Salt {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DERIVED KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Output of the password KDF.
///
/// Serves both as the stored verification token and as the AES key that
/// protects private keys. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedPasswordKey {
    bytes: Vec<u8>,
}

impl DerivedPasswordKey {
    /// Wraps KDF output. Only AES-128 and AES-256 key sizes are accepted.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != AES128_KEY_SIZE && bytes.len() != AES256_KEY_SIZE {
            let actual = bytes.len();
            let mut bytes = bytes;
            bytes.zeroize();
            return Err(NemError::InvalidKeySize {
                expected: AES256_KEY_SIZE,
                actual,
            });
        }
        Ok(Self { bytes })
    }

    /// Parses a stored token.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(hex::decode(s.trim())?)
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the stored hex form of the token.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Returns the key length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty keys cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Compares two keys in constant time.
    pub fn ct_eq(&self, other: &DerivedPasswordKey) -> bool {
        self.bytes.as_slice().ct_eq(other.bytes.as_slice()).into()
    }
}

impl std::fmt::Debug for DerivedPasswordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DerivedPasswordKey([REDACTED; {}])", self.bytes.len())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PASSWORD RECORD
// ═══════════════════════════════════════════════════════════════════════════════

/// Salt and verification token produced when a password is set.
#[derive(Clone, Debug)]
pub struct PasswordRecord {
    /// Salt fed to the KDF.
    pub salt: Salt,
    /// KDF output persisted as the application password.
    pub token: DerivedPasswordKey,
}

impl PasswordRecord {
    /// Hex form for the `authentication_salt` setting.
    pub fn salt_hex(&self) -> String {
        self.salt.to_hex()
    }

    /// Hex form for the `application_password` setting.
    pub fn token_hex(&self) -> String {
        self.token.to_hex()
    }
}
