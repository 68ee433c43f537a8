//! Key types for NEM accounts.
//!
//! - [`PrivateKey`]: 32-byte secret scalar (zeroized on drop, never printed)
//! - [`PublicKey`]: 32-byte compressed Edwards point, safe to persist and display
//! - [`KeyPair`]: Combined private + public key
//!
//! Both key types share one textual form: lowercase hex, normalized by
//! [`normalize_key_hex`].

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::constants::{KEY_HEX_LEN, PADDED_KEY_HEX_LEN, PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE};
use crate::error::{NemError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// NORMALIZATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Normalizes a textual key to 64 lowercase hex characters.
///
/// Accepted input:
/// - surrounding whitespace and an optional `0x` prefix
/// - upper or lower case hex digits
/// - 64 characters, or 66 characters starting with a `00` pad byte (stripped)
///
/// # Errors
/// Returns `InvalidKeyMaterial` for anything else. No cryptographic operation
/// runs on rejected input.
pub fn normalize_key_hex(input: &str) -> Result<Zeroizing<String>> {
    let trimmed = input.trim();
    let trimmed = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    let lower = Zeroizing::new(trimmed.to_ascii_lowercase());

    if !lower.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(NemError::InvalidKeyMaterial(
            "key contains non-hex characters".into(),
        ));
    }

    match lower.len() {
        KEY_HEX_LEN => Ok(lower),
        PADDED_KEY_HEX_LEN if lower.starts_with("00") => {
            Ok(Zeroizing::new(lower[2..].to_string()))
        }
        PADDED_KEY_HEX_LEN => Err(NemError::InvalidKeyMaterial(
            "66-character key must start with a 00 pad byte".into(),
        )),
        len => Err(NemError::InvalidKeyMaterial(format!(
            "expected {} hex characters, got {}",
            KEY_HEX_LEN, len
        ))),
    }
}

/// Returns true if `input` normalizes to a well-formed key.
pub fn is_valid_key_hex(input: &str) -> bool {
    normalize_key_hex(input).is_ok()
}

// ═══════════════════════════════════════════════════════════════════════════════
// PRIVATE KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Account private key.
///
/// This key is sensitive and will be automatically zeroized when dropped.
/// Never expose this key in logs or error messages.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: [u8; PRIVATE_KEY_SIZE],
}

impl PrivateKey {
    /// Creates a private key from raw bytes.
    ///
    /// # Errors
    /// Returns error if bytes length doesn't match `PRIVATE_KEY_SIZE`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(NemError::InvalidKeySize {
                expected: PRIVATE_KEY_SIZE,
                actual: bytes.len(),
            });
        }

        let mut arr = [0u8; PRIVATE_KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates a private key from a fixed-size array.
    pub fn from_array(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses a textual private key after normalization.
    pub fn from_hex(s: &str) -> Result<Self> {
        let normalized = normalize_key_hex(s)?;
        let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
        hex::decode_to_slice(normalized.as_str(), &mut bytes[..])?;
        Ok(Self::from_array(*bytes))
    }

    /// Returns the raw bytes of the private key.
    ///
    /// # Security
    /// Handle the returned bytes carefully - do not log or expose them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the private key as a fixed-size array reference.
    pub fn as_array(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        &self.bytes
    }

    /// Returns the canonical lowercase hex form.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.bytes))
    }

    /// Returns the key bytes in the order the curve primitive consumes them.
    ///
    /// The textual key is big-endian; the Keccak-512 expansion feeding the
    /// Ed25519 scalar reads the bytes reversed.
    pub fn to_curve_scalar_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_SIZE]> {
        let mut reversed = Zeroizing::new(self.bytes);
        reversed.reverse();
        reversed
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose private key content
        write!(f, "PrivateKey([REDACTED])")
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLIC KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// Account public key.
///
/// Derived deterministically from a [`PrivateKey`]; immutable and safe to share.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_SIZE],
}

impl PublicKey {
    /// Creates a public key from raw bytes.
    ///
    /// # Errors
    /// Returns error if bytes length doesn't match `PUBLIC_KEY_SIZE`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(NemError::InvalidKeySize {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            });
        }

        let mut arr = [0u8; PUBLIC_KEY_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates a public key from a fixed-size array.
    pub fn from_array(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the raw bytes of the public key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the public key as a fixed-size array reference.
    pub fn as_array(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.bytes
    }

    /// Returns the hex-encoded public key (64 lowercase characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Creates a public key from hex string after normalization.
    pub fn from_hex(s: &str) -> Result<Self> {
        let normalized = normalize_key_hex(s)?;
        let bytes = hex::decode(normalized.as_str())?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for PublicKey {
    type Err = NemError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

// Serde implementation that uses hex encoding
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PAIR
// ═══════════════════════════════════════════════════════════════════════════════

/// A private key together with its derived public key.
#[derive(ZeroizeOnDrop)]
pub struct KeyPair {
    /// Private key (keep private, auto-zeroized)
    pub private: PrivateKey,
    /// Public key (safe to share)
    #[zeroize(skip)]
    pub public: PublicKey,
}

impl KeyPair {
    /// Creates a key pair from already-matching keys.
    pub fn new(private: PrivateKey, public: PublicKey) -> Self {
        Self { private, public }
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("private", &"[REDACTED]")
            .field("public", &self.public)
            .finish()
    }
}
