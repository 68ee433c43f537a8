//! Account address type.
//!
//! ```text
//! raw (25 bytes) = version (1) || RIPEMD-160 digest (20) || checksum (4)
//! text           = base-32 (RFC 4648, no padding) of raw → 40 symbols
//! display        = text grouped in blocks of 6 joined by '-'
//! ```
//!
//! This type only knows the layout. Building an address from a public key and
//! verifying its checksum need the digests in `nem-crypto`.

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};

use super::NetworkVersion;
use crate::constants::{
    ADDRESS_CHECKSUM_SIZE, ADDRESS_ENCODED_LEN, ADDRESS_GROUP_LEN, ADDRESS_RAW_SIZE,
    RIPEMD160_SIZE, VERSIONED_DIGEST_SIZE,
};
use crate::error::{NemError, Result};

/// A 25-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    bytes: [u8; ADDRESS_RAW_SIZE],
}

impl Address {
    /// Creates an address from raw bytes.
    ///
    /// Checks the length and the network byte. The checksum is not verified here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_RAW_SIZE {
            return Err(NemError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_RAW_SIZE,
                bytes.len()
            )));
        }

        NetworkVersion::from_byte(bytes[0])?;

        let mut arr = [0u8; ADDRESS_RAW_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Assembles an address from its network, digest and checksum.
    pub fn from_parts(
        network: NetworkVersion,
        digest: &[u8; RIPEMD160_SIZE],
        checksum: &[u8; ADDRESS_CHECKSUM_SIZE],
    ) -> Self {
        let mut bytes = [0u8; ADDRESS_RAW_SIZE];
        bytes[0] = network.version_byte();
        bytes[1..VERSIONED_DIGEST_SIZE].copy_from_slice(digest);
        bytes[VERSIONED_DIGEST_SIZE..].copy_from_slice(checksum);
        Self { bytes }
    }

    /// Decodes the textual form.
    ///
    /// Accepts upper or lower case and the dash-grouped display form. Checks
    /// length, alphabet and network byte; use `nem_crypto::parse_address` to
    /// also verify the checksum.
    pub fn decode(s: &str) -> Result<Self> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        if compact.len() != ADDRESS_ENCODED_LEN {
            return Err(NemError::InvalidAddress(format!(
                "expected {} characters, got {}",
                ADDRESS_ENCODED_LEN,
                compact.len()
            )));
        }

        let raw = BASE32_NOPAD
            .decode(compact.as_bytes())
            .map_err(|e| NemError::InvalidAddress(format!("invalid base-32: {}", e)))?;

        Self::from_bytes(&raw)
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the address as a fixed-size array reference.
    pub fn as_array(&self) -> &[u8; ADDRESS_RAW_SIZE] {
        &self.bytes
    }

    /// Returns the network encoded in the version byte.
    pub fn network(&self) -> NetworkVersion {
        // from_bytes rejected unknown version bytes
        NetworkVersion::from_byte(self.bytes[0]).unwrap_or_default()
    }

    /// Returns the version byte followed by the 20-byte digest.
    pub fn versioned_digest(&self) -> &[u8] {
        &self.bytes[..VERSIONED_DIGEST_SIZE]
    }

    /// Returns the 4 checksum bytes.
    pub fn checksum(&self) -> &[u8] {
        &self.bytes[VERSIONED_DIGEST_SIZE..]
    }

    /// Returns the 40-character base-32 form.
    pub fn encode(&self) -> String {
        BASE32_NOPAD.encode(&self.bytes)
    }

    /// Returns the display form, e.g. `NB2DA2-KFAM4G-...-EUB`.
    pub fn to_pretty(&self) -> String {
        let encoded = self.encode();
        encoded
            .as_bytes()
            .chunks(ADDRESS_GROUP_LEN)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::fmt::Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::decode(&s).map_err(serde::de::Error::custom)
    }
}
