//! Address derivation and checksum verification.
//!
//! ## Derivation Flow
//!
//! ```text
//! public key (32 bytes)
//!       ↓ Keccak-256
//! 32 bytes
//!       ↓ RIPEMD-160
//! digest (20 bytes)
//!       ↓ prepend network version byte
//! versioned digest (21 bytes)
//!       ↓ Keccak-256, first 4 bytes
//! checksum
//!
//! address = base32(versioned digest || checksum)   → 40 symbols
//! ```

use nem_core::constants::{ADDRESS_CHECKSUM_SIZE, VERSIONED_DIGEST_SIZE};
use nem_core::error::{NemError, Result};
use nem_core::types::{Address, NetworkVersion, PublicKey};

use crate::hash::{keccak256, ripemd160};

/// Derives the address of a public key on a network.
///
/// Pure: the same inputs always give the same address.
pub fn derive_address(public_key: &PublicKey, network: NetworkVersion) -> Address {
    let digest = ripemd160(&keccak256(public_key.as_bytes()));

    let mut versioned = [0u8; VERSIONED_DIGEST_SIZE];
    versioned[0] = network.version_byte();
    versioned[1..].copy_from_slice(&digest);

    Address::from_parts(network, &digest, &address_checksum(&versioned))
}

/// Computes the 4-byte checksum of a versioned digest.
pub fn address_checksum(versioned_digest: &[u8]) -> [u8; ADDRESS_CHECKSUM_SIZE] {
    let hash = keccak256(versioned_digest);
    let mut checksum = [0u8; ADDRESS_CHECKSUM_SIZE];
    checksum.copy_from_slice(&hash[..ADDRESS_CHECKSUM_SIZE]);
    checksum
}

/// Returns true if the stored checksum matches the digest.
pub fn verify_checksum(address: &Address) -> bool {
    address_checksum(address.versioned_digest()).as_slice() == address.checksum()
}

/// Parses an address and verifies its checksum.
///
/// Accepts upper or lower case and the dash-grouped display form.
pub fn parse_address(s: &str) -> Result<Address> {
    let address = Address::decode(s)?;
    if !verify_checksum(&address) {
        return Err(NemError::InvalidAddress("checksum mismatch".into()));
    }
    Ok(address)
}

/// Returns true if `s` is a well-formed address on `network`.
pub fn is_valid_address(s: &str, network: NetworkVersion) -> bool {
    matches!(parse_address(s), Ok(address) if address.network() == network)
}
