//! Digest functions used by key and address derivation.
//!
//! NEM uses the original Keccak submissions, not the NIST SHA-3 variants.
//! The two differ only in padding, so outputs never match:
//!
//! ```text
//! Keccak-256("")  = c5d24601...5d85a470
//! SHA3-256("")    = a7ffc6f8...f8434a
//! ```

use ripemd::Ripemd160;
use sha3::{Digest, Keccak256, Keccak512};

use nem_core::constants::{KECCAK256_SIZE, KECCAK512_SIZE, RIPEMD160_SIZE};

// ═══════════════════════════════════════════════════════════════════════════════
// KECCAK
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes Keccak-256.
///
/// Note: Keccak256 is NOT SHA3-256. They use different padding.
pub fn keccak256(input: &[u8]) -> [u8; KECCAK256_SIZE] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Computes Keccak-512 (private key expansion).
pub fn keccak512(input: &[u8]) -> [u8; KECCAK512_SIZE] {
    let mut hasher = Keccak512::new();
    hasher.update(input);
    hasher.finalize().into()
}

// ═══════════════════════════════════════════════════════════════════════════════
// RIPEMD-160
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes RIPEMD-160.
pub fn ripemd160(input: &[u8]) -> [u8; RIPEMD160_SIZE] {
    let mut hasher = Ripemd160::new();
    hasher.update(input);
    hasher.finalize().into()
}
