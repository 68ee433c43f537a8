//! Protocol constants for NEM account cryptography.
//!
//! Key and address sizes follow the NEM (NIS1) account model: Ed25519 keys
//! hashed with Keccak, addresses built from a RIPEMD-160 digest.

// ═══════════════════════════════════════════════════════════════════════════════
// KEY SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a private key in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Size of a public key (compressed Edwards point) in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Length of a normalized hex key.
pub const KEY_HEX_LEN: usize = PRIVATE_KEY_SIZE * 2;

/// Length of a hex key carrying one leading `00` pad byte.
///
/// Keys exported from some NEM tools are encoded as signed big integers and
/// gain this pad whenever the top bit is set.
pub const PADDED_KEY_HEX_LEN: usize = KEY_HEX_LEN + 2;

// ═══════════════════════════════════════════════════════════════════════════════
// HASH OUTPUT SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a Keccak-256 digest.
pub const KECCAK256_SIZE: usize = 32;

/// Size of a Keccak-512 digest (private key expansion).
pub const KECCAK512_SIZE: usize = 64;

/// Size of a RIPEMD-160 digest.
pub const RIPEMD160_SIZE: usize = 20;

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS LAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of the version-prefixed digest (version + RIPEMD-160).
pub const VERSIONED_DIGEST_SIZE: usize = 1 + RIPEMD160_SIZE;

/// Number of checksum bytes appended to an address.
pub const ADDRESS_CHECKSUM_SIZE: usize = 4;

/// Size of a raw address.
/// 1 + 20 + 4 = 25 bytes
pub const ADDRESS_RAW_SIZE: usize = VERSIONED_DIGEST_SIZE + ADDRESS_CHECKSUM_SIZE;

/// Length of the base-32 address string (25 bytes = 200 bits = 40 symbols).
pub const ADDRESS_ENCODED_LEN: usize = 40;

/// Number of symbols per group in the dash-separated display form.
pub const ADDRESS_GROUP_LEN: usize = 6;

// ═══════════════════════════════════════════════════════════════════════════════
// NETWORK VERSION BYTES
// ═══════════════════════════════════════════════════════════════════════════════

/// Main network version byte (addresses start with `N`).
pub const NETWORK_VERSION_MAINNET: u8 = 0x68;

/// Test network version byte (addresses start with `T`).
pub const NETWORK_VERSION_TESTNET: u8 = 0x98;

/// Mijin private network version byte (addresses start with `M`).
pub const NETWORK_VERSION_MIJIN: u8 = 0x60;

// ═══════════════════════════════════════════════════════════════════════════════
// SYMMETRIC CIPHER
// ═══════════════════════════════════════════════════════════════════════════════

/// AES block size in bytes.
pub const AES_BLOCK_SIZE: usize = 16;

/// Size of the initialization vector (one block).
pub const IV_SIZE: usize = AES_BLOCK_SIZE;

/// AES-128 key size.
pub const AES128_KEY_SIZE: usize = 16;

/// AES-256 key size.
pub const AES256_KEY_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// PASSWORD KEY DERIVATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Default PBKDF2 iteration count.
pub const DEFAULT_KDF_ROUNDS: u32 = 2000;

/// Size of a freshly generated authentication salt.
pub const SALT_SIZE: usize = 32;
