//! # NEM Cryptography
//!
//! Cryptographic primitives for NEM accounts.
//!
//! This crate provides:
//!
//! - **Hash**: Keccak-256, Keccak-512, RIPEMD-160
//! - **Keygen**: Private key generation and Ed25519/Keccak public key derivation
//! - **Address**: Public key → checksummed base-32 address, and parsing back
//! - **Cipher**: AES-128/256-CBC with PKCS#7 padding
//! - **KDF**: PBKDF2-HMAC-SHA1 password tokens with constant-time checks
//!
//! ## Security Properties
//!
//! - Randomness comes from the OS CSPRNG; failure aborts, never falls back
//! - Secret material is zeroized on drop
//! - Password tokens are compared in constant time
//!
//! ## Example
//!
//! ```rust
//! use nem_core::{NetworkVersion, PrivateKey};
//! use nem_crypto::{derive_address, generate_public_key};
//!
//! let private = PrivateKey::from_hex(
//!     "4846c7752fe1f4ce151224d2ca9b9d38411631cea1a3a87169b35e9058bc729a",
//! ).unwrap();
//! let public = generate_public_key(&private);
//! let address = derive_address(&public, NetworkVersion::Testnet);
//! assert_eq!(address.to_string(), "TB2DA2KFAM4GE2JU4XIPRGO72KBRMJUYS7CUXGLD");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod address;
pub mod cipher;
pub mod hash;
pub mod kdf;
pub mod keygen;

// Re-export main functions at crate root
pub use address::{derive_address, is_valid_address, parse_address, verify_checksum};
pub use cipher::{generate_iv, generate_iv_with, SymmetricCipher};
pub use hash::{keccak256, keccak512, ripemd160};
pub use kdf::{check_password, derive_key, generate_salt, set_password};
pub use keygen::{
    generate_keypair, generate_keypair_with, generate_private_key, generate_private_key_with,
    generate_public_key, keypair_from_private_key,
};
