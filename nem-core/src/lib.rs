//! # NEM Core
//!
//! Core types, errors, configuration and storage ports for NEM account
//! cryptography.
//!
//! This crate provides the foundational building blocks used by all other crates
//! in the workspace:
//!
//! - **Types**: Private/public keys, network versions, addresses, encrypted key blobs
//! - **Errors**: A single error enum with classification helpers
//! - **Constants**: Key, digest and address sizes
//! - **Config**: Network and KDF parameters, loadable from the environment
//! - **Traits**: The settings storage port consumed by the password manager
//!
//! ## Example
//!
//! ```rust
//! use nem_core::{NetworkVersion, PublicKey};
//!
//! let pk = PublicKey::from_hex(
//!     "802d0efbb574857eb444c60b3728d8acb13cd163aa672e33871c963583fa7f0b",
//! ).unwrap();
//! assert_eq!(NetworkVersion::Testnet.prefix(), 'T');
//! assert_eq!(pk.to_hex().len(), 64);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CryptoConfig, KdfParams, KeyLength, SaltPolicy};
pub use constants::*;
pub use error::{NemError, Result};
pub use traits::*;
pub use types::*;
