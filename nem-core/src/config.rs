//! Process-wide configuration: network and password KDF parameters.
//!
//! Set once at startup and read-only afterwards.
//!
//! | variable          | values                          | default   |
//! |-------------------|---------------------------------|-----------|
//! | `NEM_NETWORK`     | `mainnet`, `testnet`, `mijin`   | `mainnet` |
//! | `NEM_KDF_ROUNDS`  | integer ≥ 1                     | `2000`    |
//! | `NEM_KDF_KEY_LEN` | `16`, `32`                      | `32`      |
//! | `NEM_SALT_POLICY` | `reuse`, `regenerate`           | `reuse`   |

use serde::{Deserialize, Serialize};

use crate::constants::{AES128_KEY_SIZE, AES256_KEY_SIZE, DEFAULT_KDF_ROUNDS, SALT_SIZE};
use crate::error::{NemError, Result};
use crate::types::NetworkVersion;

/// Environment variable selecting the network.
pub const ENV_NETWORK: &str = "NEM_NETWORK";
/// Environment variable overriding the KDF iteration count.
pub const ENV_KDF_ROUNDS: &str = "NEM_KDF_ROUNDS";
/// Environment variable selecting the derived key length.
pub const ENV_KDF_KEY_LEN: &str = "NEM_KDF_KEY_LEN";
/// Environment variable selecting the salt policy.
pub const ENV_SALT_POLICY: &str = "NEM_SALT_POLICY";

/// Derived key length, which is also the AES variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyLength {
    /// 16-byte key, AES-128.
    Aes128,
    /// 32-byte key, AES-256.
    #[default]
    Aes256,
}

impl KeyLength {
    /// Returns the key length in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            KeyLength::Aes128 => AES128_KEY_SIZE,
            KeyLength::Aes256 => AES256_KEY_SIZE,
        }
    }

    /// Maps a byte count to a key length.
    pub fn from_bytes(len: usize) -> Result<Self> {
        match len {
            AES128_KEY_SIZE => Ok(KeyLength::Aes128),
            AES256_KEY_SIZE => Ok(KeyLength::Aes256),
            other => Err(NemError::ConfigError(format!(
                "key length must be 16 or 32 bytes, got {}",
                other
            ))),
        }
    }
}

/// What `set_password` does when a salt is already stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaltPolicy {
    /// Keep the stored salt. Matches what existing wallets expect.
    #[default]
    Reuse,
    /// Draw a fresh salt on every password set.
    Regenerate,
}

impl std::str::FromStr for SaltPolicy {
    type Err = NemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reuse" => Ok(SaltPolicy::Reuse),
            "regenerate" => Ok(SaltPolicy::Regenerate),
            other => Err(NemError::ConfigError(format!("unknown salt policy '{}'", other))),
        }
    }
}

/// PBKDF2 parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdfParams {
    /// Iteration count.
    pub rounds: u32,
    /// Output length.
    pub key_len: KeyLength,
    /// Length of freshly generated salts.
    pub salt_len: usize,
    /// Salt handling on password set.
    pub salt_policy: SaltPolicy,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            rounds: DEFAULT_KDF_ROUNDS,
            key_len: KeyLength::Aes256,
            salt_len: SALT_SIZE,
            salt_policy: SaltPolicy::Reuse,
        }
    }
}

impl KdfParams {
    /// Sets the iteration count.
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Sets the derived key length.
    pub fn with_key_len(mut self, key_len: KeyLength) -> Self {
        self.key_len = key_len;
        self
    }

    /// Sets the salt policy.
    pub fn with_salt_policy(mut self, salt_policy: SaltPolicy) -> Self {
        self.salt_policy = salt_policy;
        self
    }

    /// Checks the parameters are usable.
    pub fn validate(&self) -> Result<()> {
        if self.rounds == 0 {
            return Err(NemError::ConfigError("KDF rounds must be at least 1".into()));
        }
        if self.salt_len == 0 {
            return Err(NemError::ConfigError("salt length must be at least 1".into()));
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Network used for address derivation.
    pub network: NetworkVersion,
    /// Password KDF parameters.
    pub kdf: KdfParams,
}

impl CryptoConfig {
    /// Loads configuration from the environment, reading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(network) = lookup(ENV_NETWORK) {
            config.network = network.parse()?;
        }

        if let Some(rounds) = lookup(ENV_KDF_ROUNDS) {
            config.kdf.rounds = rounds.trim().parse().map_err(|_| {
                NemError::ConfigError(format!("{} must be an integer, got '{}'", ENV_KDF_ROUNDS, rounds))
            })?;
        }

        if let Some(key_len) = lookup(ENV_KDF_KEY_LEN) {
            let len: usize = key_len.trim().parse().map_err(|_| {
                NemError::ConfigError(format!("{} must be an integer, got '{}'", ENV_KDF_KEY_LEN, key_len))
            })?;
            config.kdf.key_len = KeyLength::from_bytes(len)?;
        }

        if let Some(policy) = lookup(ENV_SALT_POLICY) {
            config.kdf.salt_policy = policy.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.kdf.validate()
    }
}
