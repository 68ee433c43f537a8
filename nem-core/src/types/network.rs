//! Network version byte.
//!
//! The version byte is the first byte of every raw address. Its top five bits
//! become the first base-32 symbol, which is why main network addresses start
//! with `N` and test network addresses with `T`.

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};

use crate::constants::{NETWORK_VERSION_MAINNET, NETWORK_VERSION_MIJIN, NETWORK_VERSION_TESTNET};
use crate::error::{NemError, Result};

/// Address namespace an account belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkVersion {
    /// Production network (`0x68`, prefix `N`).
    #[default]
    Mainnet,
    /// Test network (`0x98`, prefix `T`).
    Testnet,
    /// Mijin private network (`0x60`, prefix `M`).
    Mijin,
}

impl NetworkVersion {
    /// All known networks.
    pub const ALL: [NetworkVersion; 3] = [
        NetworkVersion::Mainnet,
        NetworkVersion::Testnet,
        NetworkVersion::Mijin,
    ];

    /// Returns the version byte prepended to address digests.
    pub const fn version_byte(self) -> u8 {
        match self {
            NetworkVersion::Mainnet => NETWORK_VERSION_MAINNET,
            NetworkVersion::Testnet => NETWORK_VERSION_TESTNET,
            NetworkVersion::Mijin => NETWORK_VERSION_MIJIN,
        }
    }

    /// Looks up a network by its version byte.
    pub fn from_byte(byte: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|n| n.version_byte() == byte)
            .ok_or(NemError::UnknownNetwork(byte))
    }

    /// Returns the first character of every address on this network.
    pub fn prefix(self) -> char {
        // First symbol of the encoded version byte = its top five bits.
        let encoded = BASE32_NOPAD.encode(&[self.version_byte()]);
        encoded.chars().next().unwrap_or('?')
    }

    /// Returns the lowercase network name.
    pub fn name(self) -> &'static str {
        match self {
            NetworkVersion::Mainnet => "mainnet",
            NetworkVersion::Testnet => "testnet",
            NetworkVersion::Mijin => "mijin",
        }
    }
}

impl std::fmt::Display for NetworkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for NetworkVersion {
    type Err = NemError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(NetworkVersion::Mainnet),
            "testnet" | "test" => Ok(NetworkVersion::Testnet),
            "mijin" => Ok(NetworkVersion::Mijin),
            other => Err(NemError::ConfigError(format!("unknown network '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(NetworkVersion::Mainnet, 'N' ; "mainnet")]
    #[test_case(NetworkVersion::Testnet, 'T' ; "testnet")]
    #[test_case(NetworkVersion::Mijin, 'M' ; "mijin")]
    fn test_prefix(network: NetworkVersion, expected: char) {
        assert_eq!(network.prefix(), expected);
    }

    #[test]
    fn test_byte_roundtrip() {
        for network in NetworkVersion::ALL {
            assert_eq!(NetworkVersion::from_byte(network.version_byte()).unwrap(), network);
        }
    }

    #[test]
    fn test_unknown_byte() {
        assert!(matches!(
            NetworkVersion::from_byte(0x01),
            Err(NemError::UnknownNetwork(0x01))
        ));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("TESTNET".parse::<NetworkVersion>().unwrap(), NetworkVersion::Testnet);
        assert_eq!("main".parse::<NetworkVersion>().unwrap(), NetworkVersion::Mainnet);
        assert!("moonnet".parse::<NetworkVersion>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&NetworkVersion::Testnet).unwrap();
        assert_eq!(json, "\"testnet\"");
    }

    #[test]
    fn test_default_is_mainnet() {
        assert_eq!(NetworkVersion::default(), NetworkVersion::Mainnet);
    }
}
