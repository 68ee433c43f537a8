//! Private key generation and public key derivation.
//!
//! ## Derivation Flow
//!
//! ```text
//! private key (32 bytes, as stored)
//!       ↓ reverse byte order
//! Keccak-512 → 64 bytes
//!       ↓ clamp lower 32 bytes, reduce mod ℓ
//! scalar · B (Ed25519 base point)
//!       ↓ compress
//! public key (32 bytes)
//! ```
//!
//! The curve arithmetic comes from `ed25519-dalek`; only the hash and the
//! byte order differ from standard Ed25519, which hashes with SHA-512.

use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::VerifyingKey;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use nem_core::constants::PRIVATE_KEY_SIZE;
use nem_core::error::{NemError, Result};
use nem_core::types::{KeyPair, PrivateKey, PublicKey};

use crate::hash::keccak512;

// ═══════════════════════════════════════════════════════════════════════════════
// PRIVATE KEY GENERATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Generates a private key from the operating system CSPRNG.
///
/// Fails with `EntropyUnavailable` if the OS source fails. There is no retry
/// and no fallback source.
pub fn generate_private_key() -> Result<PrivateKey> {
    generate_private_key_with(&mut OsRng)
}

/// Generates a private key from the given RNG.
pub fn generate_private_key_with<R>(rng: &mut R) -> Result<PrivateKey>
where
    R: RngCore + CryptoRng,
{
    let mut bytes = Zeroizing::new([0u8; PRIVATE_KEY_SIZE]);
    rng.try_fill_bytes(&mut bytes[..])
        .map_err(|e| NemError::EntropyUnavailable(e.to_string()))?;

    Ok(PrivateKey::from_array(*bytes))
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLIC KEY DERIVATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Derives the public key of a private key. Pure and total.
pub fn generate_public_key(private_key: &PrivateKey) -> PublicKey {
    let scalar_bytes = private_key.to_curve_scalar_bytes();
    let expanded = Zeroizing::new(keccak512(&scalar_bytes[..]));

    let secret = ExpandedSecretKey::from_bytes(&expanded);
    let verifying = VerifyingKey::from(&secret);

    PublicKey::from_array(verifying.to_bytes())
}

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PAIRS
// ═══════════════════════════════════════════════════════════════════════════════

/// Generates a fresh key pair from the OS CSPRNG.
pub fn generate_keypair() -> Result<KeyPair> {
    generate_keypair_with(&mut OsRng)
}

/// Generates a key pair from the given RNG.
pub fn generate_keypair_with<R>(rng: &mut R) -> Result<KeyPair>
where
    R: RngCore + CryptoRng,
{
    let private = generate_private_key_with(rng)?;
    let keypair = keypair_from_private_key(private);
    debug!(public_key = %keypair.public, "Generated key pair");
    Ok(keypair)
}

/// Pairs an existing private key with its public key.
pub fn keypair_from_private_key(private: PrivateKey) -> KeyPair {
    let public = generate_public_key(&private);
    KeyPair::new(private, public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use test_case::test_case;

    #[test_case(
        "3f996eafce31549cb6271b5c5b9626e26322ebd0225b559bfd135f9fbaf6bf3a",
        "802d0efbb574857eb444c60b3728d8acb13cd163aa672e33871c963583fa7f0b" ;
        "first account"
    )]
    #[test_case(
        "4846c7752fe1f4ce151224d2ca9b9d38411631cea1a3a87169b35e9058bc729a",
        "4e312ef765e2916e4012a5290ae24b3806bdcbffda9560250749789c7bd35b50" ;
        "second account"
    )]
    fn test_public_key_vectors(private_hex: &str, public_hex: &str) {
        let private = PrivateKey::from_hex(private_hex).unwrap();
        assert_eq!(generate_public_key(&private).to_hex(), public_hex);
    }

    #[test]
    fn test_public_key_accepts_padded_text() {
        let private = PrivateKey::from_hex(
            "0x004846C7752FE1F4CE151224D2CA9B9D38411631CEA1A3A87169B35E9058BC729A",
        )
        .unwrap();
        assert_eq!(
            generate_public_key(&private).to_hex(),
            "4e312ef765e2916e4012a5290ae24b3806bdcbffda9560250749789c7bd35b50"
        );
    }

    #[test]
    fn test_public_key_deterministic() {
        let private = generate_private_key().unwrap();
        assert_eq!(generate_public_key(&private), generate_public_key(&private));
    }

    #[test]
    fn test_byte_order_matters() {
        let private = PrivateKey::from_hex(
            "3f996eafce31549cb6271b5c5b9626e26322ebd0225b559bfd135f9fbaf6bf3a",
        )
        .unwrap();
        let mut reversed = *private.as_array();
        reversed.reverse();
        let flipped = PrivateKey::from_array(reversed);

        assert_ne!(generate_public_key(&private), generate_public_key(&flipped));
    }

    #[test]
    fn test_seeded_generation_reproducible() {
        let mut rng_a = ChaCha20Rng::seed_from_u64(42);
        let mut rng_b = ChaCha20Rng::seed_from_u64(42);

        let a = generate_keypair_with(&mut rng_a).unwrap();
        let b = generate_keypair_with(&mut rng_b).unwrap();

        assert_eq!(a.private.as_bytes(), b.private.as_bytes());
        assert_eq!(a.public, b.public);
    }

    #[test]
    fn test_generated_keys_differ() {
        let a = generate_private_key().unwrap();
        let b = generate_private_key().unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_keypair_from_private_key() {
        let private = PrivateKey::from_hex(
            "4846c7752fe1f4ce151224d2ca9b9d38411631cea1a3a87169b35e9058bc729a",
        )
        .unwrap();
        let keypair = keypair_from_private_key(private);
        assert_eq!(
            keypair.public.to_hex(),
            "4e312ef765e2916e4012a5290ae24b3806bdcbffda9560250749789c7bd35b50"
        );
    }

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {}
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy source offline"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn test_entropy_failure_aborts() {
        let result = generate_private_key_with(&mut FailingRng);
        assert!(matches!(result, Err(NemError::EntropyUnavailable(_))));
    }
}
