//! AES-CBC with PKCS#7 padding.
//!
//! The key size picks the variant: 16 bytes → AES-128, 32 bytes → AES-256.
//! IV freshness is the caller's job; see [`generate_iv`].

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::{Aes128, Aes256};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use nem_core::constants::{AES128_KEY_SIZE, AES256_KEY_SIZE, AES_BLOCK_SIZE, IV_SIZE};
use nem_core::error::{NemError, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

#[derive(Zeroize)]
enum CipherKey {
    Aes128([u8; AES128_KEY_SIZE]),
    Aes256([u8; AES256_KEY_SIZE]),
}

impl CipherKey {
    fn len(&self) -> usize {
        match self {
            CipherKey::Aes128(key) => key.len(),
            CipherKey::Aes256(key) => key.len(),
        }
    }
}

/// A validated key and IV pair.
///
/// Construction rejects wrong sizes; nothing is truncated or padded.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SymmetricCipher {
    key: CipherKey,
    iv: [u8; IV_SIZE],
}

impl SymmetricCipher {
    /// Creates a cipher from a 16 or 32-byte key and a 16-byte IV.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        let invalid = || NemError::InvalidCipherConfig {
            key_len: key.len(),
            iv_len: iv.len(),
        };

        let iv: [u8; IV_SIZE] = iv.try_into().map_err(|_| invalid())?;
        let key = if let Ok(key) = <[u8; AES128_KEY_SIZE]>::try_from(key) {
            CipherKey::Aes128(key)
        } else if let Ok(key) = <[u8; AES256_KEY_SIZE]>::try_from(key) {
            CipherKey::Aes256(key)
        } else {
            return Err(invalid());
        };

        Ok(Self { key, iv })
    }

    /// Returns the IV this cipher was built with.
    pub fn iv(&self) -> &[u8; IV_SIZE] {
        &self.iv
    }

    /// Returns the key length in bytes (16 or 32).
    pub fn key_len(&self) -> usize {
        self.key.len()
    }

    /// Encrypts and pads. Output is `(len / 16 + 1) * 16` bytes.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        match &self.key {
            CipherKey::Aes128(key) => Aes128CbcEnc::new(key.into(), &self.iv.into())
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            CipherKey::Aes256(key) => Aes256CbcEnc::new(key.into(), &self.iv.into())
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        }
    }

    /// Decrypts and strips padding.
    ///
    /// Fails with `DecryptionFailed` on empty input, partial blocks or bad
    /// padding. Wrong keys usually surface as bad padding.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(NemError::DecryptionFailed);
        }

        let plaintext = match &self.key {
            CipherKey::Aes128(key) => Aes128CbcDec::new(key.into(), &self.iv.into())
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
            CipherKey::Aes256(key) => Aes256CbcDec::new(key.into(), &self.iv.into())
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext),
        };

        plaintext.map_err(|_| NemError::DecryptionFailed)
    }
}

impl std::fmt::Debug for SymmetricCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricCipher")
            .field("key", &format_args!("[REDACTED; {}]", self.key_len()))
            .field("iv", &hex::encode(self.iv))
            .finish()
    }
}

/// Draws a fresh IV from the OS CSPRNG.
pub fn generate_iv() -> Result<[u8; IV_SIZE]> {
    generate_iv_with(&mut OsRng)
}

/// Draws a fresh IV from the given RNG.
pub fn generate_iv_with<R>(rng: &mut R) -> Result<[u8; IV_SIZE]>
where
    R: RngCore + CryptoRng,
{
    let mut iv = [0u8; IV_SIZE];
    rng.try_fill_bytes(&mut iv)
        .map_err(|e| NemError::EntropyUnavailable(e.to_string()))?;
    Ok(iv)
}
