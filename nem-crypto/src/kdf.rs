//! Password key derivation.
//!
//! ```text
//! token = PBKDF2-HMAC-SHA1(password, salt, rounds, key_len)
//! ```
//!
//! The token is stored as the application password and is also the AES key
//! protecting private keys, so the same derivation serves both checks and
//! encryption.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use sha1::Sha1;
use tracing::debug;
use zeroize::Zeroizing;

use nem_core::config::{KdfParams, KeyLength, SaltPolicy};
use nem_core::error::{NemError, Result};
use nem_core::types::{DerivedPasswordKey, PasswordRecord, Salt};

/// Derives a key from a password and salt.
pub fn derive_key(password: &str, salt: &Salt, params: &KdfParams) -> Result<DerivedPasswordKey> {
    params.validate()?;

    let mut out = Zeroizing::new(vec![0u8; params.key_len.bytes()]);
    pbkdf2_hmac::<Sha1>(password.as_bytes(), salt.as_bytes(), params.rounds, &mut out[..]);

    DerivedPasswordKey::from_bytes(out.to_vec())
}

/// Draws a fresh salt of `len` bytes from the OS CSPRNG.
pub fn generate_salt(len: usize) -> Result<Salt> {
    generate_salt_with(&mut OsRng, len)
}

/// Draws a fresh salt of `len` bytes from the given RNG.
pub fn generate_salt_with<R>(rng: &mut R, len: usize) -> Result<Salt>
where
    R: RngCore + CryptoRng,
{
    let mut bytes = vec![0u8; len];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| NemError::EntropyUnavailable(e.to_string()))?;
    Ok(Salt::new(bytes))
}

/// Produces the salt and token to persist for a new password.
///
/// With `SaltPolicy::Reuse` an existing salt is kept; a fresh one is drawn
/// only when none is stored.
pub fn set_password(
    password: &str,
    existing_salt: Option<&Salt>,
    params: &KdfParams,
) -> Result<PasswordRecord> {
    set_password_with(&mut OsRng, password, existing_salt, params)
}

/// Like [`set_password`], drawing any new salt from `rng`.
pub fn set_password_with<R>(
    rng: &mut R,
    password: &str,
    existing_salt: Option<&Salt>,
    params: &KdfParams,
) -> Result<PasswordRecord>
where
    R: RngCore + CryptoRng,
{
    let salt = match (params.salt_policy, existing_salt) {
        (SaltPolicy::Reuse, Some(salt)) if !salt.is_empty() => {
            debug!("Reusing stored authentication salt");
            salt.clone()
        }
        _ => {
            debug!(len = params.salt_len, "Generating authentication salt");
            generate_salt_with(rng, params.salt_len)?
        }
    };

    let token = derive_key(password, &salt, params)?;
    Ok(PasswordRecord { salt, token })
}

/// Checks a candidate password against the stored salt and token.
///
/// Fails closed: a missing salt or token, or any derivation error, yields
/// `false`. The comparison is constant time.
pub fn check_password(
    candidate: &str,
    stored_salt: Option<&Salt>,
    stored_token: Option<&DerivedPasswordKey>,
    params: &KdfParams,
) -> bool {
    let (Some(salt), Some(token)) = (stored_salt, stored_token) else {
        return false;
    };

    // Tokens stored with another key length still verify.
    let params = if params.key_len.bytes() == token.len() {
        *params
    } else {
        match KeyLength::from_bytes(token.len()) {
            Ok(key_len) => params.with_key_len(key_len),
            Err(_) => return false,
        }
    };

    match derive_key(candidate, salt, &params) {
        Ok(derived) => derived.ct_eq(token),
        Err(_) => false,
    }
}
