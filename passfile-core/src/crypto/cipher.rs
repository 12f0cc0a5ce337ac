//! AES-256-GCM encryption and decryption for the password field.
//!
//! Each encryption draws a fresh random salt and nonce; the master key is
//! never used directly as a cipher key. The wire format is a single
//! base64 string carrying `salt || nonce || ciphertext+tag`, so a record
//! field is self-contained and the same plaintext encrypts to different
//! ciphertext on every call.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::crypto::{CryptoError, Result};
use crate::platform::MASTER_KEY_ENV;

const SALT_SIZE: usize = 16;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;
const KEY_SIZE: usize = 32;

/// HKDF info string used to domain-separate derived keys.
const HKDF_INFO: &[u8] = b"passfile-pass-v1";

/// The symmetric master key supplied out-of-band.
///
/// Wraps the raw key string and zeroizes it on drop. An empty key is
/// rejected at construction so every command halts before touching the
/// store file.
pub struct MasterKey {
    secret: String,
}

impl MasterKey {
    /// Create a master key from raw key material.
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(CryptoError::MissingKey);
        }
        Ok(Self { secret })
    }

    /// Read the master key from the environment, once, at process start.
    pub fn from_env() -> Result<Self> {
        match std::env::var(MASTER_KEY_ENV) {
            Ok(value) => Self::new(value),
            Err(_) => Err(CryptoError::MissingKey),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// Derive a 256-bit cipher key from the master key and `salt` via HKDF-SHA256.
fn derive_key(key: &MasterKey, salt: &[u8]) -> [u8; KEY_SIZE] {
    let hk = Hkdf::<Sha256>::new(Some(salt), key.as_bytes());
    let mut okm = [0u8; KEY_SIZE];
    // A 32-byte output is far below the HKDF expansion limit.
    hk.expand(HKDF_INFO, &mut okm)
        .expect("HKDF expand accepts a 32-byte output");
    okm
}

/// Encrypt a single field with the master key.
///
/// Returns `base64(salt || nonce || ciphertext+tag)`. Output differs
/// between calls for the same plaintext but always decrypts back with
/// the same key.
pub fn encrypt_string(key: &MasterKey, plaintext: &str) -> Result<String> {
    let mut salt = [0u8; SALT_SIZE];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let cipher_key = derive_key(key, &salt);
    let cipher = Aes256Gcm::new_from_slice(&cipher_key)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut raw = Vec::with_capacity(SALT_SIZE + NONCE_SIZE + ciphertext.len());
    raw.extend_from_slice(&salt);
    raw.extend_from_slice(&nonce_bytes);
    raw.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(raw))
}

/// Decrypt a field previously produced by [`encrypt_string`].
///
/// Errors on malformed base64, truncated input, or when the
/// authentication tag does not verify (wrong key or corrupted data).
pub fn decrypt_string(key: &MasterKey, ciphertext: &str) -> Result<String> {
    let raw = BASE64
        .decode(ciphertext.trim())
        .map_err(|e| CryptoError::DecryptionFailed(format!("invalid base64: {e}")))?;

    if raw.len() < SALT_SIZE + NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::DecryptionFailed(
            "ciphertext too short".to_string(),
        ));
    }

    let (salt, rest) = raw.split_at(SALT_SIZE);
    let (nonce_bytes, ciphertext) = rest.split_at(NONCE_SIZE);

    let cipher_key = derive_key(key, salt);
    let cipher = Aes256Gcm::new_from_slice(&cipher_key)
        .map_err(|e| CryptoError::DecryptionFailed(e.to_string()))?;

    let nonce = Nonce::from_slice(nonce_bytes);
    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::DecryptionFailed("invalid UTF-8".to_string()))
}

/// Decrypt a field, collapsing any failure to the empty-string sentinel.
///
/// The search and display paths check for an empty string after
/// decryption and render it as a visible failure marker instead of an
/// empty password; a decrypt failure therefore never aborts an
/// operation.
pub fn decrypt_or_empty(key: &MasterKey, ciphertext: &str) -> String {
    decrypt_string(key, ciphertext).unwrap_or_default()
}
