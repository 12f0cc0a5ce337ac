//! Cryptographic primitives for the password field.
//!
//! This module provides:
//! - AES-256-GCM encryption/decryption of single string fields
//! - HKDF-SHA256 key derivation from the master key
//! - The fail-soft decrypt boundary (empty-string sentinel)

pub mod cipher;

pub use cipher::{decrypt_or_empty, decrypt_string, encrypt_string, MasterKey};

use thiserror::Error;

/// Errors that can occur in cryptographic operations
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Master key is missing or empty; set the {} environment variable", crate::platform::MASTER_KEY_ENV)]
    MissingKey,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Authentication failed - wrong key or corrupted data")]
    AuthenticationFailed,
}

/// Result type for crypto operations
pub type Result<T> = std::result::Result<T, CryptoError>;
