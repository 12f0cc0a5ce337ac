//! Record store engine for the passfile secret store.
//!
//! This library provides the core functionality for passfile: the JSON
//! store codec, the merge/query/removal engines, and the encrypt/decrypt
//! boundary around the password field. The CLI crate is a thin shell
//! around these pieces.

pub mod crypto;
pub mod platform;
pub mod store;

pub use crypto::cipher::{decrypt_or_empty, decrypt_string, encrypt_string, MasterKey};
pub use crypto::CryptoError;
pub use store::merge::{MergeOutcome, RecordFields};
pub use store::model::{Database, Record};
pub use store::query::SearchCriteria;
pub use store::remove::RemovalCriteria;

use std::path::PathBuf;
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, Error>;

/// General error type for store operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Crypto error: {0}")]
    Crypto(#[from] crypto::CryptoError),

    #[error("Store file does not exist yet: {path}")]
    StoreAbsent { path: PathBuf },

    #[error("Failed to parse store file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write store file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
