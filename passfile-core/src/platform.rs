//! Platform-specific paths and environment configuration

use std::path::PathBuf;

/// Environment variable the master key is read from
pub const MASTER_KEY_ENV: &str = "PASSFILE_MASTER_KEY";

/// File name of the JSON store inside the user's home directory
pub const STORE_FILE_NAME: &str = "passfile-db.json";

/// Get the default store file path
///
/// The store lives directly in the user's home directory. Falls back to
/// the current directory when no home directory can be resolved.
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(STORE_FILE_NAME)
}
