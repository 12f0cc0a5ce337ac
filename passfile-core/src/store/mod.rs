//! JSON store codec and the merge/query/removal engines.
//!
//! The codec performs one whole-file read or write per call; there is no
//! caching, locking, or atomic rename. Each command runs a full
//! load-compute-save cycle against a fresh database.

pub mod merge;
pub mod model;
pub mod query;
pub mod remove;

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

pub use model::{Database, Record};

/// Minimum content length that can possibly parse as a JSON object.
const MIN_JSON_LEN: usize = 2;

/// Load the store file.
///
/// A missing file, or content shorter than the minimal `{}` object, is an
/// empty database rather than an error. Anything else must parse; a parse
/// failure is fatal so a later save cannot silently discard existing
/// data.
pub fn load(path: &Path) -> Result<Database> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "store file absent, starting empty");
            return Ok(Database::new());
        }
        Err(error) => return Err(Error::Io(error)),
    };

    if raw.trim().len() < MIN_JSON_LEN {
        debug!(path = %path.display(), "store file has no data yet");
        return Ok(Database::new());
    }

    serde_json::from_str(&raw).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the store file, reporting a missing file as an error.
///
/// Search and removal have nothing to operate on without a store, so they
/// surface the absence instead of starting empty.
pub fn load_required(path: &Path) -> Result<Database> {
    if !path.exists() {
        return Err(Error::StoreAbsent {
            path: path.to_path_buf(),
        });
    }
    load(path)
}

/// Serialize the database back to disk.
///
/// Two-space indentation, services and records in in-memory order,
/// trailing newline. The write is a whole-file overwrite; on failure the
/// previous contents stay authoritative.
pub fn save(path: &Path, db: &Database) -> Result<()> {
    let mut contents = serde_json::to_string_pretty(db)?;
    contents.push('\n');

    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), services = db.len(), "store saved");
    Ok(())
}
