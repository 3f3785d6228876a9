//! SHA-256 digests of downloaded archives.
use std::fmt::Write as _;
use std::fs::File;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::SyncError;

/// Compute the lowercase hex SHA-256 digest of the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn sha256_file(path: &Path) -> Result<String, SyncError> {
    let mut file = File::open(path).map_err(SyncError::io(path))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).map_err(SyncError::io(path))?;
    let mut hex = String::with_capacity(64);
    for b in &hasher.finalize() {
        // write! to a String is infallible; unwrap_or(()) makes that explicit.
        write!(hex, "{b:02x}").unwrap_or(());
    }
    Ok(hex)
}

/// Check the archive at `path` (downloaded from `url`) against `expected`.
///
/// # Errors
///
/// Returns [`SyncError::Checksum`] on mismatch, or an I/O error if the file
/// cannot be read.
pub fn verify(path: &Path, url: &str, expected: &str) -> Result<(), SyncError> {
    let actual = sha256_file(path)?;
    if actual == expected {
        Ok(())
    } else {
        Err(SyncError::Checksum {
            url: url.to_string(),
            expected: expected.to_string(),
            actual,
        })
    }
}
