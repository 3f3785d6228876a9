//! Domain-specific error types for the package sync.
//!
//! Internal modules return typed errors ([`SyncError`], [`ConfigError`]) and
//! the task runner wraps the first failure in a [`TaskFailure`] naming the
//! task that aborted the run.  Command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! TaskFailure { task }
//! └── SyncError
//!     ├── MissingSource   — core library directory absent
//!     ├── Network         — download failed (connect, status, timeout)
//!     ├── Archive         — corrupt or unreadable archive
//!     ├── MissingPath     — expected entry absent from the unpacked archive
//!     ├── Checksum        — pinned digest does not match
//!     ├── Io              — filesystem failure
//!     └── Dependency      — any of the above, tagged with the dependency name
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{ArchiveFormat, EntryKind};

/// Boxed error used for third-party error sources (HTTP client, archive readers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the individual sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The core library source directory does not exist.
    #[error("core library source not found: {}", path.display())]
    MissingSource {
        /// Expected location of the source tree.
        path: PathBuf,
    },

    /// An archive could not be downloaded.
    #[error("download of {url} failed: {source}")]
    Network {
        /// URL being fetched.
        url: String,
        /// Underlying transport error.
        source: BoxError,
    },

    /// A downloaded archive could not be unpacked.
    #[error("cannot extract {format} archive {}: {source}", archive.display())]
    Archive {
        /// Path to the downloaded archive.
        archive: PathBuf,
        /// Declared archive format.
        format: ArchiveFormat,
        /// Underlying decoder error.
        source: BoxError,
    },

    /// The declared file or directory is absent from the unpacked archive.
    #[error("{expected} '{path}' not found in unpacked archive")]
    MissingPath {
        /// Path inside the archive, as declared in the manifest.
        path: String,
        /// Kind of entry the manifest expects at `path`.
        expected: EntryKind,
    },

    /// The downloaded archive does not match its pinned digest.
    #[error("checksum mismatch for {url}: expected {expected}, got {actual}")]
    Checksum {
        /// URL the archive was fetched from.
        url: String,
        /// Digest pinned in the manifest.
        expected: String,
        /// Digest of the downloaded bytes.
        actual: String,
    },

    /// A filesystem operation failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A dependency failed to sync.
    #[error("dependency '{name}': {source}")]
    Dependency {
        /// Dependency name from the manifest.
        name: String,
        /// The error that aborted this dependency.
        source: Box<SyncError>,
    },
}

impl SyncError {
    /// Return a closure that wraps an [`std::io::Error`] with `path`.
    ///
    /// Intended for `map_err`:
    ///
    /// ```ignore
    /// std::fs::create_dir_all(dir).map_err(SyncError::io(dir))?;
    /// ```
    pub fn io(path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        move |source| Self::Io { path, source }
    }

    /// Tag this error with the dependency it occurred in.
    #[must_use]
    pub fn in_dependency(self, name: &str) -> Self {
        Self::Dependency {
            name: name.to_string(),
            source: Box::new(self),
        }
    }
}

/// Errors that arise while loading the packaging manifest.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The manifest is not valid TOML or does not match the expected schema.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Manifest name.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The manifest parsed but contains an invalid entry.
    #[error("Invalid manifest entry '{item}': {message}")]
    Invalid {
        /// Offending dependency name or layout key.
        item: String,
        /// What is wrong with it.
        message: String,
    },
}

/// The task that aborted a run, with the error that caused it.
#[derive(Error, Debug)]
#[error("task '{task}' failed: {source}")]
pub struct TaskFailure {
    /// Name of the failed task.
    pub task: String,
    /// Error returned by the task.
    pub source: SyncError,
}
