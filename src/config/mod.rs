//! Packaging manifest: package layout and the third-party dependency table.
//!
//! The manifest (`sync.toml` at the crate root) is embedded into the binary
//! at build time and parsed once at startup.  It is not read from disk at
//! runtime.
mod manifest;
mod validation;

pub use manifest::{ArchiveFormat, Dependency, EntryKind, Layout, Manifest, PackagePaths};

use crate::error::ConfigError;

/// Name reported in errors for the built-in manifest.
const BUILTIN_NAME: &str = "sync.toml";

const BUILTIN_MANIFEST: &str = include_str!("../../sync.toml");

impl Manifest {
    /// Load the manifest compiled into this binary.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded manifest fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(BUILTIN_MANIFEST, BUILTIN_NAME)
    }

    /// Parse and validate a manifest from TOML text.
    ///
    /// `file` is used only to label errors.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSyntax`] if the TOML is malformed or does
    /// not match the schema, or [`ConfigError::Invalid`] if an entry fails
    /// validation.
    pub fn parse(content: &str, file: &str) -> Result<Self, ConfigError> {
        let manifest: Self = toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
            file: file.to_string(),
            message: e.message().to_string(),
        })?;
        validation::validate(&manifest)?;
        Ok(manifest)
    }
}
