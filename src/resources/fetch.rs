//! Archive downloads.
//!
//! Provides the [`Fetcher`] trait so that tasks can be tested without network
//! access.  Production code uses [`HttpFetcher`].
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::Path;
use std::time::Duration;

use crate::error::SyncError;

/// TCP connect timeout in seconds.
const CONNECT_TIMEOUT: u64 = 10;

/// Total transfer timeout in seconds.
const TRANSFER_TIMEOUT: u64 = 300;

/// Abstraction over "download `url` into the file at `dest`".
pub trait Fetcher: Send + Sync + std::fmt::Debug {
    /// Download `url` to `dest`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Network`] if the transfer fails and
    /// [`SyncError::Io`] if `dest` cannot be written.
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, SyncError>;
}

/// Blocking HTTP(S) fetcher backed by [`ureq`].
///
/// Non-success status codes are reported as errors.  There is no retry:
/// the first failure is returned to the caller.
#[derive(Debug)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Create a fetcher with the default connect and transfer timeouts.
    #[must_use]
    pub fn new() -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_connect(Some(Duration::from_secs(CONNECT_TIMEOUT)))
            .timeout_global(Some(Duration::from_secs(TRANSFER_TIMEOUT)))
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, SyncError> {
        let network = |source: ureq::Error| SyncError::Network {
            url: url.to_string(),
            source: Box::new(source),
        };

        let response = self.agent.get(url).call().map_err(network)?;
        let mut reader = response.into_body().into_reader();

        let mut out = BufWriter::new(File::create(dest).map_err(SyncError::io(dest))?);
        let written = std::io::copy(&mut reader, &mut out).map_err(|e| SyncError::Network {
            url: url.to_string(),
            source: Box::new(e),
        })?;
        out.flush().map_err(SyncError::io(dest))?;
        Ok(written)
    }
}
