//! Shared execution context passed to every task.

use std::path::Path;
use std::sync::Arc;

use crate::config::{Manifest, PackagePaths};
use crate::logging::Log;
use crate::resources::fetch::Fetcher;

/// Shared context for task execution.
pub struct Context {
    /// Parsed packaging manifest.
    pub manifest: Manifest,
    /// Layout resolved against the project root.
    pub paths: PackagePaths,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Archive downloader (HTTP in production, in-memory in tests).
    pub fetcher: Arc<dyn Fetcher>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("manifest", &self.manifest)
            .field("paths", &self.paths)
            .field("log", &"<dyn Log>")
            .field("fetcher", &self.fetcher)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Context {
    /// Create a context for the project rooted at `root`.
    #[must_use]
    pub fn new(
        manifest: Manifest,
        root: &Path,
        log: Arc<dyn Log>,
        fetcher: Arc<dyn Fetcher>,
        dry_run: bool,
    ) -> Self {
        let paths = manifest.layout.resolve(root);
        Self {
            manifest,
            paths,
            log,
            fetcher,
            dry_run,
        }
    }
}
