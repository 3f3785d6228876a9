//! Third-party dependency installation.
//!
//! Each archive is downloaded and unpacked into its own [`TempDir`].  Those
//! directories are deleted when the `TempDir` is dropped, on success and on
//! every error path alike, so no download or extraction debris is left in
//! the system temp directory.
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{Context, Task, TaskResult};
use crate::config::{Dependency, EntryKind};
use crate::error::SyncError;
use crate::resources::{archive, checksum, fs};

/// Fetch every declared third-party dependency and install the requested
/// sub-path of each archive into the third-party directory.
#[derive(Debug)]
pub struct SyncDependencies;

impl Task for SyncDependencies {
    fn name(&self) -> &'static str {
        "Sync dependencies"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, SyncError> {
        let third_party = &ctx.paths.third_party;

        if ctx.dry_run {
            for dep in &ctx.manifest.dependencies {
                ctx.log.dry_run(&format!(
                    "would fetch {} ({}) from {} into {}",
                    dep.name,
                    dep.format,
                    dep.url,
                    third_party.join(&dep.include_dest).display()
                ));
            }
            return Ok(TaskResult::DryRun);
        }

        fs::reset_dir(third_party)?;
        for dep in &ctx.manifest.dependencies {
            ctx.log.debug(&format!("fetching {} from {}", dep.name, dep.url));
            let dest = install(dep, ctx).map_err(|e| e.in_dependency(&dep.name))?;
            ctx.log
                .info(&format!("installed {} to {}", dep.name, dest.display()));
        }
        Ok(TaskResult::Ok)
    }
}

/// Download, verify, unpack, and install a single dependency.
///
/// Both temporary directories are removed when they go out of scope, whether
/// or not installation succeeded.
fn install(dep: &Dependency, ctx: &Context) -> Result<PathBuf, SyncError> {
    let download = staging_dir()?;
    let archive_path = download.path().join(dep.archive_file_name());
    let bytes = ctx.fetcher.fetch(&dep.url, &archive_path)?;
    ctx.log.debug(&format!(
        "downloaded {bytes} bytes to {}",
        archive_path.display()
    ));

    match dep.sha256.as_deref() {
        Some(expected) => checksum::verify(&archive_path, &dep.url, expected)?,
        None => ctx.log.warn(&format!(
            "{}: no sha256 pinned, archive integrity not verified",
            dep.name
        )),
    }

    let extracted = staging_dir()?;
    archive::extract(dep.format, &archive_path, extracted.path())?;

    let src = extracted.path().join(&dep.include_src);
    let dest = ctx.paths.third_party.join(&dep.include_dest);
    if !has_kind(&src, dep.kind) {
        return Err(SyncError::MissingPath {
            path: dep.include_src.display().to_string(),
            expected: dep.kind,
        });
    }

    match dep.kind {
        EntryKind::File => fs::copy_file(&src, &dest)?,
        EntryKind::Directory => fs::copy_dir_recursive(&src, &dest)?,
    }
    Ok(dest)
}

fn has_kind(path: &Path, kind: EntryKind) -> bool {
    match kind {
        EntryKind::File => path.is_file(),
        EntryKind::Directory => path.is_dir(),
    }
}

fn staging_dir() -> Result<TempDir, SyncError> {
    tempfile::Builder::new()
        .prefix("rpl-sync-")
        .tempdir()
        .map_err(SyncError::io(std::env::temp_dir()))
}
