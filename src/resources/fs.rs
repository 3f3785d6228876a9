//! File-system primitives used by the sync tasks.
use std::path::Path;

use crate::error::SyncError;

/// Remove whatever is at `path`: a directory tree, a file, or a symlink
/// (including a broken one).  Does nothing if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_path(path: &Path) -> Result<(), SyncError> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path).map_err(SyncError::io(path))
    } else {
        std::fs::remove_file(path).map_err(SyncError::io(path))
    }
}

/// Make `path` an empty directory, discarding any prior contents.
///
/// # Errors
///
/// Returns an error if the old contents cannot be removed or the directory
/// cannot be created.
pub fn reset_dir(path: &Path) -> Result<(), SyncError> {
    remove_path(path)?;
    std::fs::create_dir_all(path).map_err(SyncError::io(path))
}

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), SyncError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(SyncError::io(parent))?;
    }
    Ok(())
}

/// Recursively copy a directory tree.
///
/// Symlinks within the source tree are *followed*: the function uses
/// [`Path::is_dir`] (which follows symlinks) so directory symlinks are
/// recursed into and their contents materialised rather than copying the
/// link itself.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), SyncError> {
    std::fs::create_dir_all(dst).map_err(SyncError::io(dst))?;
    for entry in std::fs::read_dir(src).map_err(SyncError::io(src))? {
        let entry = entry.map_err(SyncError::io(src))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).map_err(SyncError::io(&src_path))?;
        }
    }
    Ok(())
}

/// Copy a single file, creating the destination's parent directories.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the copy fails.
pub fn copy_file(src: &Path, dst: &Path) -> Result<(), SyncError> {
    ensure_parent_dir(dst)?;
    std::fs::copy(src, dst).map_err(SyncError::io(src))?;
    Ok(())
}

/// Write `contents` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the write fails.
pub fn write_file(path: &Path, contents: &str) -> Result<(), SyncError> {
    ensure_parent_dir(path)?;
    std::fs::write(path, contents).map_err(SyncError::io(path))
}
