//! Task that copies the core library into the package.

use super::{Context, Task, TaskResult};
use crate::error::SyncError;
use crate::resources::fs;

/// Replace the package's copy of the core library with a fresh recursive copy
/// of the source tree.
#[derive(Debug)]
pub struct CopyCoreLibrary;

impl Task for CopyCoreLibrary {
    fn name(&self) -> &'static str {
        "Copy core library"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, SyncError> {
        let src = &ctx.paths.core_source;
        let dst = &ctx.paths.core_dest;

        if !src.is_dir() {
            return Err(SyncError::MissingSource { path: src.clone() });
        }

        if ctx.dry_run {
            ctx.log.dry_run(&format!(
                "would copy {} to {}",
                src.display(),
                dst.display()
            ));
            return Ok(TaskResult::DryRun);
        }

        fs::remove_path(dst)?;
        fs::copy_dir_recursive(src, dst)?;
        ctx.log
            .info(&format!("copied {} to {}", src.display(), dst.display()));
        Ok(TaskResult::Ok)
    }
}
