//! Task that resets the package workspace.

use super::{Context, Task, TaskResult};
use crate::error::SyncError;
use crate::resources::fs;

/// Delete and recreate the package source root.
#[derive(Debug)]
pub struct PrepareWorkspace;

impl Task for PrepareWorkspace {
    fn name(&self) -> &'static str {
        "Prepare workspace"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, SyncError> {
        let dir = &ctx.paths.package_src;
        if ctx.dry_run {
            ctx.log.dry_run(&format!("would reset {}", dir.display()));
            return Ok(TaskResult::DryRun);
        }

        ctx.log.debug(&format!("resetting {}", dir.display()));
        fs::reset_dir(dir)?;
        Ok(TaskResult::Ok)
    }
}
