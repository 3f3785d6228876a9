//! Sync tasks and the sequential runner that drives them.
pub mod context;
pub mod core_library;
pub mod dependencies;
pub mod entry_header;
#[cfg(test)]
pub mod test_archives;
pub mod workspace;

pub use context::Context;

use crate::error::{SyncError, TaskFailure};
use crate::logging::TaskStatus;

/// Result of a single task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed and changed the package tree.
    Ok,
    /// Task ran in dry-run mode and only reported what it would do.
    DryRun,
}

/// A named, executable task.
pub trait Task: Send + Sync {
    /// Human-readable task name.
    fn name(&self) -> &'static str;

    /// Execute the task.
    ///
    /// # Errors
    ///
    /// Returns the [`SyncError`] that prevented the task from completing.
    fn run(&self, ctx: &Context) -> Result<TaskResult, SyncError>;
}

/// The complete, ordered set of tasks run by the sync command.
///
/// Order matters: the workspace reset must precede every task that writes
/// into it.
#[must_use]
pub fn all_sync_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(workspace::PrepareWorkspace),
        Box::new(core_library::CopyCoreLibrary),
        Box::new(dependencies::SyncDependencies),
        Box::new(entry_header::WriteEntryHeader),
    ]
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Returns the task's error after recording it as failed.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<(), SyncError> {
    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record(task.name(), TaskStatus::Ok, None);
            Ok(())
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record(task.name(), TaskStatus::DryRun, None);
            Ok(())
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e}", task.name()));
            ctx.log
                .record(task.name(), TaskStatus::Failed, Some(e.to_string()));
            Err(e)
        }
    }
}

/// Run `tasks` in order, stopping at the first failure.
///
/// Tasks after a failure are recorded as skipped so the summary shows the
/// whole pipeline.
///
/// # Errors
///
/// Returns a [`TaskFailure`] naming the task that aborted the run.
pub fn run_all(tasks: &[Box<dyn Task>], ctx: &Context) -> Result<(), TaskFailure> {
    for (index, task) in tasks.iter().enumerate() {
        if let Err(source) = execute(task.as_ref(), ctx) {
            for rest in tasks.iter().skip(index + 1) {
                ctx.log.record(
                    rest.name(),
                    TaskStatus::Skipped,
                    Some(format!("aborted after '{}' failed", task.name())),
                );
            }
            return Err(TaskFailure {
                task: task.name().to_string(),
                source,
            });
        }
    }
    Ok(())
}
