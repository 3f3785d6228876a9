//! Task outcomes and the [`Log`] trait the pipeline reports through.

/// How a pipeline task ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// The task changed the package tree as intended.
    Ok,
    /// The task only reported what it would change.
    DryRun,
    /// The task failed and aborted the sync.
    Failed,
    /// The task never ran because an earlier one failed.
    Skipped,
}

/// One line of the run summary.
#[derive(Debug, Clone)]
pub struct TaskEntry {
    /// Task name, as shown in the stage header.
    pub name: String,
    /// How the task ended.
    pub status: TaskStatus,
    /// Error text for a failed task, or why a skipped task did not run.
    pub detail: Option<String>,
}

/// Sink for pipeline progress.
///
/// Tasks only see this trait. The binary backs it with
/// [`Logger`](super::Logger), which renders through `tracing`.
pub trait Log: Send + Sync {
    /// Announce the task about to run.
    fn stage(&self, msg: &str);
    /// Report progress.
    fn info(&self, msg: &str);
    /// Detail shown on the console only with `--verbose`.
    fn debug(&self, msg: &str);
    /// Something the user should look at, such as an unpinned archive.
    fn warn(&self, msg: &str);
    /// The failure that is about to abort the sync.
    fn error(&self, msg: &str);
    /// A change a dry run would have made.
    fn dry_run(&self, msg: &str);
    /// Record how a task ended, for the summary.
    fn record(&self, task: &str, status: TaskStatus, detail: Option<String>);
}
