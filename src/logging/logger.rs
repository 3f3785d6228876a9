//! [`Log`] implementation that renders through `tracing` and keeps task
//! outcomes for the end-of-run summary.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET, log_file_path};
use super::types::{Log, TaskEntry, TaskStatus};

/// Outcome counts for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Tally {
    ok: usize,
    dry_run: usize,
    failed: usize,
    skipped: usize,
}

impl Tally {
    fn of(entries: &[TaskEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut tally, entry| {
            match entry.status {
                TaskStatus::Ok => tally.ok += 1,
                TaskStatus::DryRun => tally.dry_run += 1,
                TaskStatus::Failed => tally.failed += 1,
                TaskStatus::Skipped => tally.skipped += 1,
            }
            tally
        })
    }

    /// Closing line of the summary.
    fn verdict(self) -> String {
        let total = self.ok + self.dry_run + self.failed + self.skipped;
        if self.failed > 0 {
            format!(
                "sync aborted: {} of {total} tasks completed, {} not run",
                self.ok + self.dry_run,
                self.skipped
            )
        } else if self.dry_run > 0 {
            format!("dry run: {total} tasks previewed, package left untouched")
        } else {
            format!("sync complete: {total} tasks ok")
        }
    }
}

/// Summary marker and colour for a task outcome.
const fn marker(status: TaskStatus) -> (&'static str, &'static str) {
    match status {
        TaskStatus::Ok => ("✓", "\x1b[32m"),
        TaskStatus::DryRun => ("~", "\x1b[37m"),
        TaskStatus::Failed => ("✗", "\x1b[31m"),
        TaskStatus::Skipped => ("-", "\x1b[33m"),
    }
}

/// Pipeline logger.
///
/// Messages go through [`tracing`], so what reaches the console and the log
/// file is decided by the subscriber from
/// [`init_subscriber`](super::init_subscriber).  Task outcomes are kept here
/// and replayed by [`print_summary`](Self::print_summary).
#[derive(Debug)]
pub struct Logger {
    outcomes: Mutex<Vec<TaskEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger with no recorded outcomes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::default(),
            log_file: log_file_path(),
        }
    }

    /// Outcomes recorded so far, in task order.
    #[must_use]
    pub fn task_entries(&self) -> Vec<TaskEntry> {
        self.outcomes
            .lock()
            .map_or_else(|_| Vec::new(), |outcomes| outcomes.clone())
    }

    /// Print one line per recorded task and a closing verdict.
    pub fn print_summary(&self) {
        let entries = self.task_entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");
        for entry in &entries {
            let (mark, colour) = marker(entry.status);
            let detail = entry
                .detail
                .as_deref()
                .map_or_else(String::new, |d| format!(": {d}"));
            self.info(&format!("{colour}{mark} {}{detail}\x1b[0m", entry.name));
        }
        self.info(&Tally::of(&entries).verdict());

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mfull log: {}\x1b[0m", path.display()));
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record(&self, task: &str, status: TaskStatus, detail: Option<String>) {
        if let Ok(mut outcomes) = self.outcomes.lock() {
            outcomes.push(TaskEntry {
                name: task.to_string(),
                status,
                detail,
            });
        }
    }
}
