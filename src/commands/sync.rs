//! The `sync` command: assembles the package tree.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::Cli;
use crate::config::Manifest;
use crate::error::TaskFailure;
use crate::logging::{Log, Logger};
use crate::resources::fetch::{Fetcher, HttpFetcher};
use crate::tasks::{self, Context};

/// Run the sync command.
///
/// # Errors
///
/// Returns an error if the project root cannot be determined, the built-in
/// manifest is invalid, or any task fails.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<()> {
    let root = resolve_root(cli.root.as_deref())?;

    let version = option_env!("RPL_SYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("rpl-arduino-sync {version}"));
    log.debug(&format!("project root: {}", root.display()));

    log.stage("Loading manifest");
    let manifest = Manifest::builtin()?;
    log.info(&format!(
        "loaded {} dependencies",
        manifest.dependencies.len()
    ));
    for dep in &manifest.dependencies {
        log.debug(&format!("{}: {} ({})", dep.name, dep.url, dep.format));
    }

    sync_package(manifest, &root, log, Arc::new(HttpFetcher::new()), cli.dry_run)?;
    Ok(())
}

/// Run every sync task against the project at `root`, then print the
/// summary.
///
/// # Errors
///
/// Returns the [`TaskFailure`] of the first task that failed.
pub fn sync_package(
    manifest: Manifest,
    root: &Path,
    log: &Arc<Logger>,
    fetcher: Arc<dyn Fetcher>,
    dry_run: bool,
) -> Result<(), TaskFailure> {
    let ctx = Context::new(manifest, root, Arc::clone(log) as Arc<dyn Log>, fetcher, dry_run);
    let result = tasks::run_all(&tasks::all_sync_tasks(), &ctx);
    log.print_summary();
    result?;

    if dry_run {
        log.info("dry run complete, no changes made");
    } else {
        log.info(&format!(
            "package assembled in {}",
            ctx.paths.package_src.display()
        ));
    }
    Ok(())
}

/// Resolve the project root from `--root` or the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or the given
/// root is not a directory.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let Some(root) = root else {
        return std::env::current_dir().context("cannot determine current directory");
    };
    if !root.is_dir() {
        anyhow::bail!("project root {} is not a directory", root.display());
    }
    Ok(root.to_path_buf())
}
