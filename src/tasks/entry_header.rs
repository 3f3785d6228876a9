//! Task that writes the package entry header.

use super::{Context, Task, TaskResult};
use crate::error::SyncError;
use crate::resources::fs;

/// Content of the aggregating header included by Arduino sketches.
pub const ENTRY_HEADER: &str = r#"#pragma once
#include "RPL/Parser.hpp"
#include "RPL/Serializer.hpp"
#include "RPL/Deserializer.hpp"
"#;

/// Write the aggregating header at the package source root.
#[derive(Debug)]
pub struct WriteEntryHeader;

impl Task for WriteEntryHeader {
    fn name(&self) -> &'static str {
        "Write entry header"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, SyncError> {
        let path = &ctx.paths.entry_header;
        if ctx.dry_run {
            ctx.log.dry_run(&format!("would write {}", path.display()));
            return Ok(TaskResult::DryRun);
        }

        fs::write_file(path, ENTRY_HEADER)?;
        ctx.log.info(&format!("wrote {}", path.display()));
        Ok(TaskResult::Ok)
    }
}
