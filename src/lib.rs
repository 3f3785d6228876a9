//! Packaging tool for the RPL Arduino library.
//!
//! Assembles `rpl-arduino/src` from the core headers in `include/RPL` and a
//! fixed set of header-only third-party dependencies fetched over HTTPS,
//! then writes the `RPL.h` entry header that Arduino sketches include.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: the embedded packaging manifest (layout and dependency table)
//! - **[`resources`]**: filesystem, download, checksum, and archive primitives
//! - **[`tasks`]**: named pipeline steps wired to resources, run in order
//! - **[`commands`]**: top-level orchestration invoked by the binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod resources;
pub mod tasks;
