//! Top-level commands invoked by the binary.

pub mod sync;
