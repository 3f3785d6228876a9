//! Primitives the sync tasks are built from: filesystem helpers, downloads,
//! archive extraction and digests.
pub mod archive;
pub mod checksum;
pub mod fetch;
pub mod fs;
