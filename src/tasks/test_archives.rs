//! In-memory archive builders shared by unit and integration tests.
//!
//! `tests/common` includes this file by path, so it must only depend on
//! external crates.
#![allow(clippy::unwrap_used, clippy::must_use_candidate, dead_code)]

use std::io::{Cursor, Write as _};

/// Build a gzip-compressed tarball holding `entries` of `(path, contents)`.
pub fn tar_gz(entries: &[(&str, &str)]) -> Vec<u8> {
    let encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    let mut builder = tar::Builder::new(encoder);
    for (path, data) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        builder.append_data(&mut header, path, data.as_bytes()).unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

/// Build a zip archive holding `entries` of `(path, contents)`.
pub fn zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (path, data) in entries {
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file(*path, options).unwrap();
        writer.write_all(data.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
