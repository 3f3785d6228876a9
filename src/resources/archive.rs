//! Unpacking of downloaded dependency archives.
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::config::ArchiveFormat;
use crate::error::{BoxError, SyncError};

/// Unpack the whole of `archive` into `dest`, dispatching on `format`.
///
/// `dest` is created if missing.  Entries that would escape `dest` (absolute
/// paths, `..` components) are skipped by the underlying readers.
///
/// # Errors
///
/// Returns [`SyncError::Io`] if the archive cannot be opened or `dest`
/// cannot be created, and [`SyncError::Archive`] if the archive is corrupt or
/// cannot be unpacked.
pub fn extract(format: ArchiveFormat, archive: &Path, dest: &Path) -> Result<(), SyncError> {
    std::fs::create_dir_all(dest).map_err(SyncError::io(dest))?;
    let reader = BufReader::new(File::open(archive).map_err(SyncError::io(archive))?);

    let result: Result<(), BoxError> = match format {
        ArchiveFormat::TarGz => unpack_tar_gz(reader, dest).map_err(Into::into),
        ArchiveFormat::Zip => unpack_zip(reader, dest).map_err(Into::into),
    };
    result.map_err(|source| SyncError::Archive {
        archive: archive.to_path_buf(),
        format,
        source,
    })
}

fn unpack_tar_gz<R: Read>(reader: R, dest: &Path) -> std::io::Result<()> {
    tar::Archive::new(GzDecoder::new(reader)).unpack(dest)
}

fn unpack_zip<R: Read + Seek>(reader: R, dest: &Path) -> zip::result::ZipResult<()> {
    zip::ZipArchive::new(reader)?.extract(dest)
}
