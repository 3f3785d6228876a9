//! Typed view of the packaging manifest.
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The full packaging manifest: where things live and what to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Package layout relative to the project root.
    pub layout: Layout,
    /// Third-party dependencies, processed in declaration order.
    #[serde(rename = "dependency", default)]
    pub dependencies: Vec<Dependency>,
}

/// Relative locations of the package inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    /// Core library source tree, relative to the project root.
    pub core_source: PathBuf,
    /// Package source root, relative to the project root.  Reset on every run.
    pub package_src: PathBuf,
    /// Core library copy, relative to `package_src`.
    pub core_dest: PathBuf,
    /// Third-party directory, relative to `package_src`.
    pub third_party: PathBuf,
    /// Aggregating header, relative to `package_src`.
    pub entry_header: PathBuf,
}

impl Layout {
    /// Resolve every layout entry against the project `root`.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> PackagePaths {
        let package_src = root.join(&self.package_src);
        PackagePaths {
            core_source: root.join(&self.core_source),
            core_dest: package_src.join(&self.core_dest),
            third_party: package_src.join(&self.third_party),
            entry_header: package_src.join(&self.entry_header),
            package_src,
        }
    }
}

/// Absolute paths derived from a [`Layout`] and a project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePaths {
    /// Core library source tree.
    pub core_source: PathBuf,
    /// Package source root.
    pub package_src: PathBuf,
    /// Destination of the core library copy.
    pub core_dest: PathBuf,
    /// Destination directory for third-party dependencies.
    pub third_party: PathBuf,
    /// Generated aggregating header.
    pub entry_header: PathBuf,
}

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ArchiveFormat {
    /// Gzip-compressed tarball.
    #[serde(rename = "tar.gz")]
    TarGz,
    /// Zip archive.
    #[serde(rename = "zip")]
    Zip,
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        })
    }
}

/// Whether a dependency extracts a single file or a directory subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A single file, copied as-is.
    File,
    /// A directory, copied recursively.
    #[default]
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Directory => "directory",
        })
    }
}

/// One third-party archive to fetch and the sub-path to take from it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dependency {
    /// Identifier used in logs and errors.
    pub name: String,
    /// Archive download URL.
    pub url: String,
    /// Archive format.
    pub format: ArchiveFormat,
    /// Path inside the unpacked archive.
    pub include_src: PathBuf,
    /// Destination name under the third-party directory.
    pub include_dest: PathBuf,
    /// File or directory.
    #[serde(default)]
    pub kind: EntryKind,
    /// Optional pinned SHA-256 of the archive (lowercase hex).
    #[serde(default)]
    pub sha256: Option<String>,
}

impl Dependency {
    /// File name used for the downloaded archive: the last URL segment, or
    /// `archive` when the URL has none.
    #[must_use]
    pub fn archive_file_name(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty() && !s.contains(':'))
            .unwrap_or("archive")
    }
}
