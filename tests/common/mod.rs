// Shared helpers for integration tests.
//
// Provides a temporary project root holding a small core library, an
// in-memory fetcher serving generated archives for the built-in dependency
// URLs, and a fluent builder so each test can tweak the setup without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rpl_arduino_sync::commands::sync::sync_package;
use rpl_arduino_sync::config::Manifest;
use rpl_arduino_sync::error::{SyncError, TaskFailure};
use rpl_arduino_sync::logging::Logger;
use rpl_arduino_sync::resources::fetch::Fetcher;

#[path = "../../src/tasks/test_archives.rs"]
mod archives;
pub use archives::{tar_gz, zip};

/// Source of the `frozen` tarball in the built-in manifest.
pub const FROZEN_URL: &str =
    "https://github.com/serge-sans-paille/frozen/archive/refs/tags/1.2.0.tar.gz";
/// Source of the `expected` zip in the built-in manifest.
pub const EXPECTED_URL: &str =
    "https://github.com/TartanLlama/expected/archive/refs/tags/v1.3.1.zip";
/// Source of the `cppcrc` zip in the built-in manifest.
pub const CPPCRC_URL: &str = "https://codeload.github.com/DarrenLevine/cppcrc/zip/refs/heads/main";

/// Core library files written under `include/RPL`.
pub const CORE_FILES: &[(&str, &str)] = &[
    ("Parser.hpp", "#pragma once\nclass Parser {};\n"),
    ("Serializer.hpp", "#pragma once\nclass Serializer {};\n"),
    ("Deserializer.hpp", "#pragma once\nclass Deserializer {};\n"),
    ("Codec/Util.hpp", "#pragma once\nnamespace codec {}\n"),
];

/// In-memory fetcher keyed by URL.  Unknown URLs fail with a network error.
#[derive(Debug, Default)]
pub struct FakeFetcher {
    archives: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    /// A fetcher serving plausible archives for every built-in dependency.
    pub fn upstream() -> Self {
        Self::default()
            .with(
                FROZEN_URL,
                tar_gz(&[
                    ("frozen-1.2.0/include/frozen/map.h", "// frozen map\n"),
                    ("frozen-1.2.0/include/frozen/bits/elsa.h", "// elsa\n"),
                    ("frozen-1.2.0/README.rst", "frozen\n"),
                ]),
            )
            .with(
                EXPECTED_URL,
                zip(&[
                    ("expected-1.3.1/include/tl/expected.hpp", "// expected\n"),
                    ("expected-1.3.1/tests/main.cpp", "int main() {}\n"),
                ]),
            )
            .with(
                CPPCRC_URL,
                zip(&[
                    ("cppcrc-main/cppcrc.h", "// cppcrc\n"),
                    ("cppcrc-main/LICENSE", "MIT\n"),
                ]),
            )
    }

    /// Serve `bytes` for `url`, replacing any previous archive.
    pub fn with(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.archives.insert(url.to_string(), bytes);
        self
    }

    /// Stop serving `url`.
    pub fn without(mut self, url: &str) -> Self {
        self.archives.remove(url);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, SyncError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push(url.to_string());
        let bytes = self.archives.get(url).ok_or_else(|| SyncError::Network {
            url: url.to_string(),
            source: "connection refused".into(),
        })?;
        std::fs::write(dest, bytes).map_err(SyncError::io(dest))?;
        Ok(bytes.len() as u64)
    }
}

/// An isolated project root backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary project root.
    pub root: tempfile::TempDir,
    /// Fetcher used by [`run`](Self::run).
    pub fetcher: Arc<FakeFetcher>,
    /// Logger used by the most recent run.
    pub log: Arc<Logger>,
}

impl IntegrationTestContext {
    /// Path to the project root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// `<root>/rpl-arduino/src`.
    pub fn package_src(&self) -> PathBuf {
        self.root.path().join("rpl-arduino/src")
    }

    /// `<root>/include/RPL`.
    pub fn core_source(&self) -> PathBuf {
        self.root.path().join("include/RPL")
    }

    /// Run the full sync against this project with the built-in manifest.
    pub fn run(&self) -> Result<(), TaskFailure> {
        self.run_with(Manifest::builtin().expect("builtin manifest"), false)
    }

    /// Run the full sync with `manifest`.
    pub fn run_with(&self, manifest: Manifest, dry_run: bool) -> Result<(), TaskFailure> {
        sync_package(
            manifest,
            self.root.path(),
            &self.log,
            Arc::clone(&self.fetcher) as Arc<dyn Fetcher>,
            dry_run,
        )
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    root: tempfile::TempDir,
    fetcher: FakeFetcher,
    core: bool,
}

impl TestContextBuilder {
    /// Begin building a project with the standard core library and upstream
    /// archives.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            fetcher: FakeFetcher::upstream(),
            core: true,
        }
    }

    /// Do not create `include/RPL`.
    pub fn without_core_library(mut self) -> Self {
        self.core = false;
        self
    }

    /// Replace the fetcher.
    pub fn with_fetcher(mut self, fetcher: FakeFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    /// Write `content` to `relative` under the project root.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.root.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        if self.core {
            let core = self.root.path().join("include/RPL");
            for (path, content) in CORE_FILES {
                let file = core.join(path);
                std::fs::create_dir_all(file.parent().expect("core file parent"))
                    .expect("create core dir");
                std::fs::write(file, content).expect("write core file");
            }
        }
        IntegrationTestContext {
            root: self.root,
            fetcher: Arc::new(self.fetcher),
            log: Arc::new(Logger::new()),
        }
    }
}

/// Snapshot every file under `dir` as relative path → contents.
pub fn tree(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    fn walk(base: &Path, dir: &Path, out: &mut BTreeMap<String, Vec<u8>>) {
        for entry in std::fs::read_dir(dir).expect("read dir") {
            let path = entry.expect("dir entry").path();
            if path.is_dir() {
                walk(base, &path, out);
            } else {
                let rel = path
                    .strip_prefix(base)
                    .expect("strip prefix")
                    .to_string_lossy()
                    .replace('\\', "/");
                out.insert(rel, std::fs::read(&path).expect("read file"));
            }
        }
    }

    let mut out = BTreeMap::new();
    if dir.exists() {
        walk(dir, dir, &mut out);
    }
    out
}
