//! On-disk response cache for chanscope
//!
//! Responses are stored verbatim under the cache directory, mirroring the
//! API path. Listing documents (boards, catalog, threads, archive) get the
//! date they were fetched spliced into the file name so they are refreshed
//! once per day. Thread documents keep their path and are never refetched.

use crate::error::ChanResult;
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Marker identifying thread documents, which are cached forever
const THREAD_MARKER: &str = "/thread/";

/// Derive the cache key for an API path on the given day.
///
/// `g/catalog.json` on 2024-01-01 becomes `g/catalog-2024-01-01.json`;
/// `g/thread/555.json` is returned as is.
pub fn cache_key(path: &str, today: NaiveDate) -> String {
    if path.contains(THREAD_MARKER) {
        return path.to_string();
    }
    match path.strip_suffix(".json") {
        Some(stem) => format!("{}-{}.json", stem, today.format("%Y-%m-%d")),
        None => path.to_string(),
    }
}

/// Raw byte cache rooted at a base directory
#[derive(Debug, Clone)]
pub struct FileCache {
    base: PathBuf,
}

impl FileCache {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Filesystem location of a cache key
    pub fn path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }

    /// Check if a cached file exists for the key
    pub fn exists(&self, key: &str) -> bool {
        self.path(key).is_file()
    }

    /// Read the cached bytes for a key
    pub fn retrieve(&self, key: &str) -> ChanResult<Vec<u8>> {
        Ok(fs::read(self.path(key))?)
    }

    /// Write bytes for a key, replacing any previous entry
    pub fn store(&self, key: &str, data: &[u8]) -> ChanResult<()> {
        let path = self.path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically via temp file
        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}
