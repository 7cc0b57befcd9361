//! Local file cache for downloaded ECB rates documents.
//!
//! Wraps any [`Provider`] and keeps the last fetched copy of every document in
//! a cache directory. Cached copies younger than `max_age` are served without
//! touching the inner provider.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::config;
use crate::error::{RatesError, Result};
use crate::provider::{DataKind, Provider};

/// A [`Provider`] that caches documents fetched by an inner provider.
///
/// In offline mode the inner provider is never called and any cached copy is
/// served regardless of its age.
pub struct CachedProvider {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never call the inner provider (use cached files only).
    pub offline: bool,
    max_age: Duration,
    inner: Box<dyn Provider>,
}

impl CachedProvider {
    /// Create a new caching provider.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(
        inner: Box<dyn Provider>,
        cache_dir: Option<PathBuf>,
        offline: bool,
        max_age: Duration,
    ) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            max_age,
            inner,
        })
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    /// Local path a document is cached under.
    pub fn cache_path(&self, kind: DataKind) -> PathBuf {
        self.cache_dir.join(kind.file_name())
    }

    pub fn is_cached(&self, kind: DataKind) -> bool {
        self.cache_path(kind).exists()
    }

    /// Whether the cached copy exists and is younger than `max_age`.
    pub fn is_fresh(&self, kind: DataKind) -> bool {
        let modified = fs::metadata(self.cache_path(kind)).and_then(|m| m.modified());
        match modified {
            Ok(modified) => SystemTime::now()
                .duration_since(modified)
                .map(|age| age <= self.max_age)
                // modification time in the future: treat as just written
                .unwrap_or(true),
            Err(_) => false,
        }
    }

    /// Write a document to the cache.
    ///
    /// Writes to a temp file in the cache directory first and renames on
    /// success, so an interrupted write never leaves a partial file behind.
    fn store(&self, dest: &Path, bytes: &[u8]) -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.cache_dir)?;
        tmp.write_all(bytes)?;
        tmp.persist(dest).map_err(|e| e.error)?;
        Ok(())
    }

    fn read_cached(&self, path: &Path) -> Option<Vec<u8>> {
        match fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::warn!("Unreadable cache file {}: {} -- removing", path.display(), e);
                if let Err(e) = fs::remove_file(path) {
                    log::debug!("Could not remove cache file {}: {}", path.display(), e);
                }
                None
            }
        }
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}

impl Provider for CachedProvider {
    fn fetch(&self, kind: DataKind) -> Result<Vec<u8>> {
        let path = self.cache_path(kind);

        if path.exists() && (self.offline || self.is_fresh(kind)) {
            if let Some(bytes) = self.read_cached(&path) {
                log::debug!("serving {} rates from cache {}", kind, path.display());
                return Ok(bytes);
            }
        }

        if self.offline {
            return Err(RatesError::NotFound(format!(
                "{} not cached and offline mode is enabled",
                kind.file_name()
            )));
        }

        let bytes = match self.inner.fetch(kind) {
            Ok(bytes) => bytes,
            Err(e) => {
                // fall back to a stale copy when one exists
                if let Some(bytes) = path.exists().then(|| self.read_cached(&path)).flatten() {
                    log::warn!("Fetching {} rates failed ({}); serving stale cache", kind, e);
                    return Ok(bytes);
                }
                return Err(e);
            }
        };

        if let Err(e) = self.store(&path, &bytes) {
            log::warn!("Failed to cache {}: {}", path.display(), e);
        }
        Ok(bytes)
    }
}
