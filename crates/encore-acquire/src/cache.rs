//! Flat keyed store for decoded manifest artifacts.

use std::io;
use std::path::{Path, PathBuf};

use encore_manifest::VersionKey;
use tracing::debug;

use crate::fs::atomic_write;

/// On-disk cache of decoded manifest databases, one file per
/// [`VersionKey`]. Entries never expire on their own; [`clear`] is the
/// explicit administrative invalidation.
///
/// [`clear`]: ArtifactCache::clear
#[derive(Debug)]
pub struct ArtifactCache {
    root: PathBuf,
}

impl ArtifactCache {
    /// Open (creating if needed) a cache rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Path an entry for `key` would occupy, whether or not it exists.
    pub fn path_for(&self, key: &VersionKey) -> PathBuf {
        self.root.join(key.cache_name())
    }

    /// Look up a cached artifact. `None` means the caller must populate
    /// via [`put`] before use.
    ///
    /// [`put`]: ArtifactCache::put
    pub fn get(&self, key: &VersionKey) -> Option<PathBuf> {
        let path = self.path_for(key);
        path.is_file().then_some(path)
    }

    /// Persist a decoded artifact. Atomic per key: a concurrent reader
    /// sees the previous entry or the complete new one.
    pub fn put(&self, key: &VersionKey, decoded: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_for(key);
        atomic_write(&path, decoded)?;
        debug!(entry = %path.display(), bytes = decoded.len(), "cached artifact");
        Ok(path)
    }

    /// Drop every entry. Returns the number of entries removed.
    pub fn clear(&self) -> io::Result<usize> {
        let mut removed = 0;
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        debug!(removed, "cleared artifact cache");
        Ok(removed)
    }

    /// Number of entries currently present. Counts regular files only,
    /// the same population [`clear`] removes.
    ///
    /// [`clear`]: ArtifactCache::clear
    pub fn len(&self) -> io::Result<usize> {
        let mut entries = 0;
        for entry in std::fs::read_dir(&self.root)? {
            if entry?.file_type()?.is_file() {
                entries += 1;
            }
        }
        Ok(entries)
    }

    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(version: &str, asset_quality: &str) -> VersionKey {
        VersionKey::new(version, "Android", asset_quality, "High")
    }

    #[test]
    fn test_put_then_get_returns_same_bytes() {
        let dir = tempdir().unwrap();
        let cache = ArtifactCache::open(dir.path()).unwrap();

        let k = key("100", "High");
        assert!(cache.get(&k).is_none());

        let path = cache.put(&k, b"decoded database image").unwrap();
        assert_eq!(cache.get(&k).unwrap(), path);
        assert_eq!(std::fs::read(&path).unwrap(), b"decoded database image");
    }

    #[test]
    fn test_distinct_keys_distinct_entries() {
        let dir = tempdir().unwrap();
        let cache = ArtifactCache::open(dir.path()).unwrap();

        cache.put(&key("100", "High"), b"high").unwrap();
        cache.put(&key("100", "Low"), b"low").unwrap();

        assert_eq!(
            std::fs::read(cache.get(&key("100", "High")).unwrap()).unwrap(),
            b"high"
        );
        assert_eq!(
            std::fs::read(cache.get(&key("100", "Low")).unwrap()).unwrap(),
            b"low"
        );
    }

    #[test]
    fn test_put_overwrites_fully() {
        let dir = tempdir().unwrap();
        let cache = ArtifactCache::open(dir.path()).unwrap();

        let k = key("100", "High");
        cache.put(&k, b"a much longer original entry body").unwrap();
        cache.put(&k, b"short").unwrap();
        assert_eq!(std::fs::read(cache.get(&k).unwrap()).unwrap(), b"short");
    }

    #[test]
    fn test_len_and_clear_ignore_stray_directories() {
        let dir = tempdir().unwrap();
        let cache = ArtifactCache::open(dir.path()).unwrap();
        std::fs::create_dir(dir.path().join("stray")).unwrap();

        cache.put(&key("100", "High"), b"x").unwrap();
        assert_eq!(cache.len().unwrap(), 1);

        assert_eq!(cache.clear().unwrap(), 1);
        assert!(cache.is_empty().unwrap());
    }

    #[test]
    fn test_clear_removes_everything() {
        let dir = tempdir().unwrap();
        let cache = ArtifactCache::open(dir.path()).unwrap();

        cache.put(&key("100", "High"), b"x").unwrap();
        cache.put(&key("101", "High"), b"y").unwrap();
        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.is_empty().unwrap());
        assert!(cache.get(&key("100", "High")).is_none());
    }
}
