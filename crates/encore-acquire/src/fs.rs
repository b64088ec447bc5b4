//! Filesystem primitives: atomic placement and provenance mtimes.

use std::io::{self, Write};
use std::path::Path;
use std::time::SystemTime;

use filetime::FileTime;
use tempfile::NamedTempFile;

/// Write `content` to `path` via a temp file in the same directory and a
/// rename. Readers either see the old file or the complete new one, never
/// a partial write; concurrent writers for the same path race benignly
/// with last-rename-wins.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::other("destination has no parent directory"))?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Stamp a file with its provenance modification time. Downstream
/// freshness checks read this, so it must reflect the server's
/// `Last-Modified` when one was supplied.
pub fn set_mtime(path: impl AsRef<Path>, when: SystemTime) -> io::Result<()> {
    filetime::set_file_mtime(path, FileTime::from_system_time(when))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_and_replaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artifact.db");

        atomic_write(&path, b"first").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"first");

        atomic_write(&path, b"second").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        atomic_write(dir.path().join("a"), b"x").unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_set_mtime() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stamped");
        atomic_write(&path, b"x").unwrap();

        let when = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);
        set_mtime(&path, when).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), when);
    }
}
