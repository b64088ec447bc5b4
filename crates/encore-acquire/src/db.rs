//! Read-only handle over a decoded manifest database.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tempfile::TempPath;

/// One named record in a manifest: content hash plus the attribute column
/// the game ships alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub hash: String,
    pub attr: i64,
}

/// An opened manifest: a SQLite image listing the version's assets by
/// name. The domain layer queries it at leisure; this type only knows the
/// one table the pipeline itself needs.
#[derive(Debug)]
pub struct ManifestDb {
    conn: Connection,
    path: PathBuf,
    /// Present when the handle is backed by a scratch file (cache write
    /// failed); keeps the file alive for the life of the handle.
    _scratch: Option<TempPath>,
}

impl ManifestDb {
    /// Open a decoded manifest image read-only.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, rusqlite::Error> {
        let path = path.into();
        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn,
            path,
            _scratch: None,
        })
    }

    /// Open a manifest from a scratch temp file, used when the artifact
    /// cache could not be written. The file lives as long as the handle.
    pub(crate) fn open_scratch(scratch: TempPath) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_with_flags(&scratch, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        Ok(Self {
            conn,
            path: scratch.to_path_buf(),
            _scratch: Some(scratch),
        })
    }

    /// Path of the backing image.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a named record's content hash and attribute.
    pub fn lookup(&self, name: &str) -> Result<Option<RecordEntry>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT hash, attr FROM manifests WHERE name = ?1")?;
        let mut rows = stmt.query([name])?;
        match rows.next()? {
            Some(row) => Ok(Some(RecordEntry {
                hash: row.get(0)?,
                attr: row.get(1)?,
            })),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixture_db(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE manifests (name TEXT, hash TEXT, attr INTEGER);
             INSERT INTO manifests VALUES ('master.mdb', 'c0ffee1234', 1);
             INSERT INTO manifests VALUES ('card.unity3d', 'deadbeef99', 2);",
        )
        .unwrap();
    }

    #[test]
    fn test_lookup_present_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.db");
        fixture_db(&path);

        let db = ManifestDb::open(&path).unwrap();
        let entry = db.lookup("master.mdb").unwrap().unwrap();
        assert_eq!(entry.hash, "c0ffee1234");
        assert_eq!(entry.attr, 1);
    }

    #[test]
    fn test_lookup_absent_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("manifest.db");
        fixture_db(&path);

        let db = ManifestDb::open(&path).unwrap();
        assert!(db.lookup("missing.mdb").unwrap().is_none());
    }
}
