//! Meta-manifest parsing and variant selection.
//!
//! The asset server publishes one index document per resource version. It
//! is a newline-delimited, comma-separated list of manifest variants, one
//! per (platform, asset quality, sound quality) combination. This crate
//! parses that document into typed records and picks the variant matching
//! a requested tuple.

mod error;
mod key;

pub use error::ManifestError;
pub use key::VersionKey;

/// One line of the meta-manifest index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRecord {
    /// Filename of the manifest blob, relative to the version's manifest dir.
    pub filename: String,
    /// Content hash of the blob as published upstream.
    pub content_hash: String,
    pub platform: String,
    pub asset_quality: String,
    pub sound_quality: String,
}

const FIELD_COUNT: usize = 5;

/// Parse a meta-manifest index document.
///
/// Blank lines are skipped. A line with the wrong field count fails the
/// whole parse; the upstream document is machine-generated, so a bad line
/// means we are looking at something that is not a manifest index.
pub fn parse(doc: &str) -> Result<Vec<ManifestRecord>, ManifestError> {
    let mut records = Vec::new();

    for (lineno, line) in doc.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != FIELD_COUNT {
            return Err(ManifestError::MalformedRecord {
                line: lineno + 1,
                found: fields.len(),
            });
        }

        records.push(ManifestRecord {
            filename: fields[0].to_string(),
            content_hash: fields[1].to_string(),
            platform: fields[2].to_string(),
            asset_quality: fields[3].to_string(),
            sound_quality: fields[4].to_string(),
        });
    }

    Ok(records)
}

/// Pick the manifest variant for a (platform, asset quality, sound quality)
/// tuple.
///
/// First match in document order wins. If upstream ever lists conflicting
/// duplicates, the earliest entry is taken deterministically rather than
/// treating the document as ambiguous.
pub fn select<'a>(
    records: &'a [ManifestRecord],
    platform: &str,
    asset_quality: &str,
    sound_quality: &str,
) -> Option<&'a ManifestRecord> {
    records.iter().find(|r| {
        r.platform == platform && r.asset_quality == asset_quality && r.sound_quality == sound_quality
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "f1.db,aaa111,Android,High,High\nf2.db,bbb222,Android,Low,Low\n";

    #[test]
    fn test_parse_skips_blank_lines() {
        let records = parse("a,b,Android,High,High\n\n\nc,d,iOS,Low,Low\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].filename, "a");
        assert_eq!(records[1].platform, "iOS");
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        let err = parse("a,b,Android,High,High\nonly,three,fields\n").unwrap_err();
        assert!(matches!(
            err,
            ManifestError::MalformedRecord { line: 2, found: 3 }
        ));
    }

    #[test]
    fn test_parse_empty_document_is_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_select_matches_tuple() {
        let records = parse(DOC).unwrap();
        let hit = select(&records, "Android", "Low", "Low").unwrap();
        assert_eq!(hit.filename, "f2.db");
        assert_eq!(hit.content_hash, "bbb222");
    }

    #[test]
    fn test_select_no_match() {
        let records = parse(DOC).unwrap();
        assert!(select(&records, "iOS", "High", "High").is_none());
    }

    #[test]
    fn test_select_first_of_conflicting_duplicates_wins() {
        let records = parse(
            "first.db,hash1,Android,High,High\nsecond.db,hash2,Android,High,High\n",
        )
        .unwrap();
        let hit = select(&records, "Android", "High", "High").unwrap();
        assert_eq!(hit.filename, "first.db");
    }
}
