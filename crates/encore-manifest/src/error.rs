use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("malformed manifest record on line {line}: expected 5 fields, found {found}")]
    MalformedRecord { line: usize, found: usize },
}
