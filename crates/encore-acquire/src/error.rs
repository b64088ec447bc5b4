//! Error types for encore-acquire.

use encore_container::ContainerError;
use encore_manifest::ManifestError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AcquireError>;

/// Terminal failure of a single acquisition attempt. None of these are
/// retried internally; fan-out callers degrade, direct callers surface.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Network-level failure: connect, timeout, or a non-2xx status.
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("manifest index unparsable: {0}")]
    MalformedIndex(#[source] ManifestError),

    #[error("manifest index has no records")]
    EmptyIndex,

    #[error("manifest index is not utf-8 text")]
    IndexNotText,

    #[error("no manifest variant for {platform}/{asset_quality}/{sound_quality}")]
    VariantNotFound {
        platform: String,
        asset_quality: String,
        sound_quality: String,
    },

    #[error("corrupt content container: {0}")]
    CorruptContainer(#[from] ContainerError),

    #[error("record {0:?} not present in manifest")]
    RecordNotFound(String),

    #[error("content hash {0:?} too short to shard into a download path")]
    MalformedHash(String),

    #[error("manifest database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}
