use thiserror::Error;

/// Decode failures. Every variant means the container is unusable; there is
/// no partial-success case.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("container truncated: {0} bytes, need at least 16 for the header")]
    Truncated(usize),

    #[error("container payload failed to decompress: {0}")]
    Decompress(#[source] lz4_flex::block::DecompressError),
}
