//! Codec for the wrapped container format the asset servers deliver
//! manifests and database files in.
//!
//! A container is a 16-byte header followed by a raw LZ4 block. The header
//! carries the uncompressed payload length as a little-endian u32 at bytes
//! 4..8; the remaining header bytes are opaque and ignored. Reassembling
//! the length field and the block yields a standard size-prepended LZ4
//! frame, which is what [`decode`] hands to the decompressor.

mod error;

pub use error::ContainerError;

use lz4_flex::block;

/// Size of the fixed container header in bytes.
pub const HEADER_LEN: usize = 16;

/// Byte range of the uncompressed-length field within the header.
const LEN_FIELD: std::ops::Range<usize> = 4..8;

/// Unwrap a container and decompress its payload.
///
/// Inputs shorter than the fixed header are rejected outright; a header
/// that passes the length check but fronts a broken block surfaces as
/// [`ContainerError::Decompress`]. Partial output is never returned.
pub fn decode(raw: &[u8]) -> Result<Vec<u8>, ContainerError> {
    if raw.len() < HEADER_LEN {
        return Err(ContainerError::Truncated(raw.len()));
    }

    let mut frame = Vec::with_capacity(raw.len() - HEADER_LEN + LEN_FIELD.len());
    frame.extend_from_slice(&raw[LEN_FIELD]);
    frame.extend_from_slice(&raw[HEADER_LEN..]);

    block::decompress_size_prepended(&frame).map_err(ContainerError::Decompress)
}

/// Wrap a payload in a container.
///
/// Used to build fixtures; the server side of this format is not ours.
/// Header bytes outside the length field are zeroed, which [`decode`]
/// ignores.
pub fn encode(payload: &[u8]) -> Vec<u8> {
    let compressed = block::compress(payload);

    let mut out = vec![0u8; HEADER_LEN];
    out[LEN_FIELD].copy_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&compressed);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let payload = b"SQLite format 3\0and then some actual table pages";
        let container = encode(payload);
        assert_eq!(decode(&container).unwrap(), payload);
    }

    #[test]
    fn test_round_trip_empty_payload() {
        let container = encode(b"");
        assert_eq!(decode(&container).unwrap(), b"");
    }

    #[test]
    fn test_rejects_short_input() {
        for len in 0..HEADER_LEN {
            let raw = vec![0u8; len];
            match decode(&raw) {
                Err(ContainerError::Truncated(n)) => assert_eq!(n, len),
                other => panic!("expected Truncated for len {len}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_rejects_truncated_block() {
        let container = encode(b"valid payload to start from");
        // Header intact, compressed block cut short: the decompressor can
        // never produce the promised length.
        let truncated = &container[..HEADER_LEN + 1];
        assert!(matches!(
            decode(truncated),
            Err(ContainerError::Decompress(_))
        ));
    }

    #[test]
    fn test_length_field_mismatch_is_corrupt() {
        let mut container = encode(b"payload whose length we then lie about");
        container[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(
            decode(&container),
            Err(ContainerError::Decompress(_))
        ));
    }

    #[test]
    fn test_opaque_header_bytes_ignored() {
        let mut container = encode(b"payload");
        container[0..4].copy_from_slice(b"MAGI");
        container[8..16].copy_from_slice(b"whatever");
        assert_eq!(decode(&container).unwrap(), b"payload");
    }
}
