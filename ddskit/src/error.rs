//! Error types for DDS decoding and encoding.

use thiserror::Error;

/// Errors that can occur while reading or writing DDS data.
///
/// Header and format errors are fatal. [`DdsError::TruncatedData`] is the
/// one variant the decoder recovers from: when a mip level runs past the end
/// of the stream, the levels already decoded are returned instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DdsError {
    /// The first four bytes are not `"DDS "`.
    #[error("Invalid DDS magic: expected \"DDS \", found {found:02X?}")]
    InvalidMagic { found: [u8; 4] },

    /// A fixed-size header field holds an unexpected value, or the stream
    /// is shorter than a header.
    #[error("Malformed DDS header: {0}")]
    MalformedHeader(String),

    /// FourCC, bitmask layout or format name not present in the registry.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// Recognised but not implemented (for example the DX10 extended header).
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A directly seeked mip level starts past the end of the stream.
    #[error("Requested mip not present: offset {offset} is beyond stream length {stream_len}")]
    RequestedMipNotPresent { offset: u64, stream_len: u64 },

    /// The stream ended inside a mip level.
    #[error("Truncated data in mip level {level}: needed {needed} bytes, {available} available")]
    TruncatedData {
        level: usize,
        needed: usize,
        available: usize,
    },

    /// Zero width or height.
    #[error("Invalid dimensions: {0}×{1}")]
    InvalidDimensions(u32, u32),

    /// An encode size limit that is not a power of two.
    #[error("Invalid max dimension {0}: must be a power of two")]
    InvalidMaxDimension(u32),

    /// Mip chain is empty or breaks the halving rule.
    #[error("Invalid mipmap chain: {0}")]
    InvalidMipmapChain(String),

    /// Byte length does not match `width * height * 4`.
    #[error("Pixel buffer size mismatch for {width}×{height}: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The worker pool could not be created.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl DdsError {
    /// Returns true for errors the decoder may recover from by returning a
    /// partial mip chain.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DdsError::TruncatedData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dds_error_display() {
        let err = DdsError::InvalidDimensions(100, 200);
        assert_eq!(err.to_string(), "Invalid dimensions: 100×200");

        let err = DdsError::UnsupportedFormat("DX10".to_string());
        assert_eq!(err.to_string(), "Unsupported format: DX10");
    }

    #[test]
    fn test_invalid_magic_display_shows_bytes() {
        let err = DdsError::InvalidMagic {
            found: *b"PNG\r",
        };
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_invalid_max_dimension_display() {
        let err = DdsError::InvalidMaxDimension(100);
        assert_eq!(
            err.to_string(),
            "Invalid max dimension 100: must be a power of two"
        );
    }

    #[test]
    fn test_only_truncation_is_recoverable() {
        let truncated = DdsError::TruncatedData {
            level: 2,
            needed: 64,
            available: 10,
        };
        assert!(truncated.is_recoverable());
        assert!(!DdsError::MalformedHeader("size".into()).is_recoverable());
        assert!(!DdsError::RequestedMipNotPresent {
            offset: 300,
            stream_len: 200
        }
        .is_recoverable());
    }
}
