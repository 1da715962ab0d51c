//! ddskit - DirectDraw Surface texture codec
//!
//! This library reads and writes DDS textures: DXT1-DXT5, ATI1 and ATI2
//! block compression, a handful of uncompressed bitmask layouts, mip chain
//! generation and direct seeking to a smaller mip level.
//!
//! # High-Level API
//!
//! [`decode_dds`] and [`encode_dds`] cover the common cases; the
//! [`dds::DdsDecoder`] and [`dds::DdsEncoder`] builders expose the rest.
//!
//! ```
//! use ddskit::{decode_dds, encode_dds, DdsFormat, MipChain, PixelBuffer, ProcessingConfig};
//!
//! let config = ProcessingConfig::default();
//! let top = PixelBuffer::zeroed(32, 32).unwrap();
//!
//! let bytes = encode_dds(&MipChain::single(top), DdsFormat::Dxt1, true, &config).unwrap();
//! let chain = decode_dds(&bytes, 0, &config).unwrap();
//! assert_eq!(chain.len(), 6);
//! ```
//!
//! All pixel data is 8-bit BGRA.

pub mod codec;
pub mod config;
pub mod dds;
pub mod error;
pub mod format;
pub mod log;
pub mod logging;
pub mod mipmap;
pub mod pixel;
pub mod texel;

pub use config::ProcessingConfig;
pub use dds::{decode_dds, encode_dds};
pub use error::DdsError;
pub use format::DdsFormat;
pub use pixel::{BufferPool, MipChain, PixelBuffer};

/// Version of the ddskit library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_top_level_reexports() {
        let config = ProcessingConfig::default().with_parallelism(1);
        let top = PixelBuffer::zeroed(4, 4).unwrap();
        let bytes = encode_dds(&MipChain::single(top.clone()), DdsFormat::Argb8888, false, &config)
            .unwrap();
        let chain = decode_dds(&bytes, 0, &config).unwrap();
        assert_eq!(chain.top(), &top);
    }
}
