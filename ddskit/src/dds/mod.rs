//! DDS (DirectDraw Surface) reading and writing.
//!
//! This module ties the codecs together: it parses and builds the 128-byte
//! header, walks the mip levels stored after it, and runs the block codecs
//! over each level in parallel row bands.
//!
//! # Features
//!
//! - **Block formats**: DXT1-DXT5 (BC1-BC3), ATI1 (BC4) and ATI2/3Dc (BC5)
//! - **Bitmask formats**: ARGB8888, RGB888, V8U8, G8 and A8L8
//! - **Mip seeking**: decode straight from the first level that fits a size
//! - **Partial decode**: a stream truncated inside a level yields the levels
//!   before it
//!
//! # Example
//!
//! ```
//! use ddskit::dds::{DdsDecoder, DdsEncoder};
//! use ddskit::format::DdsFormat;
//! use ddskit::pixel::PixelBuffer;
//!
//! let image = PixelBuffer::zeroed(64, 64).unwrap();
//!
//! let dds = DdsEncoder::new(DdsFormat::Dxt5).encode(&image).unwrap();
//! let chain = DdsDecoder::new().with_max_dimension(16).decode(&dds).unwrap();
//! assert_eq!(chain.top().width(), 16);
//! ```
//!
//! # Layout
//!
//! | Offset | Contents |
//! |--------|----------|
//! | 0      | magic `"DDS "` |
//! | 4      | 124-byte header, pixel format at 76 |
//! | 128    | level 0, then each smaller level |
//!
//! Block-compressed levels are a grid of blocks, left to right, top to
//! bottom, with at least one block per axis. Bitmask levels are tightly
//! packed rows.

mod bands;
mod decoder;
mod encoder;
mod header;
pub mod types;

pub use decoder::{decode_dds, DdsDecoder};
pub use encoder::{encode_dds, DdsEncoder};
pub use header::HEADER_LEN;
pub use types::{DdsHeader, DdsPixelFormat, PixelFormat};
