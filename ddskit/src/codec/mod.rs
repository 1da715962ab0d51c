//! Block codecs.
//!
//! Every block codec is a pure function of one block's bytes (decode) or one
//! texel's pixels (encode). [`decode_block`] and [`encode_block`] pick the
//! codec with an exhaustive match on [`BlockFormat`]; uncompressed layouts
//! are not block-based and are handled by [`uncompressed`] instead.
//!
//! # Block sizes
//!
//! | Codec | Bytes | Contents |
//! |-------|-------|----------|
//! | BC1   | 8     | RGB565 endpoints + 2-bit indices |
//! | BC2   | 16    | 4-bit explicit alpha + BC1 colour |
//! | BC3   | 16    | interpolated alpha + BC1 colour |
//! | BC4   | 8     | one interpolated channel |
//! | BC5   | 16    | two interpolated channels |

mod bc1;
mod bc2;
mod bc3;
mod bc4;
mod bc5;
pub mod conversion;
pub mod palette;
pub mod uncompressed;

pub use bc1::Bc1Codec;
pub use bc2::Bc2Codec;
pub use bc3::Bc3Codec;
pub use bc4::{compress_channel, decompress_channel, Bc4Codec};
pub use bc5::{reconstruct_z, Bc5Codec};

use crate::error::DdsError;
use crate::format::BlockFormat;
use crate::texel::{Texel, TexelChannels};

/// Compressed size of one 4×4 block, or `None` for uncompressed layouts.
pub fn block_bytes(format: BlockFormat) -> Option<usize> {
    match format {
        BlockFormat::Bc1 | BlockFormat::Bc4 => Some(8),
        BlockFormat::Bc2 | BlockFormat::Bc3 | BlockFormat::Bc5 => Some(16),
        BlockFormat::Uncompressed(_) => None,
    }
}

fn block_array<const N: usize>(block: &[u8]) -> Result<[u8; N], DdsError> {
    block.try_into().map_err(|_| DdsError::TruncatedData {
        level: 0,
        needed: N,
        available: block.len(),
    })
}

/// Decode one compressed block.
pub fn decode_block(format: BlockFormat, block: &[u8]) -> Result<TexelChannels, DdsError> {
    match format {
        BlockFormat::Bc1 => Ok(Bc1Codec::decompress_block(&block_array(block)?)),
        BlockFormat::Bc2 => Ok(Bc2Codec::decompress_block(&block_array(block)?)),
        BlockFormat::Bc3 => Ok(Bc3Codec::decompress_block(&block_array(block)?)),
        BlockFormat::Bc4 => Ok(Bc4Codec::decompress_block(&block_array(block)?)),
        BlockFormat::Bc5 => Ok(Bc5Codec::decompress_block(&block_array(block)?)),
        BlockFormat::Uncompressed(_) => Err(DdsError::UnsupportedFormat(
            "uncompressed layouts have no block codec".to_string(),
        )),
    }
}

/// Encode one texel into `out`, which must hold exactly one block.
///
/// `alpha_cutoff` only affects BC1: pixels with alpha below it are written
/// as transparent.
pub fn encode_block(
    format: BlockFormat,
    texel: &Texel,
    alpha_cutoff: u8,
    out: &mut [u8],
) -> Result<(), DdsError> {
    match format {
        BlockFormat::Bc1 => write_block(out, &Bc1Codec::compress_block(texel, alpha_cutoff)),
        BlockFormat::Bc2 => write_block(out, &Bc2Codec::compress_block(texel)),
        BlockFormat::Bc3 => write_block(out, &Bc3Codec::compress_block(texel)),
        BlockFormat::Bc4 => write_block(out, &Bc4Codec::compress_block(texel)),
        BlockFormat::Bc5 => write_block(out, &Bc5Codec::compress_block(texel)),
        BlockFormat::Uncompressed(_) => Err(DdsError::UnsupportedFormat(
            "uncompressed layouts have no block codec".to_string(),
        )),
    }
}

fn write_block(out: &mut [u8], block: &[u8]) -> Result<(), DdsError> {
    if out.len() != block.len() {
        return Err(DdsError::BufferSizeMismatch {
            width: 4,
            height: 4,
            expected: block.len(),
            actual: out.len(),
        });
    }
    out.copy_from_slice(block);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DdsFormat;
    use proptest::prelude::*;

    const COMPRESSED: [BlockFormat; 5] = [
        BlockFormat::Bc1,
        BlockFormat::Bc2,
        BlockFormat::Bc3,
        BlockFormat::Bc4,
        BlockFormat::Bc5,
    ];

    #[test]
    fn test_block_bytes_match_registry() {
        for format in DdsFormat::ALL {
            let d = format.descriptor();
            if d.is_block_compressed {
                assert_eq!(block_bytes(d.codec), Some(d.block_size));
            } else {
                assert_eq!(block_bytes(d.codec), None);
            }
        }
    }

    #[test]
    fn test_uncompressed_has_no_block_codec() {
        let layout = match DdsFormat::G8.block_format() {
            BlockFormat::Uncompressed(l) => l,
            _ => unreachable!(),
        };
        let result = decode_block(BlockFormat::Uncompressed(layout), &[0; 8]);
        assert!(matches!(result, Err(DdsError::UnsupportedFormat(_))));

        let mut out = [0u8; 8];
        let result = encode_block(BlockFormat::Uncompressed(layout), &[0; 64], 0, &mut out);
        assert!(matches!(result, Err(DdsError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_short_block_is_truncated() {
        let result = decode_block(BlockFormat::Bc3, &[0; 10]);
        assert!(matches!(
            result,
            Err(DdsError::TruncatedData {
                needed: 16,
                available: 10,
                ..
            })
        ));
    }

    #[test]
    fn test_encode_rejects_wrong_output_size() {
        let mut out = [0u8; 8];
        let result = encode_block(BlockFormat::Bc3, &[0; 64], 0, &mut out);
        assert!(matches!(result, Err(DdsError::BufferSizeMismatch { .. })));
    }

    fn grey_texel(values: &[u8; 16], alpha: &[u8; 16]) -> Texel {
        let mut texel = [0u8; 64];
        for (i, px) in texel.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&[values[i], values[i], values[i], alpha[i]]);
        }
        texel
    }

    proptest! {
        #[test]
        fn prop_colour_roundtrip_within_palette_step(
            values in proptest::array::uniform16(any::<u8>()),
            codec in 0usize..3,
        ) {
            let format = COMPRESSED[codec];
            let texel = grey_texel(&values, &[255; 16]);
            let mut block = vec![0u8; block_bytes(format).unwrap()];
            encode_block(format, &texel, 0, &mut block).unwrap();
            let decoded = decode_block(format, &block).unwrap();

            // four-colour mode: endpoints a third apart, plus 5:6:5 rounding
            // of both endpoints
            let max = *values.iter().max().unwrap() as i32;
            let min = *values.iter().min().unwrap() as i32;
            let step = (max - min) / 3 + 1 + 10;
            for channel in [&decoded.red, &decoded.green, &decoded.blue] {
                for i in 0..16 {
                    prop_assert!((channel[i] as i32 - values[i] as i32).abs() <= step);
                }
            }
        }

        #[test]
        fn prop_channel_roundtrip_within_palette_step(
            red in proptest::array::uniform16(any::<u8>()),
            green in proptest::array::uniform16(any::<u8>()),
            bc5 in any::<bool>(),
        ) {
            let mut texel = [0u8; 64];
            for (i, px) in texel.chunks_exact_mut(4).enumerate() {
                px.copy_from_slice(&[0, green[i], red[i], 255]);
            }
            let format = if bc5 { BlockFormat::Bc5 } else { BlockFormat::Bc4 };
            let mut block = vec![0u8; block_bytes(format).unwrap()];
            encode_block(format, &texel, 0, &mut block).unwrap();
            let decoded = decode_block(format, &block).unwrap();

            let mut checks = vec![(&red, &decoded.red)];
            if bc5 {
                checks.push((&green, &decoded.green));
            }
            for (source, channel) in checks {
                // eight-value mode between the channel's own endpoints
                let max = *source.iter().max().unwrap() as i32;
                let min = *source.iter().min().unwrap() as i32;
                let step = (max - min) / 7 + 1;
                for i in 0..16 {
                    prop_assert!((channel[i] as i32 - source[i] as i32).abs() <= step);
                }
            }
        }

        #[test]
        fn prop_bc3_alpha_within_one_step(alpha in proptest::array::uniform16(any::<u8>())) {
            let texel = grey_texel(&[100; 16], &alpha);
            let mut block = [0u8; 16];
            encode_block(BlockFormat::Bc3, &texel, 0, &mut block).unwrap();
            let decoded = decode_block(BlockFormat::Bc3, &block).unwrap();

            let max = *alpha.iter().max().unwrap() as i32;
            let min = *alpha.iter().min().unwrap() as i32;
            let step = (max - min) / 7 + 1;
            for i in 0..16 {
                prop_assert!((decoded.alpha[i] as i32 - alpha[i] as i32).abs() <= step);
            }
        }
    }
}
