//! BC4/ATI1 block compression.
//!
//! BC4 stores one channel per 4×4 block in 8 bytes:
//! - 1 byte: endpoint 0
//! - 1 byte: endpoint 1
//! - 6 bytes: 16 3-bit indices, little-endian across the 48 bits
//!
//! The same channel block carries BC3 alpha and both BC5 channels.

use crate::codec::palette::{build_channel_palette, nearest_channel_index};
use crate::texel::{Texel, TexelChannels};

/// Encode 16 values of one channel into an interpolated channel block.
///
/// Endpoint 0 is the maximum and endpoint 1 the minimum, which selects the
/// eight-value mode. A flat block stores equal endpoints; the six-value mode
/// then still puts the exact value at index 0.
pub fn compress_channel(values: &[u8; 16], signed: bool) -> [u8; 8] {
    let max = values.iter().copied().max().unwrap_or(0);
    let min = values.iter().copied().min().unwrap_or(0);
    let palette = build_channel_palette(max, min, signed);

    let mut indices = 0u64;
    for (i, &v) in values.iter().enumerate() {
        indices |= (nearest_channel_index(&palette, v) as u64) << (i * 3);
    }

    let mut output = [0u8; 8];
    output[0] = max;
    output[1] = min;
    output[2..8].copy_from_slice(&indices.to_le_bytes()[0..6]);
    output
}

/// Decode an interpolated channel block into 16 values.
pub fn decompress_channel(block: &[u8; 8], signed: bool) -> [u8; 16] {
    let palette = build_channel_palette(block[0], block[1], signed);

    let mut bits = [0u8; 8];
    bits[0..6].copy_from_slice(&block[2..8]);
    let indices = u64::from_le_bytes(bits);

    std::array::from_fn(|i| palette[((indices >> (i * 3)) & 0x7) as usize])
}

/// BC4 block codec. The red channel is stored.
pub struct Bc4Codec;

impl Bc4Codec {
    /// Compress the red channel of a texel to 8 bytes.
    pub fn compress_block(texel: &Texel) -> [u8; 8] {
        let channels = TexelChannels::from_texel(texel);
        compress_channel(&channels.red, false)
    }

    /// Decompress an 8-byte block. The value is broadcast to blue, green and
    /// red; alpha is opaque.
    pub fn decompress_block(block: &[u8; 8]) -> TexelChannels {
        let values = decompress_channel(block, false);
        TexelChannels {
            blue: values,
            green: values,
            red: values,
            alpha: [255; 16],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_flat_channel() {
        let block = compress_channel(&[77; 16], false);
        assert_eq!(block[0], 77);
        assert_eq!(block[1], 77);
        assert!(block[2..].iter().all(|&b| b == 0));
        assert_eq!(decompress_channel(&block, false), [77; 16]);
    }

    #[test]
    fn test_endpoints_are_exact() {
        let mut values = [100u8; 16];
        values[0] = 0;
        values[15] = 255;
        let decoded = decompress_channel(&compress_channel(&values, false), false);
        assert_eq!(decoded[0], 0);
        assert_eq!(decoded[15], 255);
    }

    #[test]
    fn test_index_bit_packing() {
        // endpoints 255/0, pixel 0 -> index 1, pixel 15 -> index 1
        let mut values = [255u8; 16];
        values[0] = 0;
        values[15] = 0;
        let block = compress_channel(&values, false);
        let mut bits = [0u8; 8];
        bits[0..6].copy_from_slice(&block[2..8]);
        let indices = u64::from_le_bytes(bits);
        assert_eq!(indices & 0x7, 1);
        assert_eq!((indices >> 45) & 0x7, 1);
        assert_eq!((indices >> 3) & 0x7, 0);
    }

    #[test]
    fn test_error_within_one_palette_step() {
        let values: [u8; 16] = std::array::from_fn(|i| (i * 16) as u8);
        let decoded = decompress_channel(&compress_channel(&values, false), false);
        let step = (240 - 0) / 7 + 1;
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert!((*a as i32 - *b as i32).abs() <= step);
        }
    }

    #[test]
    fn test_bc4_decode_broadcasts_and_sets_opaque() {
        let texel: Texel = std::array::from_fn(|i| if i % 4 == 2 { 200 } else { 0 });
        let channels = Bc4Codec::decompress_block(&Bc4Codec::compress_block(&texel));
        assert_eq!(channels.red, [200; 16]);
        assert_eq!(channels.green, [200; 16]);
        assert_eq!(channels.blue, [200; 16]);
        assert_eq!(channels.alpha, [255; 16]);
    }
}
