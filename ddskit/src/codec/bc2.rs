//! BC2/DXT3 block compression.
//!
//! BC2 compresses 4×4 blocks of RGBA pixels to 16 bytes:
//! - 8 bytes: explicit 4-bit alpha, two pixels per byte, low nibble first
//! - 8 bytes: RGB compression (BC1 layout, always 4-colour)

use crate::codec::bc1::{compress_colour, decompress_colour};
use crate::texel::{texel_pixels, Texel, TexelChannels};

/// BC2 block codec.
pub struct Bc2Codec;

impl Bc2Codec {
    /// Compress a texel to 16 bytes.
    pub fn compress_block(texel: &Texel) -> [u8; 16] {
        let pixels = texel_pixels(texel);
        let mut output = [0u8; 16];

        for (i, pair) in pixels.chunks_exact(2).enumerate() {
            output[i] = quantize_alpha(pair[0][3]) | (quantize_alpha(pair[1][3]) << 4);
        }

        output[8..16].copy_from_slice(&compress_colour(&pixels, false, 0));
        output
    }

    /// Decompress a 16-byte block.
    pub fn decompress_block(block: &[u8; 16]) -> TexelChannels {
        let mut colour = [0u8; 8];
        colour.copy_from_slice(&block[8..16]);
        let mut pixels = decompress_colour(&colour, false);

        for (i, &byte) in block[0..8].iter().enumerate() {
            pixels[2 * i][3] = (byte & 0x0F) * 0x11;
            pixels[2 * i + 1][3] = (byte >> 4) * 0x11;
        }

        TexelChannels::from_pixels(&pixels)
    }
}

fn quantize_alpha(alpha: u8) -> u8 {
    ((alpha as u16 * 15 + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_nibble_order() {
        let mut block = [0u8; 16];
        // pixel 0 -> 0x3, pixel 1 -> 0xC
        block[0] = 0xC3;
        let decoded = Bc2Codec::decompress_block(&block);
        assert_eq!(decoded.alpha[0], 0x33);
        assert_eq!(decoded.alpha[1], 0xCC);
        assert_eq!(decoded.alpha[2], 0);
    }

    #[test]
    fn test_every_nibble_expands_by_seventeen() {
        for n in 0u8..16 {
            let mut block = [0u8; 16];
            block[0] = n | (n << 4);
            let decoded = Bc2Codec::decompress_block(&block);
            assert_eq!(decoded.alpha[0], n * 17);
            assert_eq!(decoded.alpha[1], n * 17);
        }
    }

    #[test]
    fn test_alpha_roundtrip_within_half_step() {
        let mut texel = [0u8; 64];
        for (i, px) in texel.chunks_exact_mut(4).enumerate() {
            px[3] = (i * 16 + 5) as u8;
        }
        let decoded = Bc2Codec::decompress_block(&Bc2Codec::compress_block(&texel));
        for i in 0..16 {
            let diff = (decoded.alpha[i] as i32 - (i * 16 + 5) as i32).abs();
            assert!(diff <= 8, "pixel {} off by {}", i, diff);
        }
    }

    #[test]
    fn test_full_alpha_range_is_exact() {
        let mut texel = [0u8; 64];
        texel[3] = 255;
        let decoded = Bc2Codec::decompress_block(&Bc2Codec::compress_block(&texel));
        assert_eq!(decoded.alpha[0], 255);
        assert_eq!(decoded.alpha[1], 0);
    }

    #[test]
    fn test_transparent_pixels_keep_colour() {
        let mut texel = [0u8; 64];
        for px in texel.chunks_exact_mut(4) {
            px.copy_from_slice(&[255, 0, 0, 0]);
        }
        let decoded = Bc2Codec::decompress_block(&Bc2Codec::compress_block(&texel));
        assert_eq!(decoded.blue, [255; 16]);
        assert_eq!(decoded.alpha, [0; 16]);
    }
}
