//! BC3/DXT5 block compression.
//!
//! BC3 compresses 4×4 blocks of RGBA pixels to 16 bytes:
//! - 8 bytes: Alpha channel compression
//!   - 1 byte: alpha0
//!   - 1 byte: alpha1
//!   - 6 bytes: 16 3-bit indices (one per pixel)
//! - 8 bytes: RGB compression (BC1 layout, always 4-colour)

use crate::codec::bc1::{compress_colour, decompress_colour};
use crate::codec::bc4::{compress_channel, decompress_channel};
use crate::texel::{texel_pixels, Texel, TexelChannels};

/// BC3 block codec.
pub struct Bc3Codec;

impl Bc3Codec {
    /// Compress a texel to 16 bytes (8 bytes alpha + 8 bytes RGB).
    pub fn compress_block(texel: &Texel) -> [u8; 16] {
        let pixels = texel_pixels(texel);
        let alpha: [u8; 16] = std::array::from_fn(|i| pixels[i][3]);

        let mut output = [0u8; 16];
        output[0..8].copy_from_slice(&compress_channel(&alpha, false));
        output[8..16].copy_from_slice(&compress_colour(&pixels, false, 0));
        output
    }

    /// Decompress a 16-byte block.
    pub fn decompress_block(block: &[u8; 16]) -> TexelChannels {
        let mut alpha_block = [0u8; 8];
        alpha_block.copy_from_slice(&block[0..8]);
        let mut colour_block = [0u8; 8];
        colour_block.copy_from_slice(&block[8..16]);

        let mut channels = TexelChannels::from_pixels(&decompress_colour(&colour_block, false));
        channels.alpha = decompress_channel(&alpha_block, false);
        channels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel_with_alpha(alpha: impl Fn(usize) -> u8) -> Texel {
        let mut texel = [0u8; 64];
        for (i, px) in texel.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&[128, 64, 192, alpha(i)]);
        }
        texel
    }

    #[test]
    fn test_compress_solid_opaque() {
        let compressed = Bc3Codec::compress_block(&texel_with_alpha(|_| 255));
        assert_eq!(compressed[0], 255);
        assert_eq!(compressed[1], 255);
    }

    #[test]
    fn test_compress_solid_transparent() {
        let compressed = Bc3Codec::compress_block(&texel_with_alpha(|_| 0));
        assert_eq!(compressed[0], 0);
        assert_eq!(compressed[1], 0);
        let decoded = Bc3Codec::decompress_block(&compressed);
        assert_eq!(decoded.alpha, [0; 16]);
    }

    #[test]
    fn test_alpha_gradient_within_one_step() {
        let texel = texel_with_alpha(|i| (i * 17) as u8);
        let decoded = Bc3Codec::decompress_block(&Bc3Codec::compress_block(&texel));
        for i in 0..16 {
            let diff = (decoded.alpha[i] as i32 - (i * 17) as i32).abs();
            assert!(diff <= 255 / 7, "pixel {} off by {}", i, diff);
        }
    }

    #[test]
    fn test_colour_survives_transparency() {
        let texel = texel_with_alpha(|_| 0);
        let decoded = Bc3Codec::decompress_block(&Bc3Codec::compress_block(&texel));
        // 5:6:5 quantization of (192, 64, 128)
        assert_eq!(decoded.pixel(0), [132, 65, 189, 0]);
    }
}
