//! BC1/DXT1 block compression.
//!
//! BC1 compresses 4×4 blocks of RGB(A) pixels to 8 bytes:
//! - 2 bytes: color0 (RGB565)
//! - 2 bytes: color1 (RGB565)
//! - 4 bytes: 16 2-bit indices, byte `4 + row`, bits `2 * col`
//!
//! `color0 > color1` selects the 4-colour palette. Otherwise the block is in
//! 3-colour mode and index 3 is transparent black. The colour half of BC2 and
//! BC3 blocks uses the same layout but is always 4-colour.

use crate::codec::conversion::rgb888_to_rgb565;
use crate::codec::palette::{build_rgb_palette, nearest_rgb_index};
use crate::texel::{texel_pixels, Texel, TexelChannels};

/// BC1 block codec.
pub struct Bc1Codec;

impl Bc1Codec {
    /// Compress a texel to 8 bytes.
    ///
    /// Pixels with alpha below `alpha_cutoff` are encoded as transparent,
    /// which switches the block to 3-colour mode.
    pub fn compress_block(texel: &Texel, alpha_cutoff: u8) -> [u8; 8] {
        compress_colour(&texel_pixels(texel), true, alpha_cutoff)
    }

    /// Decompress an 8-byte block.
    pub fn decompress_block(block: &[u8; 8]) -> TexelChannels {
        TexelChannels::from_pixels(&decompress_colour(block, true))
    }
}

/// Encode the colour half of a block.
///
/// Endpoints are the channel-wise bounding box of the opaque pixels,
/// quantized to RGB565.
pub(crate) fn compress_colour(
    pixels: &[[u8; 4]; 16],
    is_dxt1: bool,
    alpha_cutoff: u8,
) -> [u8; 8] {
    let transparent: [bool; 16] =
        std::array::from_fn(|i| is_dxt1 && pixels[i][3] < alpha_cutoff);

    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    let mut any_opaque = false;
    for (pixel, _) in pixels.iter().zip(transparent).filter(|(_, t)| !t) {
        any_opaque = true;
        for c in 0..3 {
            min[c] = min[c].min(pixel[c]);
            max[c] = max[c].max(pixel[c]);
        }
    }

    if !any_opaque {
        // 3-colour mode, every index 3
        let mut output = [0u8; 8];
        output[4..8].copy_from_slice(&[0xFF; 4]);
        return output;
    }

    let hi = rgb888_to_rgb565(max[2], max[1], max[0]);
    let lo = rgb888_to_rgb565(min[2], min[1], min[0]);
    let has_transparent = transparent.iter().any(|&t| t);

    let (c0, c1) = if has_transparent { (lo, hi) } else { (hi, lo) };
    let palette = build_rgb_palette(c0, c1, is_dxt1);
    let candidates = if is_dxt1 && c0 <= c1 { 3 } else { 4 };

    let mut indices = 0u32;
    for (i, pixel) in pixels.iter().enumerate() {
        let index = if transparent[i] {
            3
        } else {
            nearest_rgb_index(&palette, *pixel, candidates)
        };
        indices |= (index as u32) << (i * 2);
    }

    let mut output = [0u8; 8];
    output[0..2].copy_from_slice(&c0.to_le_bytes());
    output[2..4].copy_from_slice(&c1.to_le_bytes());
    output[4..8].copy_from_slice(&indices.to_le_bytes());
    output
}

/// Decode the colour half of a block into BGRA pixels.
pub(crate) fn decompress_colour(block: &[u8; 8], is_dxt1: bool) -> [[u8; 4]; 16] {
    let c0 = u16::from_le_bytes([block[0], block[1]]);
    let c1 = u16::from_le_bytes([block[2], block[3]]);
    let palette = build_rgb_palette(c0, c1, is_dxt1);

    let mut pixels = [[0u8; 4]; 16];
    for (row, &byte) in block[4..8].iter().enumerate() {
        for col in 0..4 {
            let index = (byte >> (2 * col)) & 0x3;
            pixels[row * 4 + col] = palette[index as usize];
        }
    }
    pixels
}
