//! BC5/ATI2 (3Dc) block compression for tangent-space normal maps.
//!
//! Two interpolated channel blocks of 8 bytes each: green first, then red.
//! Blue is not stored; decode rebuilds it from the unit-length constraint.

use crate::codec::bc4::{compress_channel, decompress_channel};
use crate::texel::{Texel, TexelChannels};

/// BC5 block codec.
pub struct Bc5Codec;

impl Bc5Codec {
    /// Compress the green and red channels of a texel to 16 bytes.
    pub fn compress_block(texel: &Texel) -> [u8; 16] {
        let channels = TexelChannels::from_texel(texel);
        let mut output = [0u8; 16];
        output[0..8].copy_from_slice(&compress_channel(&channels.green, false));
        output[8..16].copy_from_slice(&compress_channel(&channels.red, false));
        output
    }

    /// Decompress a 16-byte block, reconstructing blue. Alpha is opaque.
    pub fn decompress_block(block: &[u8; 16]) -> TexelChannels {
        let mut green_block = [0u8; 8];
        green_block.copy_from_slice(&block[0..8]);
        let mut red_block = [0u8; 8];
        red_block.copy_from_slice(&block[8..16]);

        let green = decompress_channel(&green_block, false);
        let red = decompress_channel(&red_block, false);
        let blue = std::array::from_fn(|i| reconstruct_z(red[i], green[i]));

        TexelChannels {
            blue,
            green,
            red,
            alpha: [255; 16],
        }
    }
}

/// Rebuild the third component of a unit normal from two stored components.
pub fn reconstruct_z(x: u8, y: u8) -> u8 {
    let nx = x as f32 / 127.5 - 1.0;
    let ny = y as f32 / 127.5 - 1.0;
    let nz = (1.0 - nx * nx - ny * ny).max(0.0).sqrt().min(1.0);

    if !nz.is_finite() {
        return 128;
    }
    ((nz + 1.0) / 2.0 * 255.0).round() as u8
}
