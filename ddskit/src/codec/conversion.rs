//! RGB565 conversion tables.
//!
//! Expansion uses fixed lookup tables rather than bit replication so decoded
//! endpoints match reference decoders exactly. Quantization rounds to the
//! nearest representable step.

/// 5-bit channel value to 8 bits.
pub const EXPAND_5: [u8; 32] = [
    0, 8, 16, 25, 33, 41, 49, 58, 66, 74, 82, 90, 99, 107, 115, 123, 132, 140, 148, 156, 165, 173,
    181, 189, 197, 206, 214, 222, 230, 239, 247, 255,
];

/// 6-bit channel value to 8 bits.
pub const EXPAND_6: [u8; 64] = [
    0, 4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 45, 49, 53, 57, 61, 65, 69, 73, 77, 81, 85, 89, 93,
    97, 101, 105, 109, 113, 117, 121, 125, 130, 134, 138, 142, 146, 150, 154, 158, 162, 166, 170,
    174, 178, 182, 186, 190, 194, 198, 202, 206, 210, 215, 219, 223, 227, 231, 235, 239, 243, 247,
    251, 255,
];

const fn build_quantize_table(max: u32) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut v = 0;
    while v < 256 {
        table[v] = ((v as u32 * max * 2 + 255) / 510) as u8;
        v += 1;
    }
    table
}

/// 8-bit channel value to the nearest 5-bit value.
pub const QUANTIZE_5: [u8; 256] = build_quantize_table(31);

/// 8-bit channel value to the nearest 6-bit value.
pub const QUANTIZE_6: [u8; 256] = build_quantize_table(63);

/// Pack 8-bit channels into RGB565.
///
/// RGB565 format:
/// - Bits 15-11: Red (5 bits)
/// - Bits 10-5: Green (6 bits)
/// - Bits 4-0: Blue (5 bits)
pub fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = QUANTIZE_5[r as usize] as u16;
    let g6 = QUANTIZE_6[g as usize] as u16;
    let b5 = QUANTIZE_5[b as usize] as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Expand RGB565 to `[r, g, b]`.
pub fn rgb565_to_rgb888(color: u16) -> [u8; 3] {
    let r5 = (color >> 11) & 0x1F;
    let g6 = (color >> 5) & 0x3F;
    let b5 = color & 0x1F;
    [
        EXPAND_5[r5 as usize],
        EXPAND_6[g6 as usize],
        EXPAND_5[b5 as usize],
    ]
}

/// Scale colour channels of a BGRA pixel by its alpha.
pub fn premultiply(pixel: [u8; 4]) -> [u8; 4] {
    let a = pixel[3] as u32;
    [
        ((pixel[0] as u32 * a + 127) / 255) as u8,
        ((pixel[1] as u32 * a + 127) / 255) as u8,
        ((pixel[2] as u32 * a + 127) / 255) as u8,
        pixel[3],
    ]
}

/// Inverse of [`premultiply`]. Fully transparent pixels keep their colour.
pub fn unpremultiply(pixel: [u8; 4]) -> [u8; 4] {
    let a = pixel[3] as u32;
    if a == 0 {
        return pixel;
    }
    let scale = |c: u8| ((c as u32 * 255 + a / 2) / a).min(255) as u8;
    [scale(pixel[0]), scale(pixel[1]), scale(pixel[2]), pixel[3]]
}
