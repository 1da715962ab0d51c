//! Palette construction and nearest-entry search.
//!
//! Palettes are rebuilt for every block from its two endpoints. The
//! single-channel palette reproduces the reference interpolation exactly,
//! including truncating division and the 5-divisor weights of the six-value
//! mode, which wrap when both endpoints are large.

use crate::codec::conversion::rgb565_to_rgb888;

/// Build the 8-entry palette of an interpolated channel block (BC3 alpha,
/// BC4, BC5).
///
/// `e0 > e1` selects the eight-value mode, otherwise the six-value mode with
/// reserved slots 6 (0, or 2 when `signed`) and 7 (255).
pub fn build_channel_palette(e0: u8, e1: u8, signed: bool) -> [u8; 8] {
    let mut palette = [0u8; 8];
    palette[0] = e0;
    palette[1] = e1;

    let (a, b) = (e0 as u32, e1 as u32);
    if e0 > e1 {
        for (i, entry) in palette.iter_mut().enumerate().skip(2) {
            let i = i as u32;
            *entry = (((8 - i) * a + (i - 1) * b) / 7) as u8;
        }
    } else {
        for (i, entry) in palette.iter_mut().enumerate().take(6).skip(2) {
            let i = i as u32;
            *entry = (((8 - i) * a + (i - 1) * b) / 5) as u8;
        }
        palette[6] = if signed { (-254i32) as u8 } else { 0 };
        palette[7] = 255;
    }

    palette
}

/// Build the 4-entry colour palette of a BC1 colour block.
///
/// Entries are BGRA. Endpoints expand through the RGB565 tables. With
/// `color0 > color1`, or for any block that is not DXT1, the two middle
/// entries sit at thirds; otherwise entry 2 is the midpoint and entry 3 is
/// transparent black.
pub fn build_rgb_palette(color0: u16, color1: u16, is_dxt1: bool) -> [[u8; 4]; 4] {
    let [r0, g0, b0] = rgb565_to_rgb888(color0);
    let [r1, g1, b1] = rgb565_to_rgb888(color1);
    let p0 = [b0, g0, r0, 255];
    let p1 = [b1, g1, r1, 255];

    if color0 > color1 || !is_dxt1 {
        [p0, p1, blend(p0, p1, 2, 1), blend(p0, p1, 1, 2)]
    } else {
        [p0, p1, blend(p0, p1, 1, 1), [0, 0, 0, 0]]
    }
}

fn blend(a: [u8; 4], b: [u8; 4], wa: u16, wb: u16) -> [u8; 4] {
    let mix = |x: u8, y: u8| ((wa * x as u16 + wb * y as u16) / (wa + wb)) as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2]), 255]
}

/// Index of the palette entry closest to `value`. Ties go to the lowest
/// index.
pub fn nearest_channel_index(palette: &[u8; 8], value: u8) -> u8 {
    let mut best = 0;
    let mut best_dist = u16::MAX;
    for (i, &entry) in palette.iter().enumerate() {
        let dist = (entry as i16 - value as i16).unsigned_abs();
        if dist < best_dist {
            best_dist = dist;
            best = i as u8;
        }
    }
    best
}

/// Index of the colour entry closest to a BGRA pixel, by summed absolute
/// channel difference, searching only the first `candidates` entries. Ties
/// go to the lowest index.
pub fn nearest_rgb_index(palette: &[[u8; 4]; 4], pixel: [u8; 4], candidates: usize) -> u8 {
    let mut best = 0;
    let mut best_dist = u32::MAX;
    for (i, entry) in palette.iter().take(candidates).enumerate() {
        let dist: u32 = (0..3)
            .map(|c| (entry[c] as i32 - pixel[c] as i32).unsigned_abs())
            .sum();
        if dist < best_dist {
            best_dist = dist;
            best = i as u8;
        }
    }
    best
}
