//! Uncompressed bitmask formats.
//!
//! Each pixel is `bit_count / 8` little-endian bytes; channels are located
//! by their masks. Signed layouts store colour channels offset by 128.
//! Luminance layouts store one intensity that is replicated to red, green and
//! blue. Channels without a mask decode as 0xFF.

use crate::format::BitmaskLayout;

fn read_channel(raw: u32, mask: u32) -> Option<u8> {
    if mask == 0 {
        return None;
    }
    let value = (raw & mask) >> mask.trailing_zeros();
    let bits = mask.count_ones();
    if bits == 8 {
        Some(value as u8)
    } else {
        let max = (1u64 << bits) - 1;
        Some(((value as u64 * 255 + max / 2) / max) as u8)
    }
}

fn write_channel(value: u8, mask: u32) -> u32 {
    if mask == 0 {
        return 0;
    }
    let bits = mask.count_ones();
    let scaled = if bits == 8 {
        value as u32
    } else {
        let max = (1u64 << bits) - 1;
        ((value as u64 * max + 127) / 255) as u32
    };
    (scaled << mask.trailing_zeros()) & mask
}

/// Decode one stored pixel to BGRA.
pub fn read_pixel(layout: &BitmaskLayout, bytes: &[u8]) -> [u8; 4] {
    let mut word = [0u8; 4];
    let n = layout.bytes_per_pixel().min(4);
    word[..n].copy_from_slice(&bytes[..n]);
    let raw = u32::from_le_bytes(word);

    let alpha = read_channel(raw, layout.a_mask).unwrap_or(0xFF);
    if layout.is_luminance() {
        let l = read_channel(raw, layout.r_mask).unwrap_or(0xFF);
        return [l, l, l, alpha];
    }

    let signed = |c: Option<u8>| match c {
        Some(v) if layout.is_signed() => v.wrapping_sub(128),
        Some(v) => v,
        None => 0xFF,
    };
    [
        signed(read_channel(raw, layout.b_mask)),
        signed(read_channel(raw, layout.g_mask)),
        signed(read_channel(raw, layout.r_mask)),
        alpha,
    ]
}

/// Encode one BGRA pixel into `out` (`bytes_per_pixel` bytes).
pub fn write_pixel(layout: &BitmaskLayout, pixel: [u8; 4], out: &mut [u8]) {
    let [b, g, r, a] = pixel;
    let mut raw = write_channel(a, layout.a_mask);

    if layout.is_luminance() {
        let luma = ((77 * r as u32 + 150 * g as u32 + 29 * b as u32) >> 8) as u8;
        raw |= write_channel(luma, layout.r_mask);
    } else {
        let adjust = |v: u8| if layout.is_signed() { v.wrapping_add(128) } else { v };
        raw |= write_channel(adjust(r), layout.r_mask);
        raw |= write_channel(adjust(g), layout.g_mask);
        raw |= write_channel(adjust(b), layout.b_mask);
    }

    let n = layout.bytes_per_pixel().min(4);
    out[..n].copy_from_slice(&raw.to_le_bytes()[..n]);
}

/// Decode a run of stored pixels into a BGRA slice.
pub fn decode_pixels(layout: &BitmaskLayout, src: &[u8], dest: &mut [u8]) {
    let bpp = layout.bytes_per_pixel();
    for (stored, out) in src.chunks_exact(bpp).zip(dest.chunks_exact_mut(4)) {
        out.copy_from_slice(&read_pixel(layout, stored));
    }
}

/// Encode a run of BGRA pixels into stored form.
pub fn encode_pixels(layout: &BitmaskLayout, src: &[u8], dest: &mut [u8]) {
    let bpp = layout.bytes_per_pixel();
    for (px, out) in src.chunks_exact(4).zip(dest.chunks_exact_mut(bpp)) {
        write_pixel(layout, [px[0], px[1], px[2], px[3]], out);
    }
}
