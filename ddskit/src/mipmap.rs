//! Mipmap pyramid arithmetic and generation.
//!
//! A DDS payload stores its mip levels back to back after the 128-byte
//! header, largest first. The functions here give level counts, per-level
//! sizes and byte offsets; [`MipmapGenerator`] builds the levels below a top
//! image.

use crate::error::DdsError;
use crate::format::DdsFormat;
use crate::pixel::{next_level_size, MipChain, PixelBuffer};

/// Size of the DDS magic plus header.
pub const HEADER_SIZE: u64 = 128;

/// Number of mip levels below the top one: `floor(log2(min(width, height)))`.
///
/// A 4096×4096 image has 12 (13 levels in total); a 1×1 image has 0.
pub fn estimate_mip_count(width: u32, height: u32) -> u32 {
    let limiting = width.min(height);
    if limiting == 0 {
        0
    } else {
        limiting.ilog2()
    }
}

/// Byte offset of the end of mip `mip_index` (the start of the next level),
/// header included.
///
/// Uses the closed form of the geometric series of level sizes:
/// `128 + round((4 - 4^-i) / 3 * block_size * (w / d) * (h / d))` with
/// `d = 4` for block-compressed data. `mip_index == -1` addresses the top
/// level and yields 128.
pub fn mip_byte_offset(
    mip_index: i32,
    is_block_compressed: bool,
    block_size: usize,
    base_width: u32,
    base_height: u32,
) -> u64 {
    if mip_index <= -1 {
        return HEADER_SIZE;
    }
    let divisor = if is_block_compressed { 4 } else { 1 };
    let sum_part = (4.0 - 4f64.powi(-mip_index)) / 3.0;
    let units = (base_width / divisor) as f64 * (base_height / divisor) as f64;
    HEADER_SIZE + (sum_part * block_size as f64 * units).round() as u64
}

/// Where a directly seeked mip starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLocation {
    /// Byte offset into the DDS stream.
    pub offset: u64,
    /// Levels skipped before this one.
    pub skipped: u32,
    pub width: u32,
    pub height: u32,
}

/// Find the largest mip whose larger side is at most `max_dimension`.
///
/// The level is the first one in the halving sequence that fits, so a limit
/// that is not a power of two rounds down (100 selects 64 for a 256 image).
/// Its offset comes from [`mip_byte_offset`] with `mip_index = skipped - 1`.
/// For ARGB8888 the offset is then moved back by 2 bytes; this long-standing
/// adjustment is reproduced as-is and makes seeked ARGB levels start two
/// bytes early.
///
/// # Errors
///
/// `RequestedMipNotPresent` when the offset lies beyond `stream_len`.
pub fn locate_mip(
    stream_len: u64,
    width: u32,
    height: u32,
    max_dimension: u32,
    format: DdsFormat,
) -> Result<MipLocation, DdsError> {
    let top = MipLocation {
        offset: HEADER_SIZE,
        skipped: 0,
        width,
        height,
    };
    if max_dimension == 0 || (width <= max_dimension && height <= max_dimension) {
        return Ok(top);
    }

    let mut skipped = 0;
    let (mut w, mut h) = (width, height);
    while w.max(h) > max_dimension {
        (w, h) = next_level_size(w, h);
        skipped += 1;
    }
    let mip_index = skipped as i32 - 1;

    let d = format.descriptor();
    let mut offset = mip_byte_offset(mip_index, d.is_block_compressed, d.block_size, width, height);
    if format == DdsFormat::Argb8888 {
        offset = offset.saturating_sub(2);
    }

    if offset > stream_len {
        return Err(DdsError::RequestedMipNotPresent { offset, stream_len });
    }

    Ok(MipLocation {
        offset,
        skipped,
        width: w,
        height: h,
    })
}

/// Dimensions of level `level` below a `width`×`height` top level.
pub fn level_dimensions(width: u32, height: u32, level: u32) -> (u32, u32) {
    (0..level).fold((width, height), |(w, h), _| next_level_size(w, h))
}

/// Stored size of one level in bytes.
///
/// Block-compressed levels round up to whole blocks with at least one block
/// per axis, so levels smaller than 4×4 still occupy a full block.
pub fn mip_level_size(width: u32, height: u32, format: DdsFormat) -> usize {
    let d = format.descriptor();
    if d.is_block_compressed {
        let blocks_wide = width.div_ceil(4).max(1) as usize;
        let blocks_high = height.div_ceil(4).max(1) as usize;
        blocks_wide * blocks_high * d.block_size
    } else {
        width as usize * height as usize * d.block_size
    }
}

/// Mipmap generator.
///
/// Each level halves both dimensions (never below 1). Colour and alpha are
/// filtered separately: alpha is a plain 2×2 average, while colour averages
/// only the pixels in the footprint that are not fully transparent, so
/// transparent neighbours do not bleed their (usually black) colour in.
pub struct MipmapGenerator;

impl MipmapGenerator {
    /// Generate the full chain, `estimate_mip_count + 1` levels.
    pub fn generate_chain(top: &PixelBuffer) -> Result<MipChain, DdsError> {
        let levels = estimate_mip_count(top.width(), top.height()) + 1;
        Self::build_chain(top, levels)
    }

    /// Generate a chain of `levels` levels including the top one.
    ///
    /// Stops early once the image is 1×1.
    pub fn build_chain(top: &PixelBuffer, levels: u32) -> Result<MipChain, DdsError> {
        let mut chain = vec![top.clone()];
        for _ in 1..levels {
            let current = &chain[chain.len() - 1];
            if current.width() == 1 && current.height() == 1 {
                break;
            }
            let next = Self::downsample_2x(current)?;
            chain.push(next);
        }
        MipChain::new(chain)
    }

    /// Downsample by 2× with separate colour and alpha filtering.
    pub fn downsample_2x(source: &PixelBuffer) -> Result<PixelBuffer, DdsError> {
        let (sw, sh) = (source.width(), source.height());
        let (new_width, new_height) = next_level_size(sw, sh);
        let mut output = PixelBuffer::zeroed(new_width, new_height)?;
        let stride = output.stride();

        for (y, row) in output.data_mut().chunks_exact_mut(stride).enumerate() {
            let y0 = (y as u32 * 2).min(sh - 1);
            let y1 = (y as u32 * 2 + 1).min(sh - 1);
            for (x, out) in row.chunks_exact_mut(4).enumerate() {
                let x0 = (x as u32 * 2).min(sw - 1);
                let x1 = (x as u32 * 2 + 1).min(sw - 1);
                let footprint = [
                    source.pixel(x0, y0),
                    source.pixel(x1, y0),
                    source.pixel(x0, y1),
                    source.pixel(x1, y1),
                ];
                out.copy_from_slice(&filter_footprint(&footprint));
            }
        }

        Ok(output)
    }
}

fn filter_footprint(footprint: &[[u8; 4]; 4]) -> [u8; 4] {
    let alpha = footprint.iter().map(|p| p[3] as u32).sum::<u32>() / 4;

    let any_visible = footprint.iter().any(|p| p[3] > 0);
    let mut sums = [0u32; 3];
    let mut count = 0u32;
    for p in footprint.iter().filter(|p| !any_visible || p[3] > 0) {
        sums[0] += p[0] as u32;
        sums[1] += p[1] as u32;
        sums[2] += p[2] as u32;
        count += 1;
    }

    [
        (sums[0] / count) as u8,
        (sums[1] / count) as u8,
        (sums[2] / count) as u8,
        alpha as u8,
    ]
}
