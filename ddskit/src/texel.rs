//! Texel/scanline assembly.
//!
//! Block codecs work on one 4×4 texel at a time, while pixel buffers are
//! stored scanline by scanline. [`extract_texel`] gathers the four 16-byte
//! pixel rows of a texel from a BGRA buffer, [`scatter_texel`] writes decoded
//! channels back to their absolute positions in a destination buffer whose
//! rows are `dest_stride` bytes apart.
//!
//! Texels that hang over the right or bottom edge (including whole images
//! smaller than 4×4) keep each valid pixel at its own position inside the
//! texel and leave the rest zeroed; on the way back the overhanging pixels
//! are dropped.

/// 16 BGRA pixels, 4 rows of 4, row-major.
pub type Texel = [u8; 64];

/// A texel split into per-channel arrays, pixel `i` at index `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TexelChannels {
    pub blue: [u8; 16],
    pub green: [u8; 16],
    pub red: [u8; 16],
    pub alpha: [u8; 16],
}

impl TexelChannels {
    /// Split 16 BGRA pixels into channels.
    pub fn from_pixels(pixels: &[[u8; 4]; 16]) -> Self {
        let mut channels = Self::default();
        for (i, p) in pixels.iter().enumerate() {
            channels.blue[i] = p[0];
            channels.green[i] = p[1];
            channels.red[i] = p[2];
            channels.alpha[i] = p[3];
        }
        channels
    }

    /// Split a packed texel into channels.
    pub fn from_texel(texel: &Texel) -> Self {
        Self::from_pixels(&texel_pixels(texel))
    }

    /// BGRA value of pixel `i`.
    pub fn pixel(&self, i: usize) -> [u8; 4] {
        [self.blue[i], self.green[i], self.red[i], self.alpha[i]]
    }

    /// Pack back into a texel.
    pub fn to_texel(&self) -> Texel {
        let mut texel = [0u8; 64];
        for (i, px) in texel.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&self.pixel(i));
        }
        texel
    }
}

/// View a texel as 16 BGRA pixels.
pub fn texel_pixels(texel: &Texel) -> [[u8; 4]; 16] {
    let mut pixels = [[0u8; 4]; 16];
    for (p, src) in pixels.iter_mut().zip(texel.chunks_exact(4)) {
        p.copy_from_slice(src);
    }
    pixels
}

/// Read the texel whose top-left pixel is `(x, y)` from a `width`×`height`
/// BGRA buffer.
pub fn extract_texel(pixels: &[u8], width: usize, height: usize, x: usize, y: usize) -> Texel {
    let mut texel = [0u8; 64];
    let stride = width * 4;

    if x + 4 <= width && y + 4 <= height {
        for (row, dst) in texel.chunks_exact_mut(16).enumerate() {
            let start = (y + row) * stride + x * 4;
            dst.copy_from_slice(&pixels[start..start + 16]);
        }
        return texel;
    }

    let cols = width.saturating_sub(x).min(4);
    let rows = height.saturating_sub(y).min(4);
    for row in 0..rows {
        let start = (y + row) * stride + x * 4;
        let dst = row * 16;
        texel[dst..dst + cols * 4].copy_from_slice(&pixels[start..start + cols * 4]);
    }
    texel
}

/// Overwrite the pixels of a texel outside its valid `cols`×`rows` corner
/// with the nearest valid pixel.
///
/// Encoders call this on edge texels so the zero padding from
/// [`extract_texel`] never takes part in endpoint selection or the DXT1
/// transparency test.
pub fn replicate_edges(texel: &mut Texel, cols: usize, rows: usize) {
    if cols == 0 || rows == 0 || (cols >= 4 && rows >= 4) {
        return;
    }
    for row in 0..4 {
        let src_row = row.min(rows - 1);
        for col in 0..4 {
            let src_col = col.min(cols - 1);
            if src_row == row && src_col == col {
                continue;
            }
            let src = (src_row * 4 + src_col) * 4;
            let dst = (row * 4 + col) * 4;
            texel.copy_within(src..src + 4, dst);
        }
    }
}

/// Write decoded channels for the texel at `(x, y)` into `dest`.
///
/// `y` is relative to the start of `dest`, which may be a band of a larger
/// image. Pixels past the right edge (`dest_stride / 4`) or past the end of
/// `dest` are skipped.
pub fn scatter_texel(
    channels: &TexelChannels,
    dest: &mut [u8],
    x: usize,
    y: usize,
    dest_stride: usize,
) {
    if dest_stride == 0 {
        return;
    }
    let width = dest_stride / 4;
    let rows = dest.len() / dest_stride;
    let cols = width.saturating_sub(x).min(4);

    for row in 0..4 {
        if y + row >= rows {
            break;
        }
        let line = (y + row) * dest_stride + x * 4;
        for col in 0..cols {
            let offset = line + col * 4;
            dest[offset..offset + 4].copy_from_slice(&channels.pixel(row * 4 + col));
        }
    }
}
