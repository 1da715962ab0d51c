//! DDS decoder - main API for reading DDS data into BGRA mip chains.

use std::sync::Arc;

use crate::codec::conversion::unpremultiply;
use crate::codec::{block_bytes, decode_block, uncompressed};
use crate::config::ProcessingConfig;
use crate::dds::bands::BandExecutor;
use crate::dds::types::DdsHeader;
use crate::error::DdsError;
use crate::format::{BlockFormat, DdsFormat};
use crate::log::{Logger, TracingLogger};
use crate::mipmap::{estimate_mip_count, locate_mip, mip_level_size};
use crate::pixel::{next_level_size, BufferPool, MipChain, PixelBuffer};
use crate::texel::{scatter_texel, TexelChannels};
use crate::{log_debug, log_warn};

/// DDS decoder configuration.
pub struct DdsDecoder {
    max_dimension: Option<u32>,
    config: ProcessingConfig,
    logger: Arc<dyn Logger>,
    pool: Option<Arc<BufferPool>>,
}

impl DdsDecoder {
    /// Create a decoder that returns every stored level.
    pub fn new() -> Self {
        Self {
            max_dimension: None,
            config: ProcessingConfig::default(),
            logger: Arc::new(TracingLogger),
            pool: None,
        }
    }

    /// Start at the first level whose larger side is at most `max_dimension`,
    /// seeking straight to it. Zero keeps the full chain.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = (max_dimension > 0).then_some(max_dimension);
        self
    }

    pub fn with_config(mut self, config: ProcessingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Allocate level buffers from `pool`.
    pub fn with_pool(mut self, pool: Arc<BufferPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Parse and validate the header without decoding any pixels.
    pub fn read_header(&self, bytes: &[u8]) -> Result<(DdsHeader, DdsFormat), DdsError> {
        let header = DdsHeader::parse(bytes)?;
        let format = header.format()?;
        Ok((header, format))
    }

    /// Decode DDS bytes into a BGRA mip chain.
    ///
    /// If the stream ends inside a level after at least one level was decoded,
    /// the levels decoded so far are returned and a warning is logged;
    /// callers compare the chain length with the header to detect this.
    ///
    /// # Errors
    ///
    /// Header, format and dimension errors; `RequestedMipNotPresent` when a
    /// seek lands past the end; `TruncatedData` when not even the first
    /// level is complete.
    pub fn decode(&self, bytes: &[u8]) -> Result<MipChain, DdsError> {
        let (header, format) = self.read_header(bytes)?;
        let (width, height) = (header.width, header.height);
        if width == 0 || height == 0 {
            return Err(DdsError::InvalidDimensions(width, height));
        }

        if self.config.accelerate() {
            log_warn!(
                self.logger,
                "Hardware acceleration requested but not available, using CPU path"
            );
        }

        let total_levels = stored_level_count(header.mipmap_count, width, height);
        log_debug!(
            self.logger,
            "DDS {}×{} {} with {} levels ({} bytes)",
            width,
            height,
            format,
            total_levels,
            bytes.len()
        );

        // A single stored level is decoded at full size whatever the limit.
        let max_dimension = match self.max_dimension {
            Some(max) if total_levels > 1 => max,
            _ => 0,
        };
        let start = locate_mip(bytes.len() as u64, width, height, max_dimension, format)?;
        if start.skipped > 0 {
            log_debug!(
                self.logger,
                "Seeking to mip {} ({}×{}) at offset {}",
                start.skipped,
                start.width,
                start.height,
                start.offset
            );
        }

        let executor = BandExecutor::new(&self.config)?;
        let levels_to_read = total_levels.saturating_sub(start.skipped).max(1);

        let mut levels = Vec::with_capacity(levels_to_read as usize);
        let mut offset = start.offset as usize;
        let (mut w, mut h) = (start.width, start.height);

        for i in 0..levels_to_read {
            let level = (start.skipped + i) as usize;
            let size = mip_level_size(w, h, format);
            let available = bytes.len().saturating_sub(offset);
            if available < size {
                let err = DdsError::TruncatedData {
                    level,
                    needed: size,
                    available,
                };
                if levels.is_empty() {
                    return Err(err);
                }
                log_warn!(
                    self.logger,
                    "{}, returning {} decoded levels",
                    err,
                    levels.len()
                );
                break;
            }

            let mut buffer = self.acquire(w, h)?;
            decode_level(format, &bytes[offset..offset + size], &mut buffer, &executor)?;
            levels.push(buffer);

            offset += size;
            (w, h) = next_level_size(w, h);
        }

        MipChain::new(levels)
    }

    fn acquire(&self, width: u32, height: u32) -> Result<PixelBuffer, DdsError> {
        match &self.pool {
            Some(pool) => pool.acquire(width, height),
            None => PixelBuffer::zeroed(width, height),
        }
    }
}

impl Default for DdsDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Levels actually stored: zero means "estimate", otherwise the declared
/// count capped at the number of distinct levels the dimensions allow.
fn stored_level_count(declared: u32, width: u32, height: u32) -> u32 {
    let geometric_max = width.max(height).max(1).ilog2() + 1;
    if declared == 0 {
        estimate_mip_count(width, height) + 1
    } else {
        declared.min(geometric_max)
    }
}

/// Decode one level's bytes into `dest`.
fn decode_level(
    format: DdsFormat,
    src: &[u8],
    dest: &mut PixelBuffer,
    executor: &BandExecutor,
) -> Result<(), DdsError> {
    let width = dest.width() as usize;
    let stride = dest.stride();
    let premultiplied = format.is_premultiplied_alpha();

    match format.block_format() {
        BlockFormat::Uncompressed(layout) => {
            let src_row = width * layout.bytes_per_pixel();
            executor.run(dest.data_mut(), stride, src, src_row, |out, row| {
                uncompressed::decode_pixels(&layout, row, out);
                Ok(())
            })
        }
        block_format => {
            let block_len = block_bytes(block_format).ok_or_else(|| {
                DdsError::UnsupportedFormat(format!("{} has no block size", format))
            })?;
            let blocks_wide = width.div_ceil(4).max(1);
            executor.run(
                dest.data_mut(),
                stride * 4,
                src,
                blocks_wide * block_len,
                |band, row| {
                    for (bx, block) in row.chunks_exact(block_len).enumerate() {
                        let mut channels = decode_block(block_format, block)?;
                        if premultiplied {
                            unpremultiply_channels(&mut channels);
                        }
                        scatter_texel(&channels, band, bx * 4, 0, stride);
                    }
                    Ok(())
                },
            )
        }
    }
}

fn unpremultiply_channels(channels: &mut TexelChannels) {
    for i in 0..16 {
        let [b, g, r, a] = unpremultiply(channels.pixel(i));
        channels.blue[i] = b;
        channels.green[i] = g;
        channels.red[i] = r;
        channels.alpha[i] = a;
    }
}

/// Decode DDS bytes with a one-off decoder.
///
/// `max_dimension` of 0 decodes the full chain.
pub fn decode_dds(
    bytes: &[u8],
    max_dimension: u32,
    config: &ProcessingConfig,
) -> Result<MipChain, DdsError> {
    DdsDecoder::new()
        .with_max_dimension(max_dimension)
        .with_config(*config)
        .decode(bytes)
}
