//! DDS encoder - main API for encoding BGRA images to DDS format.

use std::sync::Arc;
use std::time::Instant;

use crate::codec::conversion::premultiply;
use crate::codec::{block_bytes, encode_block, uncompressed};
use crate::config::ProcessingConfig;
use crate::dds::bands::BandExecutor;
use crate::dds::header::HEADER_LEN;
use crate::dds::types::DdsHeader;
use crate::error::DdsError;
use crate::format::{BlockFormat, DdsFormat};
use crate::log::{Logger, TracingLogger};
use crate::mipmap::{estimate_mip_count, level_dimensions, mip_level_size, MipmapGenerator};
use crate::pixel::{next_level_size, MipChain, PixelBuffer};
use crate::texel::{extract_texel, replicate_edges, Texel};
use crate::{log_debug, log_warn};

/// DDS encoder configuration.
pub struct DdsEncoder {
    format: DdsFormat,
    generate_mipmaps: bool,
    mipmap_count: Option<usize>,
    max_dimension: Option<u32>,
    config: ProcessingConfig,
    logger: Arc<dyn Logger>,
}

impl DdsEncoder {
    /// Create a new DDS encoder with the specified format.
    ///
    /// By default, generates `estimate_mip_count + 1` levels.
    pub fn new(format: DdsFormat) -> Self {
        Self {
            format,
            generate_mipmaps: true,
            mipmap_count: None,
            max_dimension: None,
            config: ProcessingConfig::default(),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Disable mipmap generation.
    pub fn without_mipmaps(mut self) -> Self {
        self.generate_mipmaps = false;
        self
    }

    /// Set specific number of mipmap levels to generate, top level included.
    pub fn with_mipmap_count(mut self, count: usize) -> Self {
        self.generate_mipmaps = true;
        self.mipmap_count = Some(count);
        self
    }

    /// Write the chain starting at the first level whose larger side is at
    /// most `max_dimension`, dropping the larger levels. Zero disables the
    /// limit.
    ///
    /// The limit must be a power of two; [`encode`](Self::encode) fails with
    /// `InvalidMaxDimension` otherwise.
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

    pub fn format(&self) -> DdsFormat {
        self.format
    }

    /// Encode a BGRA image, generating mipmaps as configured.
    ///
    /// # Returns
    ///
    /// Complete DDS file as bytes (header + level data)
    pub fn encode(&self, image: &PixelBuffer) -> Result<Vec<u8>, DdsError> {
        // A size limit needs the smaller levels even when only one is kept.
        let chain = match (self.generate_mipmaps, self.mipmap_count, self.max_dimension) {
            (false, _, None) => MipChain::single(image.clone()),
            (true, Some(count), None) => MipmapGenerator::build_chain(image, count as u32)?,
            _ => MipmapGenerator::generate_chain(image)?,
        };

        self.encode_with_mipmaps(&chain)
    }

    /// Encode with a pre-generated mipmap chain (level 0 = full resolution).
    ///
    /// With a size limit set, levels larger than the limit are dropped first
    /// and the mipmap settings apply to what remains.
    pub fn encode_with_mipmaps(&self, chain: &MipChain) -> Result<Vec<u8>, DdsError> {
        let levels = self.fit_levels(chain)?;
        let top = &levels[0];
        let (width, height) = (top.width(), top.height());

        if self.config.accelerate() {
            log_warn!(
                self.logger,
                "Hardware acceleration requested but not available, using CPU path"
            );
        }
        if let Some(requested) = self.config.alpha_threshold_adjusted() {
            log_warn!(
                self.logger,
                "DXT1 alpha threshold {} outside 0.0..=1.0, using {}",
                requested,
                self.config.dxt1_alpha_threshold()
            );
        }

        let header = DdsHeader::build(levels.len() as u32, height, width, self.format);
        let data_len: usize = levels
            .iter()
            .map(|l| mip_level_size(l.width(), l.height(), self.format))
            .sum();

        let header_bytes = header.to_bytes();
        let mut output = Vec::with_capacity(header_bytes.len() + data_len);
        output.extend_from_slice(&header_bytes);

        let executor = BandExecutor::new(&self.config)?;
        for (index, level) in levels.iter().enumerate() {
            let started = Instant::now();
            let compressed = self.compress_level(level, &executor)?;
            log_debug!(
                self.logger,
                "Encoded {} level {} ({}×{}, {} bytes) in {:?}",
                self.format,
                index,
                level.width(),
                level.height(),
                compressed.len(),
                started.elapsed()
            );
            output.extend_from_slice(&compressed);
        }

        Ok(output)
    }

    /// The levels of `chain` that will be written.
    fn fit_levels<'a>(&self, chain: &'a MipChain) -> Result<&'a [PixelBuffer], DdsError> {
        let levels = chain.levels();
        let Some(max) = self.max_dimension else {
            return Ok(levels);
        };
        if !max.is_power_of_two() {
            return Err(DdsError::InvalidMaxDimension(max));
        }

        let start = levels
            .iter()
            .position(|l| l.width().max(l.height()) <= max)
            .ok_or_else(|| {
                DdsError::InvalidMipmapChain(format!("no level fits within {}", max))
            })?;
        if start > 0 {
            log_debug!(
                self.logger,
                "Dropping {} levels larger than {}",
                start,
                max
            );
        }

        let remaining = &levels[start..];
        let keep = match (self.generate_mipmaps, self.mipmap_count) {
            (false, _) => 1,
            (true, Some(count)) => count.clamp(1, remaining.len()),
            (true, None) => remaining.len(),
        };
        Ok(&remaining[..keep])
    }

    /// Output size in bytes for a `width`×`height` image under the current
    /// mipmap settings.
    pub fn expected_size(&self, width: u32, height: u32) -> usize {
        let (width, height) = match self.max_dimension {
            Some(max) => {
                let (mut w, mut h) = (width, height);
                while w.max(h) > max {
                    (w, h) = next_level_size(w, h);
                }
                (w, h)
            }
            None => (width, height),
        };
        let levels = if self.generate_mipmaps {
            let geometric_max = width.max(height).max(1).ilog2() as usize + 1;
            self.mipmap_count
                .unwrap_or(estimate_mip_count(width, height) as usize + 1)
                .clamp(1, geometric_max)
        } else {
            1
        };

        let data: usize = (0..levels as u32)
            .map(|level| {
                let (w, h) = level_dimensions(width, height, level);
                mip_level_size(w, h, self.format)
            })
            .sum();
        HEADER_LEN + data
    }

    /// Compress a single level.
    fn compress_level(
        &self,
        level: &PixelBuffer,
        executor: &BandExecutor,
    ) -> Result<Vec<u8>, DdsError> {
        let width = level.width() as usize;
        let stride = level.stride();
        let mut output = vec![0u8; mip_level_size(level.width(), level.height(), self.format)];

        match self.format.block_format() {
            BlockFormat::Uncompressed(layout) => {
                let out_row = width * layout.bytes_per_pixel();
                executor.run(&mut output, out_row, level.data(), stride, |out, row| {
                    uncompressed::encode_pixels(&layout, row, out);
                    Ok(())
                })?;
            }
            block_format => {
                let block_len = block_bytes(block_format).ok_or_else(|| {
                    DdsError::UnsupportedFormat(format!("{} has no block size", self.format))
                })?;
                let blocks_wide = width.div_ceil(4).max(1);
                let alpha_cutoff = self.config.alpha_cutoff();
                let premultiplied = self.format.is_premultiplied_alpha();

                executor.run(
                    &mut output,
                    blocks_wide * block_len,
                    level.data(),
                    stride * 4,
                    |out_row, band| {
                        let rows = band.len() / stride;
                        for (bx, out) in out_row.chunks_exact_mut(block_len).enumerate() {
                            let mut texel = extract_texel(band, width, rows, bx * 4, 0);
                            replicate_edges(&mut texel, (width - bx * 4).min(4), rows.min(4));
                            if premultiplied {
                                premultiply_texel(&mut texel);
                            }
                            encode_block(block_format, &texel, alpha_cutoff, out)?;
                        }
                        Ok(())
                    },
                )?;
            }
        }

        Ok(output)
    }
}

fn premultiply_texel(texel: &mut Texel) {
    for px in texel.chunks_exact_mut(4) {
        let p = premultiply([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&p);
    }
}

/// Encode a mip chain with a one-off encoder.
///
/// With `generate_mips` a single-level chain is expanded to a full chain and a
/// longer chain is written as given; without it only the top level is
/// written.
pub fn encode_dds(
    chain: &MipChain,
    format: DdsFormat,
    generate_mips: bool,
    config: &ProcessingConfig,
) -> Result<Vec<u8>, DdsError> {
    let encoder = DdsEncoder::new(format).with_config(*config);
    if !generate_mips {
        return encoder.without_mipmaps().encode(chain.top());
    }
    if chain.len() == 1 {
        encoder.encode(chain.top())
    } else {
        encoder.encode_with_mipmaps(chain)
    }
}
