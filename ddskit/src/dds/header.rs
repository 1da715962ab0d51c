//! DDS header construction, parsing and serialisation.

use crate::dds::types::*;
use crate::error::DdsError;
use crate::format::{lookup_bitmask, lookup_fourcc, DdsFormat, FourCC};
use crate::mipmap::mip_level_size;

/// Serialised header length including the magic.
pub const HEADER_LEN: usize = 128;

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl DdsHeader {
    /// Create a header for a texture of the given format.
    ///
    /// Compressed formats record the top level's linear size; bitmask formats
    /// record the row pitch and their channel masks. `mipmap_count` counts
    /// every level including the top one.
    pub fn build(mipmap_count: u32, height: u32, width: u32, format: DdsFormat) -> Self {
        let descriptor = format.descriptor();

        let mut flags = DDSD_CAPS | DDSD_HEIGHT | DDSD_WIDTH | DDSD_PIXELFORMAT;
        if mipmap_count > 1 {
            flags |= DDSD_MIPMAPCOUNT;
        }

        let mut caps = DDSCAPS_TEXTURE;
        if mipmap_count > 1 {
            caps |= DDSCAPS_COMPLEX | DDSCAPS_MIPMAP;
        }

        let (pitch_or_linear_size, pixel_format) = match (descriptor.fourcc, descriptor.bitmask) {
            (Some(fourcc), _) => {
                flags |= DDSD_LINEARSIZE;
                let linear = mip_level_size(width, height, format) as u32;
                (
                    linear,
                    DdsPixelFormat {
                        size: PIXEL_FORMAT_STRUCT_SIZE,
                        flags: DDPF_FOURCC,
                        fourcc,
                        rgb_bit_count: 0,
                        r_bit_mask: 0,
                        g_bit_mask: 0,
                        b_bit_mask: 0,
                        a_bit_mask: 0,
                    },
                )
            }
            (None, Some(layout)) => {
                flags |= DDSD_PITCH;
                (
                    width * descriptor.block_size as u32,
                    DdsPixelFormat {
                        size: PIXEL_FORMAT_STRUCT_SIZE,
                        flags: layout.pixel_flags,
                        fourcc: FourCC::NONE,
                        rgb_bit_count: layout.bit_count,
                        r_bit_mask: layout.r_mask,
                        g_bit_mask: layout.g_mask,
                        b_bit_mask: layout.b_mask,
                        a_bit_mask: layout.a_mask,
                    },
                )
            }
            (None, None) => (
                0,
                DdsPixelFormat {
                    size: PIXEL_FORMAT_STRUCT_SIZE,
                    flags: 0,
                    fourcc: FourCC::NONE,
                    rgb_bit_count: 0,
                    r_bit_mask: 0,
                    g_bit_mask: 0,
                    b_bit_mask: 0,
                    a_bit_mask: 0,
                },
            ),
        };

        DdsHeader {
            magic: DDS_MAGIC,
            size: HEADER_STRUCT_SIZE,
            flags,
            height,
            width,
            pitch_or_linear_size,
            depth: 0,
            mipmap_count,
            reserved1: [0; 11],
            pixel_format,
            caps,
            caps2: 0,
            caps3: 0,
            caps4: 0,
            reserved2: 0,
        }
    }

    /// Same as [`DdsHeader::build`] with width first.
    pub fn new(width: u32, height: u32, mipmap_count: u32, format: DdsFormat) -> Self {
        Self::build(mipmap_count, height, width, format)
    }

    /// Parse the first 128 bytes of a DDS stream.
    ///
    /// # Errors
    ///
    /// `InvalidMagic` if the stream does not start with "DDS ",
    /// `MalformedHeader` if it is short or the size fields are wrong.
    pub fn parse(bytes: &[u8]) -> Result<Self, DdsError> {
        if bytes.len() < 4 {
            return Err(DdsError::MalformedHeader(format!(
                "stream is {} bytes, too short for a DDS magic",
                bytes.len()
            )));
        }
        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != DDS_MAGIC {
            return Err(DdsError::InvalidMagic { found: magic });
        }
        if bytes.len() < HEADER_LEN {
            return Err(DdsError::MalformedHeader(format!(
                "stream is {} bytes, header needs {}",
                bytes.len(),
                HEADER_LEN
            )));
        }

        let size = read_u32(bytes, 4);
        if size != HEADER_STRUCT_SIZE {
            return Err(DdsError::MalformedHeader(format!(
                "header size field is {}, expected {}",
                size, HEADER_STRUCT_SIZE
            )));
        }
        let pf_size = read_u32(bytes, 76);
        if pf_size != PIXEL_FORMAT_STRUCT_SIZE {
            return Err(DdsError::MalformedHeader(format!(
                "pixel format size field is {}, expected {}",
                pf_size, PIXEL_FORMAT_STRUCT_SIZE
            )));
        }

        let mut reserved1 = [0u32; 11];
        for (i, slot) in reserved1.iter_mut().enumerate() {
            *slot = read_u32(bytes, 32 + i * 4);
        }

        Ok(DdsHeader {
            magic,
            size,
            flags: read_u32(bytes, 8),
            height: read_u32(bytes, 12),
            width: read_u32(bytes, 16),
            pitch_or_linear_size: read_u32(bytes, 20),
            depth: read_u32(bytes, 24),
            mipmap_count: read_u32(bytes, 28),
            reserved1,
            pixel_format: DdsPixelFormat {
                size: pf_size,
                flags: read_u32(bytes, 80),
                fourcc: FourCC(read_u32(bytes, 84)),
                rgb_bit_count: read_u32(bytes, 88),
                r_bit_mask: read_u32(bytes, 92),
                g_bit_mask: read_u32(bytes, 96),
                b_bit_mask: read_u32(bytes, 100),
                a_bit_mask: read_u32(bytes, 104),
            },
            caps: read_u32(bytes, 108),
            caps2: read_u32(bytes, 112),
            caps3: read_u32(bytes, 116),
            caps4: read_u32(bytes, 120),
            reserved2: read_u32(bytes, 124),
        })
    }

    /// Resolve the pixel format against the registry.
    pub fn format(&self) -> Result<DdsFormat, DdsError> {
        match self.pixel_format.kind() {
            PixelFormat::Compressed { fourcc } => lookup_fourcc(fourcc),
            PixelFormat::Uncompressed(l) => {
                lookup_bitmask(l.bit_count, l.r_mask, l.g_mask, l.b_mask, l.a_mask)
            }
        }
    }

    /// Convert header to its on-disk form.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = Vec::with_capacity(HEADER_LEN);

        bytes.extend_from_slice(&self.magic);

        bytes.extend_from_slice(&self.size.to_le_bytes());
        bytes.extend_from_slice(&self.flags.to_le_bytes());
        bytes.extend_from_slice(&self.height.to_le_bytes());
        bytes.extend_from_slice(&self.width.to_le_bytes());
        bytes.extend_from_slice(&self.pitch_or_linear_size.to_le_bytes());
        bytes.extend_from_slice(&self.depth.to_le_bytes());
        bytes.extend_from_slice(&self.mipmap_count.to_le_bytes());

        // Reserved1 (11 × u32)
        for &val in &self.reserved1 {
            bytes.extend_from_slice(&val.to_le_bytes());
        }

        // Pixel format (32 bytes)
        bytes.extend_from_slice(&self.pixel_format.size.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.flags.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.fourcc.to_bytes());
        bytes.extend_from_slice(&self.pixel_format.rgb_bit_count.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.r_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.g_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.b_bit_mask.to_le_bytes());
        bytes.extend_from_slice(&self.pixel_format.a_bit_mask.to_le_bytes());

        bytes.extend_from_slice(&self.caps.to_le_bytes());
        bytes.extend_from_slice(&self.caps2.to_le_bytes());
        bytes.extend_from_slice(&self.caps3.to_le_bytes());
        bytes.extend_from_slice(&self.caps4.to_le_bytes());
        bytes.extend_from_slice(&self.reserved2.to_le_bytes());

        let mut out = [0u8; HEADER_LEN];
        out.copy_from_slice(&bytes);
        out
    }
}
