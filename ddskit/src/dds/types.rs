//! DDS header structures and flag constants.

use crate::format::{BitmaskLayout, FourCC};

/// DDS magic number: "DDS " (0x20534444).
pub const DDS_MAGIC: [u8; 4] = *b"DDS ";

/// Value of the header's size field.
pub const HEADER_STRUCT_SIZE: u32 = 124;

/// Value of the pixel format's size field.
pub const PIXEL_FORMAT_STRUCT_SIZE: u32 = 32;

/// DDS file header (124 bytes after the magic).
///
/// Based on Microsoft DDS specification:
/// https://docs.microsoft.com/en-us/windows/win32/direct3ddds/dds-header
#[repr(C)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DdsHeader {
    /// Magic number: "DDS " (0x20534444)
    pub magic: [u8; 4],
    /// Size of structure (124 bytes)
    pub size: u32,
    /// Flags indicating which fields are valid
    pub flags: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Surface width in pixels
    pub width: u32,
    /// Pitch or linear size
    pub pitch_or_linear_size: u32,
    /// Depth for volume textures
    pub depth: u32,
    /// Number of mipmap levels
    pub mipmap_count: u32,
    /// Reserved
    pub reserved1: [u32; 11],
    /// Pixel format structure (32 bytes)
    pub pixel_format: DdsPixelFormat,
    /// Surface complexity capabilities
    pub caps: u32,
    /// Additional capabilities
    pub caps2: u32,
    /// Unused
    pub caps3: u32,
    /// Unused
    pub caps4: u32,
    /// Unused
    pub reserved2: u32,
}

/// DDS pixel format structure (32 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsPixelFormat {
    /// Size of structure (32 bytes)
    pub size: u32,
    /// Pixel format flags
    pub flags: u32,
    /// FourCC code (e.g., "DXT1", "ATI2"), zero for bitmask formats
    pub fourcc: FourCC,
    /// RGB bit count
    pub rgb_bit_count: u32,
    /// Red bit mask
    pub r_bit_mask: u32,
    /// Green bit mask
    pub g_bit_mask: u32,
    /// Blue bit mask
    pub b_bit_mask: u32,
    /// Alpha bit mask
    pub a_bit_mask: u32,
}

/// How a pixel format identifies its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// Block-compressed, identified by FourCC.
    Compressed { fourcc: FourCC },
    /// Interleaved channels located by bitmasks.
    Uncompressed(BitmaskLayout),
}

impl DdsPixelFormat {
    /// Classify by the `DDPF_FOURCC` flag.
    pub fn kind(&self) -> PixelFormat {
        if self.flags & DDPF_FOURCC != 0 {
            PixelFormat::Compressed {
                fourcc: self.fourcc,
            }
        } else {
            PixelFormat::Uncompressed(BitmaskLayout {
                pixel_flags: self.flags,
                bit_count: self.rgb_bit_count,
                r_mask: self.r_bit_mask,
                g_mask: self.g_bit_mask,
                b_mask: self.b_bit_mask,
                a_mask: self.a_bit_mask,
            })
        }
    }
}

// DDS header flags (DDSD_*)
pub const DDSD_CAPS: u32 = 0x1;
pub const DDSD_HEIGHT: u32 = 0x2;
pub const DDSD_WIDTH: u32 = 0x4;
pub const DDSD_PITCH: u32 = 0x8;
pub const DDSD_PIXELFORMAT: u32 = 0x1000;
pub const DDSD_MIPMAPCOUNT: u32 = 0x20000;
pub const DDSD_LINEARSIZE: u32 = 0x80000;

// DDS pixel format flags (DDPF_*)
pub const DDPF_ALPHAPIXELS: u32 = 0x1;
pub const DDPF_FOURCC: u32 = 0x4;
pub const DDPF_RGB: u32 = 0x40;
pub const DDPF_LUMINANCE: u32 = 0x20000;
pub const DDPF_BUMPDUDV: u32 = 0x80000;

// DDS caps flags (DDSCAPS_*)
pub const DDSCAPS_COMPLEX: u32 = 0x8;
pub const DDSCAPS_MIPMAP: u32 = 0x400000;
pub const DDSCAPS_TEXTURE: u32 = 0x1000;
