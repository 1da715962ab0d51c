//! Format registry.
//!
//! A fixed table of every pixel format the codec understands, with the
//! metadata the rest of the crate needs: block size, channel count,
//! premultiplied alpha, mippability and the on-disk identification (FourCC for
//! block-compressed formats, channel bitmasks for uncompressed ones).
//!
//! The table is a `static` and has no mutation API.

use std::fmt;
use std::str::FromStr;

use crate::dds::types::{DDPF_ALPHAPIXELS, DDPF_BUMPDUDV, DDPF_LUMINANCE, DDPF_RGB};
use crate::error::DdsError;

/// Four-character code stored in the DDS pixel format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FourCC(pub u32);

impl FourCC {
    pub const NONE: Self = FourCC(0);

    pub const DXT1: Self = FourCC(u32::from_le_bytes(*b"DXT1"));
    pub const DXT2: Self = FourCC(u32::from_le_bytes(*b"DXT2"));
    pub const DXT3: Self = FourCC(u32::from_le_bytes(*b"DXT3"));
    pub const DXT4: Self = FourCC(u32::from_le_bytes(*b"DXT4"));
    pub const DXT5: Self = FourCC(u32::from_le_bytes(*b"DXT5"));

    pub const ATI1: Self = FourCC(u32::from_le_bytes(*b"ATI1"));
    pub const BC4U: Self = FourCC(u32::from_le_bytes(*b"BC4U"));
    pub const ATI2: Self = FourCC(u32::from_le_bytes(*b"ATI2"));
    pub const BC5U: Self = FourCC(u32::from_le_bytes(*b"BC5U"));

    pub const DX10: Self = FourCC(u32::from_le_bytes(*b"DX10"));

    /// The four bytes as they appear in the file.
    pub fn to_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl From<[u8; 4]> for FourCC {
    fn from(value: [u8; 4]) -> Self {
        FourCC(u32::from_le_bytes(value))
    }
}

impl From<u32> for FourCC {
    fn from(value: u32) -> Self {
        FourCC(value)
    }
}

impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.to_bytes();
        if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
            for b in bytes {
                write!(f, "{}", b as char)?;
            }
            Ok(())
        } else {
            write!(f, "0x{:08X}", self.0)
        }
    }
}

/// Channel layout of an uncompressed format.
///
/// `pixel_flags` are the `DDPF_*` bits written to the header. A set
/// `DDPF_BUMPDUDV` marks signed channels, `DDPF_LUMINANCE` marks a single
/// stored intensity that is replicated into red, green and blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitmaskLayout {
    pub pixel_flags: u32,
    pub bit_count: u32,
    pub r_mask: u32,
    pub g_mask: u32,
    pub b_mask: u32,
    pub a_mask: u32,
}

impl BitmaskLayout {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(&self) -> usize {
        (self.bit_count / 8) as usize
    }

    pub fn is_signed(&self) -> bool {
        self.pixel_flags & DDPF_BUMPDUDV != 0
    }

    pub fn is_luminance(&self) -> bool {
        self.pixel_flags & DDPF_LUMINANCE != 0
    }
}

/// Codec selection for a format.
///
/// Every codec dispatch in the crate is an exhaustive match on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// DXT1: RGB565 endpoints, 2-bit indices.
    Bc1,
    /// DXT2/DXT3: explicit 4-bit alpha + BC1 colour.
    Bc2,
    /// DXT4/DXT5: interpolated alpha + BC1 colour.
    Bc3,
    /// ATI1: one interpolated channel.
    Bc4,
    /// ATI2/3Dc: two interpolated channels, blue reconstructed.
    Bc5,
    /// Raw interleaved channels described by bitmasks.
    Uncompressed(BitmaskLayout),
}

/// Pixel formats in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DdsFormat {
    Dxt1,
    Dxt2,
    Dxt3,
    Dxt4,
    Dxt5,
    Ati1,
    Ati2,
    Argb8888,
    Rgb888,
    V8U8,
    G8,
    A8L8,
}

/// Immutable metadata for one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub format: DdsFormat,
    /// Bytes per 4×4 block when compressed, bytes per pixel otherwise.
    pub block_size: usize,
    pub channel_count: u8,
    pub is_block_compressed: bool,
    pub is_premultiplied_alpha: bool,
    pub is_mippable: bool,
    pub fourcc: Option<FourCC>,
    pub bitmask: Option<BitmaskLayout>,
    pub codec: BlockFormat,
}

const fn compressed(
    format: DdsFormat,
    codec: BlockFormat,
    block_size: usize,
    channel_count: u8,
    is_premultiplied_alpha: bool,
    fourcc: FourCC,
) -> FormatDescriptor {
    FormatDescriptor {
        format,
        block_size,
        channel_count,
        is_block_compressed: true,
        is_premultiplied_alpha,
        is_mippable: true,
        fourcc: Some(fourcc),
        bitmask: None,
        codec,
    }
}

const fn uncompressed(
    format: DdsFormat,
    channel_count: u8,
    layout: BitmaskLayout,
) -> FormatDescriptor {
    FormatDescriptor {
        format,
        block_size: (layout.bit_count / 8) as usize,
        channel_count,
        is_block_compressed: false,
        is_premultiplied_alpha: false,
        is_mippable: true,
        fourcc: None,
        bitmask: Some(layout),
        codec: BlockFormat::Uncompressed(layout),
    }
}

/// Indexed by `DdsFormat as usize`.
static REGISTRY: [FormatDescriptor; 12] = [
    compressed(DdsFormat::Dxt1, BlockFormat::Bc1, 8, 4, false, FourCC::DXT1),
    compressed(DdsFormat::Dxt2, BlockFormat::Bc2, 16, 4, true, FourCC::DXT2),
    compressed(DdsFormat::Dxt3, BlockFormat::Bc2, 16, 4, false, FourCC::DXT3),
    compressed(DdsFormat::Dxt4, BlockFormat::Bc3, 16, 4, true, FourCC::DXT4),
    compressed(DdsFormat::Dxt5, BlockFormat::Bc3, 16, 4, false, FourCC::DXT5),
    compressed(DdsFormat::Ati1, BlockFormat::Bc4, 8, 1, false, FourCC::ATI1),
    compressed(DdsFormat::Ati2, BlockFormat::Bc5, 16, 2, false, FourCC::ATI2),
    uncompressed(
        DdsFormat::Argb8888,
        4,
        BitmaskLayout {
            pixel_flags: DDPF_RGB | DDPF_ALPHAPIXELS,
            bit_count: 32,
            r_mask: 0x00FF_0000,
            g_mask: 0x0000_FF00,
            b_mask: 0x0000_00FF,
            a_mask: 0xFF00_0000,
        },
    ),
    uncompressed(
        DdsFormat::Rgb888,
        3,
        BitmaskLayout {
            pixel_flags: DDPF_RGB,
            bit_count: 24,
            r_mask: 0x00FF_0000,
            g_mask: 0x0000_FF00,
            b_mask: 0x0000_00FF,
            a_mask: 0,
        },
    ),
    uncompressed(
        DdsFormat::V8U8,
        2,
        BitmaskLayout {
            pixel_flags: DDPF_BUMPDUDV,
            bit_count: 16,
            r_mask: 0x0000_00FF,
            g_mask: 0x0000_FF00,
            b_mask: 0,
            a_mask: 0,
        },
    ),
    uncompressed(
        DdsFormat::G8,
        1,
        BitmaskLayout {
            pixel_flags: DDPF_LUMINANCE,
            bit_count: 8,
            r_mask: 0x0000_00FF,
            g_mask: 0,
            b_mask: 0,
            a_mask: 0,
        },
    ),
    uncompressed(
        DdsFormat::A8L8,
        2,
        BitmaskLayout {
            pixel_flags: DDPF_LUMINANCE | DDPF_ALPHAPIXELS,
            bit_count: 16,
            r_mask: 0x0000_00FF,
            g_mask: 0,
            b_mask: 0,
            a_mask: 0x0000_FF00,
        },
    ),
];

impl DdsFormat {
    /// Every registered format, in registry order.
    pub const ALL: [DdsFormat; 12] = [
        DdsFormat::Dxt1,
        DdsFormat::Dxt2,
        DdsFormat::Dxt3,
        DdsFormat::Dxt4,
        DdsFormat::Dxt5,
        DdsFormat::Ati1,
        DdsFormat::Ati2,
        DdsFormat::Argb8888,
        DdsFormat::Rgb888,
        DdsFormat::V8U8,
        DdsFormat::G8,
        DdsFormat::A8L8,
    ];

    /// Registry entry for this format.
    pub fn descriptor(self) -> &'static FormatDescriptor {
        &REGISTRY[self as usize]
    }

    /// Codec used to read and write this format.
    pub fn block_format(self) -> BlockFormat {
        self.descriptor().codec
    }

    pub fn is_block_compressed(self) -> bool {
        self.descriptor().is_block_compressed
    }

    pub fn block_size(self) -> usize {
        self.descriptor().block_size
    }

    pub fn is_premultiplied_alpha(self) -> bool {
        self.descriptor().is_premultiplied_alpha
    }

    /// Short upper-case name used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            DdsFormat::Dxt1 => "DXT1",
            DdsFormat::Dxt2 => "DXT2",
            DdsFormat::Dxt3 => "DXT3",
            DdsFormat::Dxt4 => "DXT4",
            DdsFormat::Dxt5 => "DXT5",
            DdsFormat::Ati1 => "ATI1",
            DdsFormat::Ati2 => "ATI2",
            DdsFormat::Argb8888 => "ARGB8888",
            DdsFormat::Rgb888 => "RGB888",
            DdsFormat::V8U8 => "V8U8",
            DdsFormat::G8 => "G8",
            DdsFormat::A8L8 => "A8L8",
        }
    }
}

impl fmt::Display for DdsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DdsFormat {
    type Err = DdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dxt1" | "bc1" => Ok(DdsFormat::Dxt1),
            "dxt2" => Ok(DdsFormat::Dxt2),
            "dxt3" | "bc2" => Ok(DdsFormat::Dxt3),
            "dxt4" => Ok(DdsFormat::Dxt4),
            "dxt5" | "bc3" => Ok(DdsFormat::Dxt5),
            "ati1" | "bc4" => Ok(DdsFormat::Ati1),
            "ati2" | "3dc" | "bc5" => Ok(DdsFormat::Ati2),
            "argb" | "argb8888" => Ok(DdsFormat::Argb8888),
            "rgb" | "rgb888" => Ok(DdsFormat::Rgb888),
            "v8u8" => Ok(DdsFormat::V8U8),
            "g8" | "l8" => Ok(DdsFormat::G8),
            "a8l8" => Ok(DdsFormat::A8L8),
            _ => Err(DdsError::UnknownFormat(s.to_string())),
        }
    }
}

/// Registry entry for a format.
pub fn lookup(format: DdsFormat) -> &'static FormatDescriptor {
    format.descriptor()
}

/// Resolves a header FourCC to a registered format.
///
/// `DX10` is recognised but unsupported; anything else unregistered is
/// unknown.
pub fn lookup_fourcc(fourcc: FourCC) -> Result<DdsFormat, DdsError> {
    match fourcc {
        FourCC::DX10 => Err(DdsError::UnsupportedFormat(
            "DX10 extended header".to_string(),
        )),
        FourCC::BC4U => Ok(DdsFormat::Ati1),
        FourCC::BC5U => Ok(DdsFormat::Ati2),
        _ => REGISTRY
            .iter()
            .find(|d| d.fourcc == Some(fourcc))
            .map(|d| d.format)
            .ok_or_else(|| DdsError::UnknownFormat(format!("FourCC {}", fourcc))),
    }
}

/// Resolves an uncompressed header layout (bit count and channel masks) to a
/// registered format.
pub fn lookup_bitmask(
    bit_count: u32,
    r_mask: u32,
    g_mask: u32,
    b_mask: u32,
    a_mask: u32,
) -> Result<DdsFormat, DdsError> {
    REGISTRY
        .iter()
        .filter_map(|d| d.bitmask.map(|layout| (d.format, layout)))
        .find(|(_, l)| {
            l.bit_count == bit_count
                && l.r_mask == r_mask
                && l.g_mask == g_mask
                && l.b_mask == b_mask
                && l.a_mask == a_mask
        })
        .map(|(format, _)| format)
        .ok_or_else(|| {
            DdsError::UnknownFormat(format!(
                "{}-bit layout R={:#X} G={:#X} B={:#X} A={:#X}",
                bit_count, r_mask, g_mask, b_mask, a_mask
            ))
        })
}
