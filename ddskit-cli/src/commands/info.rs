//! `ddskit info`: print a DDS header.

use std::path::PathBuf;

use clap::Args;
use ddskit::dds::{DdsDecoder, PixelFormat, HEADER_LEN};
use ddskit::mipmap::{level_dimensions, mip_level_size};

use super::common::read_input;
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// DDS file to inspect
    pub input: PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let bytes = read_input(&args.input)?;
    let dds_error = |error| CliError::Dds {
        path: args.input.clone(),
        error,
    };

    let (header, format) = DdsDecoder::new().read_header(&bytes).map_err(dds_error)?;
    let descriptor = format.descriptor();

    println!("File:        {}", args.input.display());
    println!("Size:        {} bytes", bytes.len());
    println!("Dimensions:  {}×{}", header.width, header.height);
    println!("Format:      {}", format);
    match header.pixel_format.kind() {
        PixelFormat::Compressed { fourcc } => {
            println!("FourCC:      {}", fourcc);
            println!("Block size:  {} bytes", descriptor.block_size);
        }
        PixelFormat::Uncompressed(layout) => {
            println!("Bit count:   {}", layout.bit_count);
            println!(
                "Masks:       R={:#010X} G={:#010X} B={:#010X} A={:#010X}",
                layout.r_mask, layout.g_mask, layout.b_mask, layout.a_mask
            );
        }
    }
    println!("Channels:    {}", descriptor.channel_count);
    if descriptor.is_premultiplied_alpha {
        println!("Alpha:       premultiplied");
    }
    println!("Mip levels:  {}", header.mipmap_count);
    println!("Pitch/size:  {}", header.pitch_or_linear_size);
    println!("Flags:       {:#010X}", header.flags);
    println!("Caps:        {:#010X}", header.caps);

    // Compare declared levels with what the stream holds.
    let declared = header.mipmap_count.max(1);
    let mut offset = HEADER_LEN;
    let mut complete = 0;
    for level in 0..declared {
        let (w, h) = level_dimensions(header.width, header.height, level);
        offset += mip_level_size(w, h, format);
        if offset > bytes.len() {
            break;
        }
        complete += 1;
    }
    if complete < declared {
        println!(
            "Stored:      {} of {} levels (file is truncated)",
            complete, declared
        );
    }

    Ok(())
}
