//! `ddskit encode`: compress an image into a DDS file.

use std::path::PathBuf;

use clap::Args;
use ddskit::dds::{DdsEncoder, DdsHeader};
use ddskit::{DdsFormat, PixelBuffer};

use super::common::{parse_format, write_output, ProcessingArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Image to read (PNG)
    pub input: PathBuf,

    /// DDS file to write
    pub output: PathBuf,

    /// Target format: dxt1-dxt5, bc1-bc5, ati1, ati2, argb, rgb, v8u8, g8, a8l8
    #[arg(long, default_value = "dxt1", value_parser = parse_format)]
    pub format: DdsFormat,

    /// Write only the full-size level
    #[arg(long, conflicts_with = "mip_count")]
    pub no_mips: bool,

    /// Number of levels to write, full size included
    #[arg(long)]
    pub mip_count: Option<usize>,

    /// Drop levels larger than this power of two (0 = keep full size)
    #[arg(long, default_value = "0")]
    pub max_dimension: u32,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

/// Run the encode command.
pub fn run(args: EncodeArgs) -> Result<(), CliError> {
    let image = image::open(&args.input)
        .map_err(|error| CliError::Image {
            path: args.input.clone(),
            error,
        })?
        .to_rgba8();

    let dds_error = |error| CliError::Dds {
        path: args.input.clone(),
        error,
    };
    let top = PixelBuffer::from_rgba_image(&image).map_err(dds_error)?;

    let mut encoder = DdsEncoder::new(args.format)
        .with_config(args.processing.to_config())
        .with_max_dimension(args.max_dimension);
    if args.no_mips {
        encoder = encoder.without_mipmaps();
    } else if let Some(count) = args.mip_count {
        encoder = encoder.with_mipmap_count(count);
    }

    let bytes = encoder.encode(&top).map_err(dds_error)?;
    write_output(&args.output, &bytes)?;

    let header = DdsHeader::parse(&bytes).map_err(dds_error)?;
    println!(
        "Wrote {}×{} {} ({} bytes, {} levels) to {}",
        header.width,
        header.height,
        args.format,
        bytes.len(),
        header.mipmap_count.max(1),
        args.output.display()
    );
    Ok(())
}
