//! `ddskit decode`: write one mip level of a DDS file as PNG.

use std::path::PathBuf;

use clap::Args;
use ddskit::dds::DdsDecoder;

use super::common::{read_input, ProcessingArgs};
use crate::error::CliError;

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// DDS file to read
    pub input: PathBuf,

    /// Image to write (format from extension, e.g. .png)
    pub output: PathBuf,

    /// Mip level to write, counted from the first decoded level
    #[arg(long, default_value = "0")]
    pub mip: usize,

    /// Seek to the first level whose larger side fits (0 = full size)
    #[arg(long, default_value = "0")]
    pub max_dimension: u32,

    #[command(flatten)]
    pub processing: ProcessingArgs,
}

/// Run the decode command.
pub fn run(args: DecodeArgs) -> Result<(), CliError> {
    let bytes = read_input(&args.input)?;

    let chain = DdsDecoder::new()
        .with_max_dimension(args.max_dimension)
        .with_config(args.processing.to_config())
        .decode(&bytes)
        .map_err(|error| CliError::Dds {
            path: args.input.clone(),
            error,
        })?;

    let level = chain.level(args.mip).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "--mip {} is out of range, {} levels decoded",
            args.mip,
            chain.len()
        ))
    })?;

    level
        .to_rgba_image()
        .save(&args.output)
        .map_err(|error| CliError::Image {
            path: args.output.clone(),
            error,
        })?;

    tracing::info!(levels = chain.len(), "decoded {}", args.input.display());
    println!(
        "Wrote {}×{} level {} to {}",
        level.width(),
        level.height(),
        args.mip,
        args.output.display()
    );
    Ok(())
}
