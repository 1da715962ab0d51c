//! ddskit CLI - Command-line interface
//!
//! This binary provides a command-line interface to the ddskit library:
//! inspecting DDS headers, decoding a mip level to PNG and encoding PNG
//! images into DDS.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ddskit::logging::init_logging;

use commands::{decode, encode, info};
use error::CliError;

#[derive(Parser)]
#[command(name = "ddskit")]
#[command(version = ddskit::VERSION)]
#[command(about = "Read and write DirectDraw Surface textures", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write log output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the header of a DDS file
    Info(info::InfoArgs),
    /// Decode a DDS file and save one mip level as an image
    Decode(decode::DecodeArgs),
    /// Encode an image into a DDS file
    Encode(encode::EncodeArgs),
}

fn main() {
    let cli = Cli::parse();

    let _guard = match init_logging(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => CliError::LoggingInit(e.to_string()).exit(),
    };

    let result = match cli.command {
        Commands::Info(args) => info::run(args),
        Commands::Decode(args) => decode::run(args),
        Commands::Encode(args) => encode::run(args),
    };

    if let Err(e) = result {
        e.exit();
    }
}
