//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process;

use ddskit::DdsError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Bad combination of arguments
    InvalidArgument(String),
    /// Failed to read an input file
    FileRead { path: PathBuf, error: io::Error },
    /// Failed to write an output file
    FileWrite { path: PathBuf, error: io::Error },
    /// Failed to load or save a PNG (or other raster) image
    Image {
        path: PathBuf,
        error: image::ImageError,
    },
    /// DDS decode or encode failed
    Dds { path: PathBuf, error: DdsError },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Dds {
                error: DdsError::InvalidMagic { .. },
                ..
            } => {
                eprintln!();
                eprintln!("The input does not start with \"DDS \"; is it a DDS texture?");
            }
            CliError::Dds {
                error: DdsError::UnsupportedFormat(_),
                ..
            } => {
                eprintln!();
                eprintln!("DX10 extended headers (BC6H, BC7, array textures) are not supported.");
                eprintln!("Re-export the texture as DXT1-DXT5, ATI1 or ATI2.");
            }
            CliError::Dds {
                error: DdsError::RequestedMipNotPresent { .. },
                ..
            } => {
                eprintln!();
                eprintln!("The file does not store that mip level; try a larger --max-dimension.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path.display(), error)
            }
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::Image { path, error } => {
                write!(f, "Image error for '{}': {}", path.display(), error)
            }
            CliError::Dds { path, error } => write!(f, "'{}': {}", path.display(), error),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::FileRead { error, .. } => Some(error),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Image { error, .. } => Some(error),
            CliError::Dds { error, .. } => Some(error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_path() {
        let err = CliError::Dds {
            path: PathBuf::from("terrain.dds"),
            error: DdsError::UnknownFormat("FourCC ETC2".to_string()),
        };
        assert_eq!(err.to_string(), "'terrain.dds': Unknown format: FourCC ETC2");
    }

    #[test]
    fn test_source_is_wrapped_error() {
        use std::error::Error;

        let err = CliError::FileRead {
            path: PathBuf::from("missing.dds"),
            error: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(CliError::InvalidArgument("x".to_string()).source().is_none());
    }
}
