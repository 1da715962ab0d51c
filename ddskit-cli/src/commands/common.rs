//! Arguments and helpers shared across CLI commands.

use std::fs;
use std::path::Path;

use clap::Args;
use ddskit::{DdsFormat, ProcessingConfig};

use crate::error::CliError;

/// Processing options accepted by `decode` and `encode`.
#[derive(Debug, Clone, Args)]
pub struct ProcessingArgs {
    /// Worker threads (0 = one per core, 1 = single-threaded)
    #[arg(long, default_value = "0")]
    pub threads: usize,

    /// Request hardware acceleration (falls back to the CPU path)
    #[arg(long)]
    pub accelerate: bool,

    /// DXT1: pixels with alpha below this fraction become transparent
    #[arg(long, default_value = "0.2")]
    pub alpha_threshold: f32,
}

impl ProcessingArgs {
    pub fn to_config(&self) -> ProcessingConfig {
        ProcessingConfig::new()
            .with_parallelism(self.threads)
            .with_acceleration(self.accelerate)
            .with_dxt1_alpha_threshold(self.alpha_threshold)
    }
}

/// Parse a format name such as `dxt5`, `bc3` or `argb`.
pub fn parse_format(s: &str) -> Result<DdsFormat, String> {
    s.parse::<DdsFormat>().map_err(|e| e.to_string())
}

pub fn read_input(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|error| CliError::FileRead {
        path: path.to_path_buf(),
        error,
    })
}

pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    fs::write(path, bytes).map_err(|error| CliError::FileWrite {
        path: path.to_path_buf(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format_aliases() {
        assert_eq!(parse_format("bc3").unwrap(), DdsFormat::Dxt5);
        assert_eq!(parse_format("ATI2").unwrap(), DdsFormat::Ati2);
        assert!(parse_format("bc7").unwrap_err().contains("bc7"));
    }

    #[test]
    fn test_processing_args_to_config() {
        let args = ProcessingArgs {
            threads: 2,
            accelerate: true,
            alpha_threshold: 0.5,
        };
        let config = args.to_config();
        assert_eq!(config.parallelism(), 2);
        assert!(config.accelerate());
        assert_eq!(config.alpha_cutoff(), 128);
    }
}
