//! Logging infrastructure for ddskit binaries.
//!
//! Provides structured logging to stderr with an optional log file:
//! - Level chosen by `-v` count unless `RUST_LOG` is set
//! - The log file, when given, is cleared on start and written without ANSI
//!   colours through a non-blocking writer

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard will flush and close the log file writer.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize logging system.
///
/// # Arguments
///
/// * `verbosity` - Number of `-v` flags; ignored when `RUST_LOG` is set
/// * `log_file` - Optional file that receives a copy of every event
///
/// # Errors
///
/// Returns error if the log file cannot be created or a global subscriber
/// is already installed.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> Result<LoggingGuard, io::Error> {
    let (file_layer, file_guard) = match log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(io::Error::other)?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Clear `path` (creating parent directories) and open a non-blocking
/// appender on it.
fn file_writer(
    path: &Path,
) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard), io::Error> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("log path {} has no file name", path.display()),
        )
    })?;

    fs::create_dir_all(dir)?;
    fs::write(path, "")?;

    let appender = tracing_appender::rolling::never(dir, name);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "trace");
    }

    #[test]
    fn test_file_writer_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/ddskit.log");

        let (_writer, _guard) = file_writer(&path).unwrap();
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_file_writer_clears_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ddskit.log");
        fs::write(&path, "old log data").unwrap();

        let (_writer, _guard) = file_writer(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_file_writer_rejects_path_without_name() {
        let result = file_writer(Path::new("/"));
        assert!(result.is_err());
    }

    #[test]
    fn test_guard_structure() {
        use tracing_appender::non_blocking::NonBlocking;

        let (non_blocking, guard) = NonBlocking::new(std::io::sink());
        drop(non_blocking);

        let _logging_guard = LoggingGuard {
            _file_guard: Some(guard),
        };
        let _empty = LoggingGuard { _file_guard: None };
    }

    // Installing the global subscriber is exercised by the CLI; it can only
    // happen once per process.
}
