//! Logger trait definition.

use std::fmt::Arguments;

/// Log level for filtering messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Verbose debugging information
    Trace,
    /// Debugging information
    Debug,
    /// General information
    Info,
    /// Warning messages
    Warn,
    /// Error messages
    Error,
}

/// Sink for log messages from encoders and decoders.
///
/// Implementations must be `Send + Sync`; one logger is shared by every
/// worker of a decode call.
///
/// # Example
///
/// ```
/// use ddskit::log::{Logger, NoOpLogger};
/// use ddskit::{log_info, log_debug};
/// use std::sync::Arc;
///
/// let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
/// log_info!(logger, "decoding {}", "terrain.dds");
/// log_debug!(logger, "level {} is {}×{}", 2, 64, 64);
/// ```
pub trait Logger: Send + Sync {
    /// Log a message at the specified level. The per-level methods
    /// delegate here.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Log a trace-level message.
    fn trace(&self, args: Arguments<'_>) {
        self.log(LogLevel::Trace, args);
    }

    /// Log a debug-level message.
    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Log an info-level message.
    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Log a warning-level message.
    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    /// Log an error-level message.
    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

/// Format and log at trace level.
#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)*) => {
        $logger.trace(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_level_equality() {
        assert_eq!(LogLevel::Info, LogLevel::Info);
        assert_ne!(LogLevel::Info, LogLevel::Debug);
    }

    #[derive(Default)]
    struct Recording(Mutex<Vec<(LogLevel, String)>>);

    impl Logger for Recording {
        fn log(&self, level: LogLevel, args: Arguments<'_>) {
            self.0.lock().unwrap().push((level, args.to_string()));
        }
    }

    #[test]
    fn test_level_methods_delegate_to_log() {
        let logger = Recording::default();
        logger.trace(format_args!("t"));
        logger.warn(format_args!("w"));
        logger.error(format_args!("e"));

        let entries = logger.0.lock().unwrap();
        let levels: Vec<_> = entries.iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, vec![LogLevel::Trace, LogLevel::Warn, LogLevel::Error]);
    }

    #[test]
    fn test_macros_format_arguments() {
        let logger = Recording::default();
        crate::log_debug!(logger, "level {} is {}×{}", 1, 32, 16);
        crate::log_info!(logger, "done");

        let entries = logger.0.lock().unwrap();
        assert_eq!(entries[0], (LogLevel::Debug, "level 1 is 32×16".to_string()));
        assert_eq!(entries[1], (LogLevel::Info, "done".to_string()));
    }
}
