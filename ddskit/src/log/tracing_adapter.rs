//! Tracing library adapter implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// Logger implementation that delegates to the `tracing` crate.
///
/// Events carry the `ddskit` target, so `RUST_LOG=ddskit=debug` shows
/// per-level decode and encode detail without the binary's own events.
/// Whatever subscriber the binary installs (see [`crate::logging`]) decides
/// what is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

/// Target attached to every forwarded event.
pub const TARGET: &str = "ddskit";

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Trace => tracing::trace!(target: TARGET, "{}", args),
            LogLevel::Debug => tracing::debug!(target: TARGET, "{}", args),
            LogLevel::Info => tracing::info!(target: TARGET, "{}", args),
            LogLevel::Warn => tracing::warn!(target: TARGET, "{}", args),
            LogLevel::Error => tracing::error!(target: TARGET, "{}", args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TracingLogger>();
    }

    #[test]
    fn test_tracing_logger_as_trait_object() {
        let logger: Box<dyn Logger> = Box::new(TracingLogger);
        // no subscriber installed; must not panic
        logger.info(format_args!("decoded {} levels", 3));
        logger.warn(format_args!("truncated"));
    }

    #[test]
    fn test_target_matches_crate_name() {
        assert_eq!(TARGET, env!("CARGO_PKG_NAME"));
    }
}
