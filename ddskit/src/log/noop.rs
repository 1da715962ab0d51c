//! No-operation logger implementation.

use crate::log::{LogLevel, Logger};
use std::fmt::Arguments;

/// A logger that discards all messages.
///
/// ```
/// use ddskit::dds::DdsDecoder;
/// use ddskit::log::NoOpLogger;
/// use std::sync::Arc;
///
/// let decoder = DdsDecoder::new().with_logger(Arc::new(NoOpLogger));
/// # let _ = decoder;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}
