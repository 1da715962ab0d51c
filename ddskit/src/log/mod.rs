//! Logging abstraction used by the encoder and decoder.
//!
//! The encoder and decoder never talk to `tracing` directly. They hold an
//! `Arc<dyn Logger>` and emit through the `log_*!` macros, so callers decide
//! where messages go:
//!
//! - `TracingLogger`: forwards to the `tracing` crate (the default)
//! - `NoOpLogger`: drops everything, used by tests and benchmarks
//!
//! ```
//! use ddskit::log::{Logger, NoOpLogger};
//! use ddskit::{log_debug, log_warn};
//! use std::sync::Arc;
//!
//! struct LevelWalker {
//!     logger: Arc<dyn Logger>,
//! }
//!
//! impl LevelWalker {
//!     fn walk(&self, levels: usize, stored: usize) {
//!         log_debug!(self.logger, "walking {} levels", levels);
//!         if stored < levels {
//!             log_warn!(self.logger, "only {} of {} levels stored", stored, levels);
//!         }
//!     }
//! }
//!
//! LevelWalker { logger: Arc::new(NoOpLogger) }.walk(9, 7);
//! ```

mod noop;
mod tracing_adapter;
mod r#trait;

pub use noop::NoOpLogger;
pub use r#trait::{LogLevel, Logger};
pub use tracing_adapter::TracingLogger;
