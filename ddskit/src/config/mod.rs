//! Configuration types for ddskit components.
//!
//! Configuration is a plain value handed to each encode or decode call.
//! There is no process-wide state: two calls with different configurations
//! can run side by side.
//!
//! # Example
//!
//! ```
//! use ddskit::config::ProcessingConfig;
//!
//! let config = ProcessingConfig::default()
//!     .with_parallelism(4)
//!     .with_dxt1_alpha_threshold(0.5);
//! assert_eq!(config.parallelism(), 4);
//! ```

mod processing;

pub use processing::{ProcessingConfig, DEFAULT_DXT1_ALPHA_THRESHOLD};
