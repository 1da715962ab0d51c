//! CLI command implementations.
//!
//! Each subcommand has its own module with argument definitions and handlers.
//!
//! # Command Modules
//!
//! - [`info`] - Print header fields and the resolved format
//! - [`decode`] - Write one mip level as PNG
//! - [`encode`] - Compress a PNG into a DDS file

pub mod common;
pub mod decode;
pub mod encode;
pub mod info;
