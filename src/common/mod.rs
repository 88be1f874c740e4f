//! # Common Components
//!
//! Shared utilities used by the library's workflows and the `stego` binary.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration loading and defaults
//! - [`logging`]: `env_logger` setup

pub mod config;
pub mod logging;
