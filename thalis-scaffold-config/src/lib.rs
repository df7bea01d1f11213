//! Configuration system for the thalis-scaffold tab workspace.
//!
//! This crate provides configuration loading, saving, and default values
//! for the workspace engine. It includes:
//!
//! - [`ScaffoldConfig`]: tab naming, landing-page paths, strip layout metrics
//! - [`LogLevel`]: verbosity of the debug log bridge
//! - [`ConfigError`]: typed load/save/validation failures

pub mod config;
pub mod defaults;
pub mod error;
mod persistence;
mod types;

pub use config::ScaffoldConfig;
pub use error::ConfigError;
pub use types::{ContainerTag, LogLevel};
