//! Core application functionality
//!
//! This module contains the binary's surface:
//! - CLI parsing and validation
//! - Command dispatch
//! - User settings
//! - Application error helpers

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use runner::run_app;
