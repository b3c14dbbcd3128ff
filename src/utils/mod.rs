//! Utility modules for configuration, error handling, sizes and formatting.

pub mod config;
pub mod error;
pub mod format;
pub mod size;

// Re-export commonly used error types for convenience
pub use error::{ConfigError, OutputError, ParseError, SizeError};
pub use size::parse_size;
