//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading snapshots
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid snapshot JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Program point {point} in {} references frame {frame}, but the frame table has {len} entries",
        .path.display()
    )]
    FrameOutOfRange {
        path: PathBuf,
        point: usize,
        frame: usize,
        len: usize,
    },

    #[error("Field `{field}` overflows when summed over {}", .path.display())]
    TotalsOverflow { path: PathBuf, field: &'static str },

    #[error("Invalid snapshot pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to list snapshots: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Errors that can occur when parsing a human-readable size
#[derive(Error, Debug, PartialEq)]
pub enum SizeError {
    #[error("Size is empty")]
    Empty,

    #[error("Invalid size '{0}': not a number")]
    InvalidNumber(String),

    #[error("Invalid size '{0}': must not be negative")]
    Negative(String),
}

/// Errors that can occur while loading the analyzer config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
