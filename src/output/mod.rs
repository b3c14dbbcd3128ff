//! Output writers for analysis results.
//!
//! Text goes to stdout through the renderers; this module handles the
//! JSON exports written to disk.

pub mod json;

// Re-export main functions
pub use json::write_report;
