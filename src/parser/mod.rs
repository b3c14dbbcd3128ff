//! Snapshot parsing and schema definitions.
//!
//! This module handles:
//! - Deserializing DHAT JSON snapshots
//! - Validating program points against the frame table
//! - Deriving phase and subject name from file names
//! - Batch loading a profile directory

pub mod schema;
pub mod snapshot;

// Re-export main types
pub use schema::{ProgramPoint, Profile, RawSnapshot};
pub use snapshot::{extract_phase_and_name, load_profiles, parse_profile};
