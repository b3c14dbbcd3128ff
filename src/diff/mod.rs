//! Pairwise snapshot comparison.
//!
//! Compares two parsed snapshots (baseline vs target) and produces scalar
//! deltas plus per-owner byte deltas.
//!
//! # Example
//! ```ignore
//! use dhat_lens::diff::{compare_profiles, render_compare};
//! use dhat_lens::parser::parse_profile;
//!
//! let baseline = parse_profile("dhat-render-before.json")?;
//! let target = parse_profile("dhat-render-after.json")?;
//! let report = compare_profiles(&baseline, &target, &config.owner);
//! println!("{}", render_compare(&report, 10, &config.display));
//! ```

mod engine;
mod output;
mod schema;

// Public API exports
pub use engine::{compare_profiles, delta, function_deltas};
pub use output::render_compare;
pub use schema::{CompareReport, Delta, FunctionDelta, ScalarDeltas, SnapshotMetadata};
