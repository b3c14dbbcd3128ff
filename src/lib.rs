//! dhat-lens
//!
//! Offline analysis of DHAT heap snapshots. Attributes every allocation
//! call-site to the source function that owns it, then ranks owners by
//! volume, churn and peak-heap share, checks peak heap against a budget,
//! and diffs two snapshots.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install dhat-lens
//! dhat-lens report --dir target/memory --target 512KB
//! ```

pub mod aggregator;
pub mod commands;
pub mod diff;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
