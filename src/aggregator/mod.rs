//! Ownership attribution and aggregation of program points.
//!
//! This module transforms parsed snapshots into:
//! - An owning function per program point
//! - Per-owner running totals (`SiteStats`)

pub mod owner;
pub mod sites;

// Re-export main types and functions
pub use owner::{clean_frame, resolve_owner};
pub use sites::{aggregate_sites, owner_bytes, SiteMap, SiteStats};
