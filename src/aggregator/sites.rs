//! Fold program points into per-owner allocation statistics.

use super::owner::resolve_owner;
use crate::parser::schema::Profile;
use crate::utils::config::OwnerRules;
use log::debug;
use serde::Serialize;
use std::collections::HashMap;

/// Running totals for one owning function
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SiteStats {
    /// Bytes allocated over the whole run
    pub total_bytes: u64,

    /// Blocks allocated over the whole run
    pub total_blocks: u64,

    /// Sum of each point's bytes alive at the global peak
    pub peak_bytes: u64,

    /// Largest single-point concurrent peak
    pub peak_max: u64,
}

/// Owner name to statistics; iteration order is unspecified
pub type SiteMap = HashMap<String, SiteStats>;

/// Aggregate every program point of every profile by owner
///
/// Counters saturate at `u64::MAX`.
///
/// **Public** - main entry point for aggregation
///
/// The result does not depend on the order of `profiles`.
pub fn aggregate_sites<'a>(
    profiles: impl IntoIterator<Item = &'a Profile>,
    rules: &OwnerRules,
) -> SiteMap {
    let mut sites = SiteMap::new();
    let mut count = 0usize;

    for profile in profiles {
        count += 1;
        for pp in &profile.program_points {
            let owner = resolve_owner(pp, &profile.frame_table, rules);
            let stats = sites.entry(owner).or_default();
            stats.total_bytes = stats.total_bytes.saturating_add(pp.tb);
            stats.total_blocks = stats.total_blocks.saturating_add(pp.tbk);
            stats.peak_bytes = stats.peak_bytes.saturating_add(pp.gb);
            stats.peak_max = stats.peak_max.max(pp.mb);
        }
    }

    debug!(
        "Aggregated {} profiles into {} owners",
        count,
        sites.len()
    );

    sites
}

/// Total bytes per owner for a single profile
///
/// Used by the diff engine, which only compares allocation volume.
pub fn owner_bytes(profile: &Profile, rules: &OwnerRules) -> HashMap<String, u64> {
    let mut bytes = HashMap::new();
    for pp in &profile.program_points {
        let owned = bytes
            .entry(resolve_owner(pp, &profile.frame_table, rules))
            .or_insert(0u64);
        *owned = owned.saturating_add(pp.tb);
    }
    bytes
}
