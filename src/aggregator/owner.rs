//! Attribute a program point to the source function that owns it.
//!
//! Stacks from the heap profiler start at the allocator entry point, then
//! walk outward through wrappers (`RawVec::grow`, `String::push`, ...)
//! until they reach application code. We look a fixed number of frames
//! out for the first one that belongs to the application.

use crate::parser::schema::ProgramPoint;
use crate::utils::config::{OwnerRules, OWNER_SEARCH_DEPTH, UNKNOWN_OWNER};

/// Strip the address prefix and source location from a frame entry
///
/// `"0x10249dbc4: foo::bar (src/foo.rs:12:5)"` becomes `"foo::bar"`.
pub fn clean_frame(raw: &str) -> &str {
    let name = raw.split_once(": ").map(|(_, rest)| rest).unwrap_or(raw);
    name.rsplit_once(" (").map(|(head, _)| head).unwrap_or(name)
}

/// Resolve the owning function of one program point
///
/// Positions 1..=7 of the stack are searched for the first frame whose
/// cleaned name contains an owner marker. Position 0 is never inspected.
/// Without a match the frame at position 1 is used, and a stack with no
/// caller at all resolves to `(unknown)`.
pub fn resolve_owner(pp: &ProgramPoint, frames: &[String], rules: &OwnerRules) -> String {
    let frame_name = |idx: &usize| frames.get(*idx).map(|raw| clean_frame(raw));

    let owned = pp
        .fs
        .iter()
        .skip(1)
        .take(OWNER_SEARCH_DEPTH)
        .filter_map(frame_name)
        .find(|name| rules.markers.iter().any(|m| name.contains(m.as_str())));

    owned
        .or_else(|| pp.fs.get(1).and_then(frame_name))
        .unwrap_or(UNKNOWN_OWNER)
        .to_string()
}
