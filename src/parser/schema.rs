//! Snapshot JSON schema definitions.
//!
//! Only the fields the analyzer reads are modelled; everything else the
//! heap profiler writes (mode, command, timings, ...) is ignored.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level DHAT snapshot document as written to disk
#[derive(Debug, Clone, Deserialize)]
pub struct RawSnapshot {
    /// Program points, one per distinct allocation call-site
    pub pps: Vec<ProgramPoint>,

    /// Frame table referenced by `ProgramPoint::fs`
    pub ftbl: Vec<String>,
}

/// A single allocation call-site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramPoint {
    /// Total bytes ever allocated here
    pub tb: u64,

    /// Total blocks ever allocated here
    pub tbk: u64,

    /// Bytes alive at the moment of global peak
    pub gb: u64,

    /// Blocks alive at the moment of global peak
    pub gbk: u64,

    /// Bytes still alive at exit
    pub eb: u64,

    /// Blocks still alive at exit
    pub ebk: u64,

    /// This point's own maximum of concurrently live bytes
    pub mb: u64,

    /// Call stack as frame table indices; index 0 is the allocator entry
    pub fs: Vec<usize>,
}

/// One parsed snapshot with derived totals
#[derive(Debug, Clone)]
pub struct Profile {
    /// File the snapshot was read from
    pub path: PathBuf,

    /// Subject name, or `(aggregate)` for phase-level files
    pub name: String,

    /// Run phase the snapshot was captured in
    pub phase: String,

    pub total_bytes: u64,
    pub total_blocks: u64,
    pub peak_bytes: u64,
    pub peak_blocks: u64,
    pub end_bytes: u64,
    pub end_blocks: u64,

    pub program_points: Vec<ProgramPoint>,
    pub frame_table: Vec<String>,
}

impl Profile {
    /// Build a profile, deriving all totals from the program points
    ///
    /// Totals saturate at `u64::MAX`; `parse_profile` rejects files where
    /// that would happen.
    pub fn new(
        path: PathBuf,
        phase: String,
        name: String,
        program_points: Vec<ProgramPoint>,
        frame_table: Vec<String>,
    ) -> Self {
        let sum = |field: fn(&ProgramPoint) -> u64| -> u64 {
            program_points
                .iter()
                .map(field)
                .fold(0u64, |acc, v| acc.saturating_add(v))
        };

        Self {
            total_bytes: sum(|pp| pp.tb),
            total_blocks: sum(|pp| pp.tbk),
            peak_bytes: sum(|pp| pp.gb),
            peak_blocks: sum(|pp| pp.gbk),
            end_bytes: sum(|pp| pp.eb),
            end_blocks: sum(|pp| pp.ebk),
            path,
            name,
            phase,
            program_points,
            frame_table,
        }
    }

    /// File name for headers, falling back to the full path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
