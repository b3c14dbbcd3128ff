//! Snapshot file loading.
//!
//! Reads DHAT JSON files, validates the program point and frame tables, and
//! derives the run phase and subject name from the file name.

use super::schema::{ProgramPoint, Profile, RawSnapshot};
use crate::utils::config::{
    AGGREGATE_NAME, KNOWN_PHASES, SNAPSHOT_GLOB, SNAPSHOT_PREFIX, UNKNOWN_PHASE,
};
use crate::utils::error::ParseError;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Parse a single snapshot file
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::Io` - File cannot be read
/// * `ParseError::Json` - Invalid JSON, or `pps`/`ftbl` missing
/// * `ParseError::FrameOutOfRange` - A call stack points past the frame table
/// * `ParseError::TotalsOverflow` - A summed field does not fit in a u64
pub fn parse_profile(path: impl AsRef<Path>) -> Result<Profile, ParseError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: RawSnapshot = serde_json::from_str(&contents).map_err(|source| ParseError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    validate_frames(path, &raw)?;
    validate_totals(path, &raw)?;

    let (phase, name) = extract_phase_and_name(&stem(path));

    debug!(
        "Parsed {}: phase={}, name={}, {} program points, {} frames",
        path.display(),
        phase,
        name,
        raw.pps.len(),
        raw.ftbl.len()
    );

    Ok(Profile::new(
        path.to_path_buf(),
        phase,
        name,
        raw.pps,
        raw.ftbl,
    ))
}

/// Reject call stacks that index past the frame table
///
/// **Private** - internal helper for parse_profile
fn validate_frames(path: &Path, raw: &RawSnapshot) -> Result<(), ParseError> {
    let len = raw.ftbl.len();
    for (point, pp) in raw.pps.iter().enumerate() {
        if let Some(&frame) = pp.fs.iter().find(|&&idx| idx >= len) {
            return Err(ParseError::FrameOutOfRange {
                path: path.to_path_buf(),
                point,
                frame,
                len,
            });
        }
    }
    Ok(())
}

/// Reject snapshots whose per-field totals do not fit in a u64
fn validate_totals(path: &Path, raw: &RawSnapshot) -> Result<(), ParseError> {
    let fields: [(&'static str, fn(&ProgramPoint) -> u64); 6] = [
        ("tb", |pp| pp.tb),
        ("tbk", |pp| pp.tbk),
        ("gb", |pp| pp.gb),
        ("gbk", |pp| pp.gbk),
        ("eb", |pp| pp.eb),
        ("ebk", |pp| pp.ebk),
    ];

    for (field, get) in fields {
        let total = raw
            .pps
            .iter()
            .try_fold(0u64, |acc, pp| acc.checked_add(get(pp)));
        if total.is_none() {
            return Err(ParseError::TotalsOverflow {
                path: path.to_path_buf(),
                field,
            });
        }
    }
    Ok(())
}

/// File name without directory or `.json` extension
fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Split a snapshot stem like `dhat-render-alice` into (phase, name)
///
/// Known phases are tried longest-first so `session_once-x` never resolves
/// to `session`. Unknown phases fall back to positional splitting on `-`.
pub fn extract_phase_and_name(stem: &str) -> (String, String) {
    let prefix = format!("{}-", SNAPSHOT_PREFIX);
    let rest = stem.strip_prefix(&prefix).unwrap_or(stem);

    let mut phases: Vec<&str> = KNOWN_PHASES.to_vec();
    // stable: equal-length labels keep table order
    phases.sort_by_key(|p| std::cmp::Reverse(p.len()));

    for phase in phases {
        if rest == phase {
            return (phase.to_string(), AGGREGATE_NAME.to_string());
        }
        if let Some(name) = rest
            .strip_prefix(phase)
            .and_then(|tail| tail.strip_prefix('-'))
        {
            return (phase.to_string(), name.to_string());
        }
    }

    let mut parts = stem.splitn(3, '-');
    let _prefix = parts.next();
    let phase = parts.next().unwrap_or(UNKNOWN_PHASE).to_string();
    let name = parts.next().unwrap_or(AGGREGATE_NAME).to_string();
    (phase, name)
}

/// Whether a stem names a phase-level aggregate rather than one subject
///
/// Anything with fewer than three `-` separated parts is an aggregate.
pub fn is_aggregate_file(stem: &str) -> bool {
    stem.split('-').count() < 3
}

/// List snapshot files in a directory, sorted for determinism
pub fn find_snapshots(directory: impl AsRef<Path>) -> Result<Vec<PathBuf>, ParseError> {
    let escaped = glob::Pattern::escape(&directory.as_ref().to_string_lossy());
    let pattern = Path::new(&escaped).join(SNAPSHOT_GLOB);

    let mut paths = glob::glob(&pattern.to_string_lossy())?.collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

/// Load every per-subject snapshot in a directory
///
/// **Public** - used by all directory-based commands
///
/// Phase-level aggregate files are skipped. When `phase` is given, only
/// profiles in that phase are returned. A missing or empty directory
/// yields an empty list.
pub fn load_profiles(
    directory: impl AsRef<Path>,
    phase: Option<&str>,
) -> Result<Vec<Profile>, ParseError> {
    let directory = directory.as_ref();
    let mut profiles = Vec::new();

    for path in find_snapshots(directory)? {
        if is_aggregate_file(&stem(&path)) {
            debug!("Skipping phase aggregate: {}", path.display());
            continue;
        }

        let profile = parse_profile(&path)?;
        if phase.is_some_and(|wanted| profile.phase != wanted) {
            continue;
        }
        profiles.push(profile);
    }

    info!(
        "Loaded {} profiles from {}{}",
        profiles.len(),
        directory.display(),
        phase.map(|p| format!(" (phase={})", p)).unwrap_or_default()
    );

    Ok(profiles)
}
