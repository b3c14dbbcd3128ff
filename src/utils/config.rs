//! Configuration and constants for the CLI.
//!
//! Most knobs are fixed constants. The owner markers and the display
//! aliases can be overridden from an optional TOML file.

use super::error::ConfigError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current JSON export schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Directory searched for snapshots when none is given
pub const DEFAULT_PROFILE_DIR: &str = "target/memory";

/// File name prefix written by the heap profiler
pub const SNAPSHOT_PREFIX: &str = "dhat";

/// Glob matched inside the profile directory
pub const SNAPSHOT_GLOB: &str = "dhat-*.json";

// Phases emitted by the heap profile harness. Matched longest-first.
pub const KNOWN_PHASES: &[&str] = &[
    "session_once",
    "session-once",
    "tokenize",
    "render",
    "cover",
    "open",
    "full",
    "session",
];

pub const AGGREGATE_NAME: &str = "(aggregate)";
pub const UNKNOWN_PHASE: &str = "unknown";
pub const UNKNOWN_OWNER: &str = "(unknown)";

/// Deepest call-stack position inspected when resolving an owner
pub const OWNER_SEARCH_DEPTH: usize = 7;

/// Substrings identifying application or harness frames
pub const DEFAULT_OWNER_MARKERS: &[&str] = &["epub_stream", "heap_profile"];

// Churn: lots of bytes, never much alive at once
pub const CHURN_MIN_TOTAL_BYTES: u64 = 50_000;
pub const CHURN_MAX_PEAK_BYTES: u64 = 1024;

pub const DEFAULT_BUDGET_TARGET: &str = "512KB";
pub const DEFAULT_TOP_N: usize = 15;
pub const DEFAULT_COMPARE_TOP_N: usize = 10;
pub const DEFAULT_DISPLAY_WIDTH: usize = 72;

// Namespace shortenings applied in order before display
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("epub_stream_render::render_layout::", "layout::"),
    ("epub_stream_render::render_ir::", "ir::"),
    ("epub_stream_render::render_engine::", "engine::"),
    ("epub_stream_embedded_graphics::", "eg::"),
    ("epub_stream::render_prep::", "prep::"),
    ("epub_stream::book::", "book::"),
    ("epub_stream::zip::", "zip::"),
    ("epub_stream::tokenizer::", "tokenizer::"),
    ("epub_stream::metadata::", "metadata::"),
    ("epub_stream::css::", "css::"),
];

/// Complete analyzer configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    /// Ownership attribution rules
    #[serde(default)]
    pub owner: OwnerRules,

    /// Function name display rules
    #[serde(default)]
    pub display: DisplayRules,
}

/// Which frames count as "ours" when attributing an allocation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OwnerRules {
    /// A frame is an owner if its cleaned name contains any of these
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

impl Default for OwnerRules {
    fn default() -> Self {
        Self {
            markers: default_markers(),
        }
    }
}

/// How owner names are shortened for tables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayRules {
    /// Ordered (from, to) replacements
    #[serde(default = "default_aliases")]
    pub aliases: Vec<(String, String)>,

    /// Longest name printed before truncation
    #[serde(default = "default_width")]
    pub max_width: usize,
}

impl Default for DisplayRules {
    fn default() -> Self {
        Self {
            aliases: default_aliases(),
            max_width: DEFAULT_DISPLAY_WIDTH,
        }
    }
}

fn default_markers() -> Vec<String> {
    DEFAULT_OWNER_MARKERS.iter().map(|m| m.to_string()).collect()
}

fn default_aliases() -> Vec<(String, String)> {
    DEFAULT_ALIASES
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

fn default_width() -> usize {
    DEFAULT_DISPLAY_WIDTH
}

/// Load analyzer configuration from a TOML file
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalyzerConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading analyzer config from: {}", path.display());

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AnalyzerConfig = toml::from_str(&contents)?;

    if config.owner.markers.is_empty() {
        warn!("No owner markers configured; every allocation falls back to its first caller");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.owner.markers, vec!["epub_stream", "heap_profile"]);
        assert_eq!(config.display.max_width, 72);
        assert_eq!(config.display.aliases.len(), DEFAULT_ALIASES.len());
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[owner]\nmarkers = [\"my_app\"]").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.owner.markers, vec!["my_app"]);
        // untouched section keeps defaults
        assert_eq!(config.display.max_width, DEFAULT_DISPLAY_WIDTH);
    }

    #[test]
    fn test_load_aliases() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[display]\naliases = [[\"my_app::render::\", \"r::\"]]\nmax_width = 40"
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(
            config.display.aliases,
            vec![("my_app::render::".to_string(), "r::".to_string())]
        );
        assert_eq!(config.display.max_width, 40);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[owner\nmarkers = ").unwrap();
        assert!(matches!(load_config(file.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_config("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
