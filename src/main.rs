//! dhat-lens CLI
//!
//! Analyzes DHAT heap snapshots written by the heap profile harness.
//! Ranks allocation owners, checks peak heap budgets and compares runs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;
use std::process::ExitCode;

use dhat_lens::commands::{
    execute_budget, execute_churn, execute_compare, execute_hotspots, execute_peak,
    execute_report, execute_summary, BudgetArgs, CompareArgs, ReportArgs, ViewArgs,
};
use dhat_lens::report::BudgetVerdict;
use dhat_lens::utils::config::{
    load_config, AnalyzerConfig, DEFAULT_BUDGET_TARGET, DEFAULT_COMPARE_TOP_N, DEFAULT_PROFILE_DIR,
    DEFAULT_TOP_N,
};

/// dhat-lens - heap snapshot analysis
#[derive(Parser, Debug)]
#[command(name = "dhat-lens")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file overriding owner markers and display aliases
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

/// Directory and phase selection shared by the directory commands
#[derive(Args, Debug)]
struct Selection {
    /// Profile directory
    #[arg(long, env = "DHAT_LENS_DIR", default_value = DEFAULT_PROFILE_DIR)]
    dir: PathBuf,

    /// Filter by phase
    #[arg(long)]
    phase: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Per-file allocation summary
    Summary {
        #[command(flatten)]
        selection: Selection,
    },

    /// Top allocation sites by total bytes
    Hotspots {
        #[command(flatten)]
        selection: Selection,

        /// Number of entries
        #[arg(short, default_value_t = DEFAULT_TOP_N)]
        n: usize,
    },

    /// Short-lived (high-churn) allocations
    Churn {
        #[command(flatten)]
        selection: Selection,

        /// Number of entries
        #[arg(short, default_value_t = DEFAULT_TOP_N)]
        n: usize,
    },

    /// Peak heap breakdown
    Peak {
        #[command(flatten)]
        selection: Selection,

        /// Number of entries
        #[arg(short, default_value_t = DEFAULT_TOP_N)]
        n: usize,
    },

    /// Check peak heap against memory budget
    Budget {
        #[command(flatten)]
        selection: Selection,

        /// Budget target (e.g. 512KB, 4MB)
        #[arg(long, default_value = DEFAULT_BUDGET_TARGET)]
        target: String,
    },

    /// Compare two profiles
    Compare {
        /// First profile JSON
        file_a: PathBuf,

        /// Second profile JSON
        file_b: PathBuf,

        /// Number of changed functions
        #[arg(short, default_value_t = DEFAULT_COMPARE_TOP_N)]
        n: usize,

        /// Also write the comparison as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Full analysis report
    Report {
        #[command(flatten)]
        selection: Selection,

        /// Number of entries per section
        #[arg(short, default_value_t = DEFAULT_TOP_N)]
        n: usize,

        /// Budget target (e.g. 512KB, 4MB)
        #[arg(long, default_value = DEFAULT_BUDGET_TARGET)]
        target: String,

        /// Also write the report as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalyzerConfig::default(),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Execute command
    let verdict = match cli.command {
        Commands::Summary { selection } => {
            execute_summary(&view_args(selection, DEFAULT_TOP_N), &mut out)?;
            BudgetVerdict::WithinBudget
        }

        Commands::Hotspots { selection, n } => {
            execute_hotspots(&view_args(selection, n), &config, &mut out)?;
            BudgetVerdict::WithinBudget
        }

        Commands::Churn { selection, n } => {
            execute_churn(&view_args(selection, n), &config, &mut out)?;
            BudgetVerdict::WithinBudget
        }

        Commands::Peak { selection, n } => {
            execute_peak(&view_args(selection, n), &config, &mut out)?;
            BudgetVerdict::WithinBudget
        }

        Commands::Budget { selection, target } => {
            let args = BudgetArgs {
                dir: selection.dir,
                phase: selection.phase,
                target,
            };
            execute_budget(&args, &mut out)?
        }

        Commands::Compare {
            file_a,
            file_b,
            n,
            json,
        } => {
            let args = CompareArgs {
                baseline: file_a,
                target: file_b,
                top_n: n,
                json,
            };
            execute_compare(&args, &config, &mut out)?;
            BudgetVerdict::WithinBudget
        }

        Commands::Report {
            selection,
            n,
            target,
            json,
        } => {
            let args = ReportArgs {
                dir: selection.dir,
                phase: selection.phase,
                target,
                top_n: n,
                json,
            };
            execute_report(&args, &config, &mut out)?
        }
    };

    Ok(match verdict {
        BudgetVerdict::WithinBudget => ExitCode::SUCCESS,
        BudgetVerdict::OverBudget => ExitCode::from(1),
    })
}

fn view_args(selection: Selection, top_n: usize) -> ViewArgs {
    ViewArgs {
        dir: selection.dir,
        phase: selection.phase,
        top_n,
    }
}
