//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod budget;
pub mod compare;
pub mod models;
pub mod report;

// Re-export main command functions
pub use analyze::{execute_churn, execute_hotspots, execute_peak, execute_summary};
pub use budget::execute_budget;
pub use compare::execute_compare;
pub use models::{BudgetArgs, CompareArgs, ReportArgs, ViewArgs};
pub use report::execute_report;
