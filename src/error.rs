//! Error types for schedule loading, input validation, and export

use thiserror::Error;

/// Errors surfaced by the planner library.
///
/// The simulation loop itself is total over well-formed configuration; only
/// the boundaries (input validation, CSV schedule loading, export) can fail.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Scenario configuration rejected at validation
    #[error("invalid planner input: {0}")]
    InvalidInput(String),

    /// File I/O failure while loading schedules or writing output
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write failure
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Non-numeric value in a schedule file
    #[error("invalid number in schedule file: {0}")]
    ParseFloat(#[from] std::num::ParseFloatError),

    /// Non-integer age in a schedule file
    #[error("invalid age in schedule file: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
}
