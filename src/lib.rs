//! Retirement Planner - Multi-year household retirement cashflow projection
//!
//! This library provides:
//! - A year-by-year simulation of traditional/Roth balances, RMDs,
//!   conversions, and expense-driven Roth drawdowns
//! - Progressive income tax and Medicare IRMAA surcharge calculators over
//!   configurable bracket schedules
//! - The IRS Uniform Lifetime RMD divisor table with extrapolation for
//!   very old ages
//! - CSV schedule overrides, CSV result export, and a batch scenario runner
//!
//! The simulation core performs no I/O and is deterministic: identical
//! inputs always produce identical row sequences.

pub mod error;
pub mod export;
pub mod planner;
pub mod scenario;
pub mod schedules;

// Re-export commonly used types
pub use error::PlannerError;
pub use planner::{PlanConfig, PlanResult, PlanSummary, PlannerEngine, PlannerInputs, PlannerRow};
pub use scenario::ScenarioRunner;
pub use schedules::{
    compute_tax, surcharge_for_magi, IrmaaBracket, Schedules, TaxBracket, UniformLifetimeTable,
};
