//! Year-by-year retirement cashflow simulation

mod engine;
mod inputs;
mod rows;

pub use engine::{PlanConfig, PlannerEngine};
pub use inputs::PlannerInputs;
pub use rows::{PlanResult, PlanSummary, PlannerRow};
