//! Per-year output structures for simulation runs

use serde::{Deserialize, Serialize};

/// A single row of planner output for one simulated year.
///
/// All dollar fields are rounded to cents. Balances are end-of-year values
/// after growth, distributions, conversions, and any Roth shortfall draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerRow {
    /// Calendar year
    pub year: i32,

    /// Age attained this year
    pub age: u8,

    /// Ending traditional balance (may be negative if over-distributed)
    pub trad_ira: f64,

    /// Ending Roth balance (may be negative if the shortfall exceeds it)
    pub roth_ira: f64,

    /// Required minimum distribution taken this year
    pub rmd: f64,

    /// Roth conversion taken this year (caller-directed)
    pub roth_conversion: f64,

    /// Extra traditional distribution this year (caller-directed)
    pub extra_trad_dist: f64,

    /// Taxable portion of the benefit income, after inflation
    pub benefit_income: f64,

    /// Adjusted gross income
    pub agi: f64,

    /// Standard deduction for the year
    pub std_deduction: f64,

    /// Senior deduction for the year (zero below age 65 or when disabled)
    pub senior_deduction: f64,

    /// AGI less deductions, floored at zero
    pub taxable_income: f64,

    /// Ordinary income tax owed
    pub tax: f64,

    /// Modified AGI used for the IRMAA lookup
    pub magi: f64,

    /// Annual IRMAA surcharge
    pub irmaa_annual: f64,

    /// Living expenses for the year, inflated and LTC-adjusted
    pub living_expenses: f64,

    /// Amount drawn from Roth to cover an expense shortfall
    pub amt_from_roth: f64,

    /// AGI - tax - IRMAA
    pub net_income: f64,
}

/// Complete result of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// One row per simulated year, in order
    pub rows: Vec<PlannerRow>,
}

impl PlanResult {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Append a year's row
    pub fn add_row(&mut self, row: PlannerRow) {
        self.rows.push(row);
    }

    /// Get summary statistics across the run
    pub fn summary(&self) -> PlanSummary {
        let total_tax: f64 = self.rows.iter().map(|r| r.tax).sum();
        let total_irmaa: f64 = self.rows.iter().map(|r| r.irmaa_annual).sum();
        let total_rmd: f64 = self.rows.iter().map(|r| r.rmd).sum();
        let total_conversions: f64 = self.rows.iter().map(|r| r.roth_conversion).sum();
        let total_roth_draws: f64 = self.rows.iter().map(|r| r.amt_from_roth).sum();

        let final_trad_ira = self.rows.last().map(|r| r.trad_ira).unwrap_or(0.0);
        let final_roth_ira = self.rows.last().map(|r| r.roth_ira).unwrap_or(0.0);

        PlanSummary {
            total_years: self.rows.len() as u32,
            total_tax,
            total_irmaa,
            total_rmd,
            total_conversions,
            total_roth_draws,
            final_trad_ira,
            final_roth_ira,
        }
    }
}

impl Default for PlanResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_years: u32,
    pub total_tax: f64,
    pub total_irmaa: f64,
    pub total_rmd: f64,
    pub total_conversions: f64,
    pub total_roth_draws: f64,
    pub final_trad_ira: f64,
    pub final_roth_ira: f64,
}
