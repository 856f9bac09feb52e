//! CSV-based schedule loader
//!
//! Loads bracket tables and RMD divisors from CSV files so callers can swap
//! in a different tax year or filing status without touching code.
//!
//! Expected files in the schedules directory:
//! - `tax_brackets.csv`: lower,upper,rate (empty upper = unbounded)
//! - `irmaa_brackets.csv`: lower,upper,monthly_surcharge (empty upper = unbounded)
//! - `rmd_divisors.csv`: age,divisor

use std::fs::File;
use std::path::Path;

use crate::error::PlannerError;
use crate::schedules::irmaa::IrmaaBracket;
use crate::schedules::tax::TaxBracket;

/// Default path to the schedules directory
pub const DEFAULT_SCHEDULES_PATH: &str = "data/schedules";

/// Parse an optional upper bound; empty or "inf" means unbounded
fn parse_upper(field: &str) -> Result<Option<f64>, PlannerError> {
    let trimmed = field.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("inf") {
        return Ok(None);
    }
    Ok(Some(trimmed.parse()?))
}

/// Load tax brackets from CSV, in file order
pub fn load_tax_brackets(path: &Path) -> Result<Vec<TaxBracket>, PlannerError> {
    let file = File::open(path.join("tax_brackets.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut brackets = Vec::new();

    for result in reader.records() {
        let record = result?;
        let lower: f64 = record[0].trim().parse()?;
        let upper = parse_upper(&record[1])?;
        let rate: f64 = record[2].trim().parse()?;
        brackets.push(TaxBracket::new(lower, upper, rate));
    }

    log::debug!("loaded {} tax brackets", brackets.len());
    Ok(brackets)
}

/// Load IRMAA brackets from CSV, in file order
pub fn load_irmaa_brackets(path: &Path) -> Result<Vec<IrmaaBracket>, PlannerError> {
    let file = File::open(path.join("irmaa_brackets.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut brackets = Vec::new();

    for result in reader.records() {
        let record = result?;
        let lower: f64 = record[0].trim().parse()?;
        let upper = parse_upper(&record[1])?;
        let monthly: f64 = record[2].trim().parse()?;
        brackets.push(IrmaaBracket::new(lower, upper, monthly));
    }

    log::debug!("loaded {} IRMAA brackets", brackets.len());
    Ok(brackets)
}

/// Load RMD divisors from CSV
/// Returns Vec<(age, divisor)> in file order
pub fn load_rmd_divisors(path: &Path) -> Result<Vec<(u8, f64)>, PlannerError> {
    let file = File::open(path.join("rmd_divisors.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut divisors = Vec::new();

    for result in reader.records() {
        let record = result?;
        let age: u8 = record[0].trim().parse()?;
        let divisor: f64 = record[1].trim().parse()?;
        divisors.push((age, divisor));
    }

    log::debug!("loaded {} RMD divisors", divisors.len());
    Ok(divisors)
}
