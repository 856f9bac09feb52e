//! Progressive income tax brackets and marginal tax computation
//!
//! All amounts are in nominal dollars for the tax year being computed.
//! Inflation adjustment of bracket thresholds, if any, is the caller's job.

use serde::{Deserialize, Serialize};

/// One ordinary-income tax bracket
///
/// A well-formed schedule is ascending by `lower`, contiguous (each `lower`
/// equals the prior bracket's `upper`), with exactly one unbounded bracket
/// in last position. The calculator does not validate this; an unsorted or
/// gapped schedule yields undefined results.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket (inclusive)
    pub lower: f64,

    /// Upper bound of the bracket; `None` means unbounded
    pub upper: Option<f64>,

    /// Marginal rate applied within the bracket (e.g. 0.22 for 22%)
    pub rate: f64,
}

impl TaxBracket {
    pub fn new(lower: f64, upper: Option<f64>, rate: f64) -> Self {
        Self { lower, upper, rate }
    }
}

/// Compute tax owed under progressive marginal brackets.
///
/// Income at or below zero owes exactly zero. Otherwise each bracket taxes
/// `min(taxable_income, upper) - lower` at its rate; iteration stops at the
/// first bracket whose lower bound the income does not exceed. No dollar is
/// taxed twice and no dollar above `taxable_income` is taxed.
pub fn compute_tax(taxable_income: f64, brackets: &[TaxBracket]) -> f64 {
    if taxable_income <= 0.0 {
        return 0.0;
    }

    let mut tax = 0.0;
    for bracket in brackets {
        if taxable_income <= bracket.lower {
            break;
        }
        let upper = bracket.upper.unwrap_or(f64::INFINITY);
        let amount_in_bracket = taxable_income.min(upper) - bracket.lower;
        if amount_in_bracket > 0.0 {
            tax += amount_in_bracket * bracket.rate;
        }
    }
    tax
}

/// Default single-filer ordinary income brackets for tax year 2025
pub fn default_tax_brackets() -> Vec<TaxBracket> {
    vec![
        TaxBracket::new(0.0, Some(11_925.0), 0.10),
        TaxBracket::new(11_925.0, Some(48_475.0), 0.12),
        TaxBracket::new(48_475.0, Some(103_350.0), 0.22),
        TaxBracket::new(103_350.0, Some(197_300.0), 0.24),
        TaxBracket::new(197_300.0, Some(250_000.0), 0.32),
        TaxBracket::new(250_000.0, Some(500_000.0), 0.35),
        TaxBracket::new(500_000.0, None, 0.37),
    ]
}
