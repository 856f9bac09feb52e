//! Scenario configuration for a simulation run

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::schedules::{IrmaaBracket, TaxBracket};

fn default_investment_return() -> f64 {
    0.07
}

fn default_inflation_rate() -> f64 {
    0.03
}

fn default_standard_deduction() -> f64 {
    15_750.0
}

fn default_standard_deduction_growth() -> f64 {
    0.022222222
}

fn default_senior_deduction() -> f64 {
    4_530.0
}

fn default_other_income() -> f64 {
    7_000.0
}

fn default_start_benefit() -> f64 {
    40_000.0
}

fn default_benefit_taxable_factor() -> f64 {
    0.88
}

fn default_living_expenses() -> f64 {
    65_000.0
}

fn default_ltc_start_year() -> Option<i32> {
    Some(2038)
}

fn default_ltc_start_cost() -> f64 {
    100_000.0
}

fn default_rmd_start_age() -> u8 {
    73
}

/// Immutable scenario configuration for one household.
///
/// Constructed once per run, never mutated. All dollar amounts are nominal
/// as of `start_year`; the engine applies inflation internally. Sparse JSON
/// scenario files work because every optional field carries a serde default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerInputs {
    /// First simulated calendar year
    pub start_year: i32,

    /// Age attained during `start_year`
    pub start_age: u8,

    /// Traditional (pre-tax) balance at the start of `start_year`
    pub start_trad_ira: f64,

    /// Roth balance at the start of `start_year`
    #[serde(default)]
    pub start_roth_ira: f64,

    /// Annual investment return applied to both balances
    #[serde(default = "default_investment_return")]
    pub investment_return: f64,

    /// Annual inflation applied to benefits, expenses, and LTC cost
    #[serde(default = "default_inflation_rate")]
    pub inflation_rate: f64,

    /// Standard deduction in `start_year`
    #[serde(default = "default_standard_deduction")]
    pub start_standard_deduction: f64,

    /// Annual growth rate of the standard deduction
    #[serde(default = "default_standard_deduction_growth")]
    pub standard_deduction_growth: f64,

    /// Flat additional deduction from age 65 (not inflated)
    #[serde(default = "default_senior_deduction")]
    pub start_senior_deduction: f64,

    /// Non-benefit taxable income, held constant across years
    #[serde(default = "default_other_income")]
    pub other_income: f64,

    /// Social-Security-equivalent benefit in `start_year`, pre-inflation
    #[serde(default = "default_start_benefit")]
    pub start_benefit: f64,

    /// Fraction of the benefit that is effectively taxable
    #[serde(default = "default_benefit_taxable_factor")]
    pub benefit_taxable_factor: f64,

    /// Living expenses in `start_year`, pre-inflation
    #[serde(default = "default_living_expenses")]
    pub start_living_expenses: f64,

    /// First year long-term-care costs apply; `None` disables LTC
    #[serde(default = "default_ltc_start_year")]
    pub ltc_start_year: Option<i32>,

    /// Annual LTC cost in `start_year` dollars (inflates from `start_year`)
    #[serde(default = "default_ltc_start_cost")]
    pub ltc_start_cost: f64,

    /// Age at which RMDs begin
    #[serde(default = "default_rmd_start_age")]
    pub rmd_start_age: u8,

    /// Override tax brackets; `None` uses the built-in federal schedule
    #[serde(default)]
    pub tax_brackets: Option<Vec<TaxBracket>>,

    /// Override IRMAA brackets; `None` uses the built-in schedule
    #[serde(default)]
    pub irmaa_brackets: Option<Vec<IrmaaBracket>>,
}

impl PlannerInputs {
    /// Create inputs with required fields and documented defaults for the rest
    pub fn new(start_year: i32, start_age: u8, start_trad_ira: f64) -> Self {
        Self {
            start_year,
            start_age,
            start_trad_ira,
            start_roth_ira: 0.0,
            investment_return: default_investment_return(),
            inflation_rate: default_inflation_rate(),
            start_standard_deduction: default_standard_deduction(),
            standard_deduction_growth: default_standard_deduction_growth(),
            start_senior_deduction: default_senior_deduction(),
            other_income: default_other_income(),
            start_benefit: default_start_benefit(),
            benefit_taxable_factor: default_benefit_taxable_factor(),
            start_living_expenses: default_living_expenses(),
            ltc_start_year: default_ltc_start_year(),
            ltc_start_cost: default_ltc_start_cost(),
            rmd_start_age: default_rmd_start_age(),
            tax_brackets: None,
            irmaa_brackets: None,
        }
    }

    /// Reject economically nonsensical configuration.
    ///
    /// Negative balances from over-distribution during the run are allowed
    /// and propagated; this only guards the starting configuration.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.investment_return <= -1.0 {
            return Err(PlannerError::InvalidInput(format!(
                "investment_return must exceed -1.0, got {}",
                self.investment_return
            )));
        }
        if self.inflation_rate < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "inflation_rate must be non-negative, got {}",
                self.inflation_rate
            )));
        }
        if self.standard_deduction_growth < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "standard_deduction_growth must be non-negative, got {}",
                self.standard_deduction_growth
            )));
        }
        if self.benefit_taxable_factor < 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "benefit_taxable_factor must be non-negative, got {}",
                self.benefit_taxable_factor
            )));
        }
        if self.start_trad_ira < 0.0 || self.start_roth_ira < 0.0 {
            return Err(PlannerError::InvalidInput(
                "starting balances must be non-negative".into(),
            ));
        }
        let amounts = [
            ("start_standard_deduction", self.start_standard_deduction),
            ("start_senior_deduction", self.start_senior_deduction),
            ("other_income", self.other_income),
            ("start_benefit", self.start_benefit),
            ("start_living_expenses", self.start_living_expenses),
            ("ltc_start_cost", self.ltc_start_cost),
        ];
        for (name, amount) in amounts {
            if amount < 0.0 {
                return Err(PlannerError::InvalidInput(format!(
                    "{} must be non-negative, got {}",
                    name, amount
                )));
            }
        }
        if self.rmd_start_age == 0 {
            return Err(PlannerError::InvalidInput(
                "rmd_start_age must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let inputs = PlannerInputs::new(2025, 71, 1_000_000.0);

        assert_eq!(inputs.start_roth_ira, 0.0);
        assert!((inputs.investment_return - 0.07).abs() < 1e-12);
        assert!((inputs.inflation_rate - 0.03).abs() < 1e-12);
        assert_eq!(inputs.ltc_start_year, Some(2038));
        assert_eq!(inputs.rmd_start_age, 73);
        assert!(inputs.tax_brackets.is_none());
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_negative_rates() {
        let mut inputs = PlannerInputs::new(2025, 71, 1_000_000.0);
        inputs.inflation_rate = -0.01;
        assert!(inputs.validate().is_err());

        let mut inputs = PlannerInputs::new(2025, 71, 1_000_000.0);
        inputs.investment_return = -1.5;
        assert!(inputs.validate().is_err());

        // A bear-market return assumption is still legal
        let mut inputs = PlannerInputs::new(2025, 71, 1_000_000.0);
        inputs.investment_return = -0.10;
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_negative_amounts() {
        let mut inputs = PlannerInputs::new(2025, 71, -1.0);
        assert!(inputs.validate().is_err());

        inputs = PlannerInputs::new(2025, 71, 1_000_000.0);
        inputs.start_living_expenses = -65_000.0;
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_sparse_json_scenario() {
        let json = r#"{
            "start_year": 2025,
            "start_age": 71,
            "start_trad_ira": 1000000.0,
            "start_roth_ira": 100000.0
        }"#;

        let inputs: PlannerInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.start_year, 2025);
        assert!((inputs.start_roth_ira - 100_000.0).abs() < 1e-9);
        assert!((inputs.start_benefit - 40_000.0).abs() < 1e-9);
        assert_eq!(inputs.ltc_start_year, Some(2038));
    }
}
