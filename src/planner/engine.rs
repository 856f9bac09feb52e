//! Core simulation engine for annual retirement cashflow projections

use std::collections::HashMap;

use crate::error::PlannerError;
use crate::schedules::{compute_tax, surcharge_for_magi, Schedules};

use super::inputs::PlannerInputs;
use super::rows::{PlanResult, PlannerRow};

/// Configuration for a simulation run
#[derive(Debug, Clone)]
pub struct PlanConfig {
    /// Number of consecutive years to simulate
    pub years: u32,

    /// Roth conversion amount by calendar year; absent year = no conversion.
    /// These are caller-directed moves, never computed by the engine.
    pub roth_conversions: HashMap<i32, f64>,

    /// Extra traditional distribution by calendar year; absent year = none
    pub extra_trad_distributions: HashMap<i32, f64>,

    /// Apply the flat senior deduction from age 65
    pub include_senior_deduction: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            years: 30,
            roth_conversions: HashMap::new(),
            extra_trad_distributions: HashMap::new(),
            include_senior_deduction: true,
        }
    }
}

/// Main planner engine
pub struct PlannerEngine {
    schedules: Schedules,
    config: PlanConfig,
}

/// Round to cents for output rows
fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Age attained at iteration `i`, saturating at the u8 ceiling
fn attained_age(start_age: u8, iteration: u32) -> u8 {
    (start_age as u32 + iteration).min(u8::MAX as u32) as u8
}

impl PlannerEngine {
    /// Create a new engine with given schedules and config
    pub fn new(schedules: Schedules, config: PlanConfig) -> Self {
        Self { schedules, config }
    }

    /// Run the year-by-year simulation for one household.
    ///
    /// Validates the inputs once, then advances the two balances through
    /// `config.years` consecutive years, emitting one row per year. Negative
    /// balances from over-distribution are propagated, not clamped; supplying
    /// a sane distribution schedule is the caller's responsibility.
    pub fn simulate(&self, inputs: &PlannerInputs) -> Result<PlanResult, PlannerError> {
        inputs.validate()?;

        let tax_brackets = inputs.tax_brackets.as_deref().unwrap_or(&self.schedules.tax);
        let irmaa_brackets = inputs
            .irmaa_brackets
            .as_deref()
            .unwrap_or(&self.schedules.irmaa);

        let mut result = PlanResult::new();
        let mut trad = inputs.start_trad_ira;
        let mut roth = inputs.start_roth_ira;

        for i in 0..self.config.years {
            let year = inputs.start_year + i as i32;
            let age = attained_age(inputs.start_age, i);

            let inflation = (1.0 + inputs.inflation_rate).powi(i as i32);

            // Taxable portion of the benefit, inflated from the start year
            let benefit_income = inputs.start_benefit * inflation * inputs.benefit_taxable_factor;

            let trad_growth = trad * inputs.investment_return;
            let roth_growth = roth * inputs.investment_return;

            // RMD is assessed on the pre-growth, pre-distribution balance
            // (spreadsheet-model convention, kept deliberately)
            let rmd = self
                .schedules
                .rmd
                .rmd_amount(age, trad, inputs.rmd_start_age);

            let roth_conversion = self
                .config
                .roth_conversions
                .get(&year)
                .copied()
                .unwrap_or(0.0);
            let extra_trad_dist = self
                .config
                .extra_trad_distributions
                .get(&year)
                .copied()
                .unwrap_or(0.0);

            let trad_next = trad + trad_growth - rmd - roth_conversion - extra_trad_dist;
            // Conversions land in Roth immediately and are taxable this year;
            // the shortfall draw comes off below, after the tax step
            let mut roth_next = roth + roth_growth + roth_conversion;

            let agi =
                (inputs.other_income + benefit_income + rmd + roth_conversion + extra_trad_dist)
                    .max(0.0);
            let std_deduction = inputs.start_standard_deduction
                * (1.0 + inputs.standard_deduction_growth).powi(i as i32);
            let senior_deduction = if self.config.include_senior_deduction && age >= 65 {
                inputs.start_senior_deduction
            } else {
                0.0
            };

            let taxable_income = (agi - std_deduction - senior_deduction).max(0.0);
            let tax = compute_tax(taxable_income, tax_brackets);

            // MAGI approximated as AGI; tax-exempt interest and excluded
            // foreign income are not modeled
            let magi = agi;
            let (_, irmaa_annual) = surcharge_for_magi(magi, irmaa_brackets);

            let net_income = agi - tax - irmaa_annual;

            let mut living_expenses = inputs.start_living_expenses * inflation;
            if let Some(ltc_year) = inputs.ltc_start_year {
                // LTC cost inflates from the simulation start year and
                // applies in every year from its onset onward
                if year >= ltc_year {
                    living_expenses += inputs.ltc_start_cost * inflation;
                }
            }

            // Any expense gap is always funded from Roth, never traditional
            let amt_from_roth = (living_expenses - net_income).max(0.0);
            roth_next -= amt_from_roth;

            let row = PlannerRow {
                year,
                age,
                trad_ira: round_cents(trad_next),
                roth_ira: round_cents(roth_next),
                rmd: round_cents(rmd),
                roth_conversion: round_cents(roth_conversion),
                extra_trad_dist: round_cents(extra_trad_dist),
                benefit_income: round_cents(benefit_income),
                agi: round_cents(agi),
                std_deduction: round_cents(std_deduction),
                senior_deduction: round_cents(senior_deduction),
                taxable_income: round_cents(taxable_income),
                tax: round_cents(tax),
                magi: round_cents(magi),
                irmaa_annual: round_cents(irmaa_annual),
                living_expenses: round_cents(living_expenses),
                amt_from_roth: round_cents(amt_from_roth),
                net_income: round_cents(net_income),
            };

            // Carry the rounded balances so emitted and carried state agree
            // exactly year over year
            trad = row.trad_ira;
            roth = row.roth_ira;
            result.add_row(row);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example_inputs() -> PlannerInputs {
        let mut inputs = PlannerInputs::new(2025, 71, 1_000_000.0);
        inputs.start_roth_ira = 100_000.0;
        inputs
    }

    fn example_config(years: u32) -> PlanConfig {
        PlanConfig {
            years,
            roth_conversions: HashMap::from([(2025, 10_000.0)]),
            extra_trad_distributions: HashMap::from([(2025, 42_500.0)]),
            include_senior_deduction: true,
        }
    }

    #[test]
    fn test_first_year_balances() {
        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(1));
        let result = engine.simulate(&example_inputs()).unwrap();

        assert_eq!(result.rows.len(), 1);
        let row = &result.rows[0];

        assert_eq!(row.year, 2025);
        assert_eq!(row.age, 71);
        // Below RMD start age
        assert_eq!(row.rmd, 0.0);
        assert_relative_eq!(row.roth_conversion, 10_000.0);
        assert_relative_eq!(row.extra_trad_dist, 42_500.0);
        // 1,000,000 * 1.07 - 0 - 10,000 - 42,500
        assert_relative_eq!(row.trad_ira, 1_017_500.0);
    }

    #[test]
    fn test_agi_components() {
        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(1));
        let result = engine.simulate(&example_inputs()).unwrap();
        let row = &result.rows[0];

        // other_income + benefit * factor + conversion + extra distribution
        let expected_agi = 7_000.0 + 40_000.0 * 0.88 + 10_000.0 + 42_500.0;
        assert_relative_eq!(row.agi, expected_agi, epsilon = 0.01);
        assert_relative_eq!(row.magi, row.agi);
        assert_relative_eq!(row.benefit_income, 35_200.0, epsilon = 0.01);

        // Age 71 gets the senior deduction; year 0 deduction is un-grown
        assert_relative_eq!(row.std_deduction, 15_750.0);
        assert_relative_eq!(row.senior_deduction, 4_530.0);
        assert_relative_eq!(
            row.taxable_income,
            expected_agi - 15_750.0 - 4_530.0,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_determinism() {
        let inputs = example_inputs();
        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(17));

        let first = engine.simulate(&inputs).unwrap();
        let second = engine.simulate(&inputs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_balance_continuity() {
        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(17));
        let result = engine.simulate(&example_inputs()).unwrap();

        // The balance a year starts from is exactly the prior row's ending
        // balance. The RMD makes that observable: it is computed from the
        // carried balance, so recomputing it from row i-1's emitted balance
        // must reproduce row i's RMD to the cent.
        for i in 1..result.rows.len() {
            let prev = &result.rows[i - 1];
            let row = &result.rows[i];

            let expected_rmd = round(engine.schedules.rmd.rmd_amount(row.age, prev.trad_ira, 73));
            assert_eq!(row.rmd, expected_rmd, "RMD discontinuity at row {}", i);

            // Full reconstruction from rounded row fields holds to the cent
            let growth = prev.trad_ira * 0.07;
            let expected = prev.trad_ira + growth
                - row.rmd
                - row.roth_conversion
                - row.extra_trad_dist;
            assert!(
                (row.trad_ira - expected).abs() < 0.02,
                "balance discontinuity at row {}: {} vs {}",
                i,
                row.trad_ira,
                expected
            );
        }
    }

    #[test]
    fn test_rmd_starts_at_start_age() {
        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(5));
        let result = engine.simulate(&example_inputs()).unwrap();

        // Ages 71, 72 have no RMD; 73+ do
        assert_eq!(result.rows[0].rmd, 0.0);
        assert_eq!(result.rows[1].rmd, 0.0);
        assert!(result.rows[2].rmd > 0.0);
        assert_eq!(result.rows[2].age, 73);

        // Year 3 RMD = pre-growth balance / 26.5
        let prior_balance = result.rows[1].trad_ira;
        assert_relative_eq!(result.rows[2].rmd, round(prior_balance / 26.5), epsilon = 0.01);
    }

    fn round(amount: f64) -> f64 {
        (amount * 100.0).round() / 100.0
    }

    #[test]
    fn test_absent_override_years_are_zero() {
        let config = PlanConfig {
            years: 3,
            ..Default::default()
        };
        let engine = PlannerEngine::new(Schedules::default_federal(), config);
        let result = engine.simulate(&example_inputs()).unwrap();

        for row in &result.rows {
            assert_eq!(row.roth_conversion, 0.0);
            assert_eq!(row.extra_trad_dist, 0.0);
        }
    }

    #[test]
    fn test_ltc_activation_year() {
        let config = PlanConfig {
            years: 16, // 2025..=2040, LTC starts 2038
            ..Default::default()
        };
        let engine = PlannerEngine::new(Schedules::default_federal(), config);
        let result = engine.simulate(&example_inputs()).unwrap();

        let by_year: HashMap<i32, &PlannerRow> = result.rows.iter().map(|r| (r.year, r)).collect();

        let row_2037 = by_year[&2037];
        let row_2038 = by_year[&2038];
        let row_2039 = by_year[&2039];

        // 2037 expenses are purely inflated living costs
        assert_relative_eq!(
            row_2037.living_expenses,
            round(65_000.0 * 1.03f64.powi(12)),
            epsilon = 0.01
        );

        // 2038 jumps by the LTC cost inflated from the simulation start
        let inflation_13 = 1.03f64.powi(13);
        assert_relative_eq!(
            row_2038.living_expenses,
            round((65_000.0 + 100_000.0) * inflation_13),
            epsilon = 0.01
        );

        // And stays elevated afterwards
        let inflation_14 = 1.03f64.powi(14);
        assert_relative_eq!(
            row_2039.living_expenses,
            round((65_000.0 + 100_000.0) * inflation_14),
            epsilon = 0.01
        );
    }

    #[test]
    fn test_ltc_disabled() {
        let mut inputs = example_inputs();
        inputs.ltc_start_year = None;

        let config = PlanConfig {
            years: 16,
            ..Default::default()
        };
        let engine = PlannerEngine::new(Schedules::default_federal(), config);
        let result = engine.simulate(&inputs).unwrap();

        let row_2038 = result.rows.iter().find(|r| r.year == 2038).unwrap();
        assert_relative_eq!(
            row_2038.living_expenses,
            round(65_000.0 * 1.03f64.powi(13)),
            epsilon = 0.01
        );
    }

    #[test]
    fn test_shortfall_draws_from_roth() {
        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(1));
        let result = engine.simulate(&example_inputs()).unwrap();
        let row = &result.rows[0];

        let shortfall = (row.living_expenses - row.net_income).max(0.0);
        assert_relative_eq!(row.amt_from_roth, round(shortfall), epsilon = 0.01);

        // Roth = growth + conversion - shortfall draw
        let expected_roth = 100_000.0 * 1.07 + 10_000.0 - row.amt_from_roth;
        assert_relative_eq!(row.roth_ira, round(expected_roth), epsilon = 0.01);
    }

    #[test]
    fn test_senior_deduction_age_gate() {
        let mut inputs = example_inputs();
        inputs.start_age = 63;

        let config = PlanConfig {
            years: 3,
            ..Default::default()
        };
        let engine = PlannerEngine::new(Schedules::default_federal(), config);
        let result = engine.simulate(&inputs).unwrap();

        assert_eq!(result.rows[0].senior_deduction, 0.0); // 63
        assert_eq!(result.rows[1].senior_deduction, 0.0); // 64
        assert_relative_eq!(result.rows[2].senior_deduction, 4_530.0); // 65
    }

    #[test]
    fn test_senior_deduction_disabled() {
        let mut config = example_config(1);
        config.include_senior_deduction = false;

        let engine = PlannerEngine::new(Schedules::default_federal(), config);
        let result = engine.simulate(&example_inputs()).unwrap();
        assert_eq!(result.rows[0].senior_deduction, 0.0);
    }

    #[test]
    fn test_negative_balance_propagates() {
        let mut inputs = example_inputs();
        inputs.start_trad_ira = 10_000.0;

        let config = PlanConfig {
            years: 1,
            extra_trad_distributions: HashMap::from([(2025, 50_000.0)]),
            ..Default::default()
        };
        let engine = PlannerEngine::new(Schedules::default_federal(), config);
        let result = engine.simulate(&inputs).unwrap();

        // 10,000 * 1.07 - 50,000 < 0, propagated as-is
        assert!(result.rows[0].trad_ira < 0.0);
    }

    #[test]
    fn test_bracket_overrides_from_inputs() {
        use crate::schedules::{IrmaaBracket, TaxBracket};

        let mut inputs = example_inputs();
        inputs.tax_brackets = Some(vec![TaxBracket::new(0.0, None, 0.0)]);
        inputs.irmaa_brackets = Some(vec![IrmaaBracket::new(0.0, None, 0.0)]);

        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(1));
        let result = engine.simulate(&inputs).unwrap();

        assert_eq!(result.rows[0].tax, 0.0);
        assert_eq!(result.rows[0].irmaa_annual, 0.0);
        assert_relative_eq!(result.rows[0].net_income, result.rows[0].agi);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let mut inputs = example_inputs();
        inputs.inflation_rate = -0.02;

        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(1));
        assert!(engine.simulate(&inputs).is_err());
    }

    #[test]
    fn test_summary_totals() {
        let engine = PlannerEngine::new(Schedules::default_federal(), example_config(17));
        let result = engine.simulate(&example_inputs()).unwrap();
        let summary = result.summary();

        assert_eq!(summary.total_years, 17);
        assert_relative_eq!(summary.total_conversions, 10_000.0);
        assert!(summary.total_rmd > 0.0);
        assert_eq!(summary.final_trad_ira, result.rows.last().unwrap().trad_ira);
    }
}
