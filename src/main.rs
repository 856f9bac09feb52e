//! Retirement Planner CLI
//!
//! Runs a single household projection, prints the leading years and a run
//! summary to the console, and writes the full table to CSV.

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use retirement_planner::{
    export, PlanConfig, PlannerEngine, PlannerInputs, Schedules,
};

#[derive(Parser, Debug)]
#[command(name = "retirement_planner", about = "Multi-year retirement cashflow projection")]
struct Args {
    /// First simulated calendar year
    #[arg(long, default_value_t = 2025)]
    start_year: i32,

    /// Age attained during the first simulated year
    #[arg(long, default_value_t = 71)]
    start_age: u8,

    /// Starting traditional (pre-tax) balance
    #[arg(long, default_value_t = 1_000_000.0)]
    trad_balance: f64,

    /// Starting Roth balance
    #[arg(long, default_value_t = 100_000.0)]
    roth_balance: f64,

    /// Number of years to simulate
    #[arg(long, default_value_t = 17)]
    years: u32,

    /// JSON scenario file overriding all inputs (sparse fields allowed)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// CSV of caller-directed moves: year,roth_conversion,extra_trad_distribution
    #[arg(long)]
    moves: Option<PathBuf>,

    /// Directory of CSV schedule overrides (tax, IRMAA, RMD divisors)
    #[arg(long)]
    schedules: Option<PathBuf>,

    /// Output CSV path for the full projection
    #[arg(long, default_value = "plan_output.csv")]
    output: PathBuf,
}

/// Load the year-indexed conversion/distribution maps from CSV
fn load_moves(path: &PathBuf) -> anyhow::Result<(HashMap<i32, f64>, HashMap<i32, f64>)> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut conversions = HashMap::new();
    let mut distributions = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let year: i32 = record[0].trim().parse()?;
        let conversion: f64 = record[1].trim().parse()?;
        let distribution: f64 = record[2].trim().parse()?;
        if conversion != 0.0 {
            conversions.insert(year, conversion);
        }
        if distribution != 0.0 {
            distributions.insert(year, distribution);
        }
    }

    Ok((conversions, distributions))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let inputs = match &args.scenario {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(file)
                .with_context(|| format!("parsing scenario {}", path.display()))?
        }
        None => {
            let mut inputs =
                PlannerInputs::new(args.start_year, args.start_age, args.trad_balance);
            inputs.start_roth_ira = args.roth_balance;
            inputs
        }
    };

    let (roth_conversions, extra_trad_distributions) = match &args.moves {
        Some(path) => load_moves(path)?,
        None => (HashMap::new(), HashMap::new()),
    };

    let schedules = match &args.schedules {
        Some(path) => Schedules::from_csv_path(path)
            .with_context(|| format!("loading schedules from {}", path.display()))?,
        None => Schedules::default_federal(),
    };

    let config = PlanConfig {
        years: args.years,
        roth_conversions,
        extra_trad_distributions,
        include_senior_deduction: true,
    };

    log::info!(
        "simulating {} years from {} (age {})",
        config.years,
        inputs.start_year,
        inputs.start_age
    );

    let engine = PlannerEngine::new(schedules, config);
    let result = engine.simulate(&inputs)?;

    println!("Retirement Planner v0.1.0");
    println!("=========================\n");
    println!(
        "{:>5} {:>4} {:>14} {:>13} {:>11} {:>12} {:>10} {:>9} {:>12} {:>11}",
        "Year", "Age", "Trad IRA", "Roth IRA", "RMD", "AGI", "Tax", "IRMAA", "Expenses", "FromRoth"
    );
    println!("{}", "-".repeat(110));

    for row in result.rows.iter().take(10) {
        println!(
            "{:>5} {:>4} {:>14.2} {:>13.2} {:>11.2} {:>12.2} {:>10.2} {:>9.2} {:>12.2} {:>11.2}",
            row.year,
            row.age,
            row.trad_ira,
            row.roth_ira,
            row.rmd,
            row.agi,
            row.tax,
            row.irmaa_annual,
            row.living_expenses,
            row.amt_from_roth,
        );
    }

    if result.rows.len() > 10 {
        println!("... ({} more years)", result.rows.len() - 10);
    }

    export::write_csv_path(&result.rows, &args.output)?;
    println!("\nFull results written to: {}", args.output.display());

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Years Simulated: {}", summary.total_years);
    println!("  Total Tax: ${:.2}", summary.total_tax);
    println!("  Total IRMAA: ${:.2}", summary.total_irmaa);
    println!("  Total RMDs: ${:.2}", summary.total_rmd);
    println!("  Total Roth Conversions: ${:.2}", summary.total_conversions);
    println!("  Total Roth Shortfall Draws: ${:.2}", summary.total_roth_draws);
    println!("  Final Traditional Balance: ${:.2}", summary.final_trad_ira);
    println!("  Final Roth Balance: ${:.2}", summary.final_roth_ira);

    Ok(())
}
