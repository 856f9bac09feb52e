//! Tax, IRMAA, and RMD schedules used by the planner

mod irmaa;
mod rmd;
mod tax;
pub mod loader;

pub use irmaa::{default_irmaa_brackets, surcharge_for_magi, IrmaaBracket};
pub use rmd::UniformLifetimeTable;
pub use tax::{compute_tax, default_tax_brackets, TaxBracket};

use std::path::Path;

use crate::error::PlannerError;

/// Container for all lookup schedules a simulation run needs
#[derive(Debug, Clone)]
pub struct Schedules {
    pub tax: Vec<TaxBracket>,
    pub irmaa: Vec<IrmaaBracket>,
    pub rmd: UniformLifetimeTable,
}

impl Schedules {
    /// Built-in US federal schedules for a recent tax year
    pub fn default_federal() -> Self {
        Self {
            tax: default_tax_brackets(),
            irmaa: default_irmaa_brackets(),
            rmd: UniformLifetimeTable::default(),
        }
    }

    /// Load all schedules from CSV files in the default location
    pub fn from_csv() -> Result<Self, PlannerError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_SCHEDULES_PATH))
    }

    /// Load all schedules from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, PlannerError> {
        Ok(Self {
            tax: loader::load_tax_brackets(path)?,
            irmaa: loader::load_irmaa_brackets(path)?,
            rmd: UniformLifetimeTable::from_loaded(&loader::load_rmd_divisors(path)?),
        })
    }
}

impl Default for Schedules {
    fn default() -> Self {
        Self::default_federal()
    }
}
