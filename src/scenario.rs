//! Scenario runner for batch simulations
//!
//! Pre-builds the lookup schedules once, then runs many simulations with
//! different inputs or configs without re-reading CSV files. Individual runs
//! are strictly sequential internally, but independent scenarios share no
//! mutable state and run in parallel.

use rayon::prelude::*;

use crate::error::PlannerError;
use crate::planner::{PlanConfig, PlanResult, PlannerEngine, PlannerInputs};
use crate::schedules::Schedules;

/// Pre-loaded scenario runner for batch projections
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Shared schedules for every run
    base_schedules: Schedules,
}

impl ScenarioRunner {
    /// Create runner with the built-in federal schedules
    pub fn new() -> Self {
        Self {
            base_schedules: Schedules::default_federal(),
        }
    }

    /// Create runner by loading schedules from CSV files
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, PlannerError> {
        log::info!("loading schedules from {}", path.display());
        Ok(Self {
            base_schedules: Schedules::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built schedules
    pub fn with_schedules(schedules: Schedules) -> Self {
        Self {
            base_schedules: schedules,
        }
    }

    /// Run a single simulation with the given config
    pub fn run(
        &self,
        inputs: &PlannerInputs,
        config: PlanConfig,
    ) -> Result<PlanResult, PlannerError> {
        let engine = PlannerEngine::new(self.base_schedules.clone(), config);
        engine.simulate(inputs)
    }

    /// Run simulations for multiple households with the same config, in parallel
    pub fn run_batch(
        &self,
        inputs_set: &[PlannerInputs],
        config: &PlanConfig,
    ) -> Result<Vec<PlanResult>, PlannerError> {
        log::debug!("running batch of {} scenarios", inputs_set.len());
        inputs_set
            .par_iter()
            .map(|inputs| {
                let engine = PlannerEngine::new(self.base_schedules.clone(), config.clone());
                engine.simulate(inputs)
            })
            .collect()
    }

    /// Run multiple configs (e.g. competing conversion plans) for one household
    pub fn run_scenarios(
        &self,
        inputs: &PlannerInputs,
        configs: &[PlanConfig],
    ) -> Result<Vec<PlanResult>, PlannerError> {
        configs
            .par_iter()
            .map(|config| {
                let engine = PlannerEngine::new(self.base_schedules.clone(), config.clone());
                engine.simulate(inputs)
            })
            .collect()
    }

    /// Get reference to the shared schedules
    pub fn schedules(&self) -> &Schedules {
        &self.base_schedules
    }

    /// Get mutable reference to the shared schedules for customization
    pub fn schedules_mut(&mut self) -> &mut Schedules {
        &mut self.base_schedules
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
