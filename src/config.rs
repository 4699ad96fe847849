use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::SimulationError;
use crate::scheduler::HrrnTieBreak;
use crate::validation::validate_quantum;

/// Simulation settings.
///
/// Read from a JSON file (`config.json` by convention); every field is
/// optional and falls back to its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Round Robin time quantum, in ticks.
    pub quantum: u64,
    /// HRRN rule for equal response ratios.
    pub tie_break: HrrnTieBreak,
    /// Print per-tick / per-window traces.
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: 2,
            tie_break: HrrnTieBreak::EarliestArrival,
            verbose: false,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, SimulationError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimulationError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file. A missing file yields the default config; a
    /// malformed one is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(contents) => Self::from_json_str(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        validate_quantum(self.quantum)?;
        Ok(())
    }
}
