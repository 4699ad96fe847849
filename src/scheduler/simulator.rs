//! Per-run facade over both engines.

use tracing::warn;

use super::{HrrnEngine, MetricsAggregator, RrEngine, RunOutcome};
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::models::{Algorithm, ProcessSet};
use crate::trace::TraceSink;

/// Holds the original input and the metrics of past runs.
///
/// Every run works on its own fresh copy of the input, so running HRRN
/// and RR in any order, any number of times, gives the same results.
///
/// # Example
///
/// ```
/// use u_cpusched::config::SimulationConfig;
/// use u_cpusched::models::{Algorithm, ProcessSet};
/// use u_cpusched::scheduler::Simulator;
///
/// let input = ProcessSet::from_pairs(&[(0.0, 4.0), (1.0, 3.0), (2.0, 1.0)]);
/// let mut sim = Simulator::new(input, SimulationConfig::default());
/// sim.run(Algorithm::Hrrn, &mut ()).unwrap();
/// sim.run(Algorithm::Rr, &mut ()).unwrap();
/// assert_eq!(sim.metrics().iter().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    input: ProcessSet,
    config: SimulationConfig,
    metrics: MetricsAggregator,
}

impl Simulator {
    pub fn new(input: ProcessSet, config: SimulationConfig) -> Self {
        Self {
            input,
            config,
            metrics: MetricsAggregator::new(),
        }
    }

    /// The original, unsorted input.
    pub fn input(&self) -> &ProcessSet {
        &self.input
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsAggregator {
        &self.metrics
    }

    /// Runs `algorithm` with the configured parameters.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        sink: &mut dyn TraceSink,
    ) -> Result<RunOutcome, SimulationError> {
        match algorithm {
            Algorithm::Hrrn => self.run_hrrn(sink),
            Algorithm::Rr => self.run_rr(self.config.quantum, sink),
        }
    }

    pub fn run_hrrn(&mut self, sink: &mut dyn TraceSink) -> Result<RunOutcome, SimulationError> {
        let outcome = HrrnEngine::with_tie_break(self.config.tie_break).run(&self.input, sink);
        self.finish(outcome)
    }

    /// Runs Round Robin with an explicit quantum, overriding the config.
    pub fn run_rr(
        &mut self,
        quantum: u64,
        sink: &mut dyn TraceSink,
    ) -> Result<RunOutcome, SimulationError> {
        let outcome = RrEngine::new(quantum).run(&self.input, sink);
        self.finish(outcome)
    }

    fn finish(
        &mut self,
        outcome: Result<RunOutcome, SimulationError>,
    ) -> Result<RunOutcome, SimulationError> {
        match outcome {
            Ok(outcome) => {
                self.metrics.record(outcome.metrics);
                Ok(outcome)
            }
            Err(e) => {
                warn!(error = %e, "run refused");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulator {
        Simulator::new(
            ProcessSet::from_pairs(&[(0.0, 4.0), (1.0, 3.0), (2.0, 1.0), (3.0, 2.0)]),
            SimulationConfig::default(),
        )
    }

    #[test]
    fn test_runs_are_isolated() {
        let mut s = sim();
        let hrrn_first = s.run(Algorithm::Hrrn, &mut ()).unwrap();
        let rr = s.run(Algorithm::Rr, &mut ()).unwrap();
        let hrrn_again = s.run(Algorithm::Hrrn, &mut ()).unwrap();
        let rr_again = s.run(Algorithm::Rr, &mut ()).unwrap();

        assert_eq!(hrrn_first, hrrn_again);
        assert_eq!(rr, rr_again);
        // Input untouched
        assert_eq!(s.input().indices(), vec![1, 2, 3, 4]);
        assert!(s.input().iter().all(|p| p.finish_time.is_none()));
    }

    #[test]
    fn test_metrics_stored_per_algorithm() {
        let mut s = sim();
        let hrrn = s.run_hrrn(&mut ()).unwrap();
        let rr = s.run_rr(1, &mut ()).unwrap();

        assert_eq!(s.metrics().get(Algorithm::Hrrn), Some(&hrrn.metrics));
        assert_eq!(s.metrics().get(Algorithm::Rr), Some(&rr.metrics));
    }

    #[test]
    fn test_refused_run_keeps_previous_metrics() {
        let mut s = sim();
        s.run_rr(2, &mut ()).unwrap();
        let before = *s.metrics().get(Algorithm::Rr).unwrap();

        assert!(s.run_rr(0, &mut ()).is_err());
        assert_eq!(s.metrics().get(Algorithm::Rr), Some(&before));
    }

    #[test]
    fn test_invalid_input_refused() {
        let mut s = Simulator::new(
            ProcessSet::from_pairs(&[(0.0, 1.0), (1.0, -2.0)]),
            SimulationConfig::default(),
        );
        assert!(s.run(Algorithm::Hrrn, &mut ()).is_err());
        assert!(s.run(Algorithm::Rr, &mut ()).is_err());
        assert!(s.metrics().is_empty());
    }
}
