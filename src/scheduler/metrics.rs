//! Run quality metrics.
//!
//! Reduces a completed run to per-algorithm averages and keeps the latest
//! result for each algorithm so runs can be compared side by side.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | mean(finish - arrival) |
//! | Avg Weighted Turnaround | mean(turnaround / service) |
//! | Avg Wait | mean(turnaround - service) |
//! | Makespan | Latest finish time |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Algorithm, ProcessSet};

/// Averages of one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub algorithm: Algorithm,
    pub process_count: usize,
    pub avg_turnaround_time: f64,
    pub avg_weighted_turnaround_time: f64,
    pub avg_wait_time: f64,
    /// Latest finish time.
    pub makespan: f64,
}

impl RunMetrics {
    /// Computes averages over every process in `processes`.
    ///
    /// An empty set yields zeros.
    pub fn calculate(algorithm: Algorithm, processes: &ProcessSet) -> Self {
        let n = processes.len();
        let mut total_turnaround = 0.0;
        let mut total_weighted = 0.0;
        let mut total_wait = 0.0;

        for p in processes {
            total_turnaround += p.turnaround_time;
            total_weighted += p.weighted_turnaround_time;
            total_wait += p.wait_time;
        }

        let mean = |total: f64| if n == 0 { 0.0 } else { total / n as f64 };

        Self {
            algorithm,
            process_count: n,
            avg_turnaround_time: mean(total_turnaround),
            avg_weighted_turnaround_time: mean(total_weighted),
            avg_wait_time: mean(total_wait),
            makespan: processes.makespan(),
        }
    }
}

/// Latest run metrics, keyed by algorithm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsAggregator {
    runs: BTreeMap<Algorithm, RunMetrics>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes metrics for a completed set and stores them under
    /// `algorithm`, replacing any earlier run of the same algorithm.
    pub fn aggregate(&mut self, algorithm: Algorithm, processes: &ProcessSet) -> RunMetrics {
        let metrics = RunMetrics::calculate(algorithm, processes);
        self.record(metrics);
        metrics
    }

    /// Stores already computed metrics.
    pub fn record(&mut self, metrics: RunMetrics) {
        self.runs.insert(metrics.algorithm, metrics);
    }

    pub fn get(&self, algorithm: Algorithm) -> Option<&RunMetrics> {
        self.runs.get(&algorithm)
    }

    /// Stored metrics in algorithm order (HRRN, RR).
    pub fn iter(&self) -> impl Iterator<Item = &RunMetrics> {
        self.runs.values()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
