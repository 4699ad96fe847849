use serde::{Deserialize, Serialize};

use super::RunMetrics;
use crate::models::{Algorithm, ProcessSet};

/// A contiguous stretch of CPU time held by one process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSlice {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

impl ExecutionSlice {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// The completed result of one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub algorithm: Algorithm,
    /// Every process, finished and annotated, in reporting order
    /// (dispatch order for HRRN, arrival order for RR).
    pub processes: ProcessSet,
    /// CPU timeline in chronological order.
    pub slices: Vec<ExecutionSlice>,
    pub metrics: RunMetrics,
}

impl RunOutcome {
    /// Process indices in order of first dispatch.
    pub fn dispatch_order(&self) -> Vec<usize> {
        let mut seen = Vec::with_capacity(self.processes.len());
        for slice in &self.slices {
            if !seen.contains(&slice.index) {
                seen.push(slice.index);
            }
        }
        seen
    }

    /// Total time the CPU was busy.
    pub fn busy_time(&self) -> f64 {
        self.slices.iter().map(ExecutionSlice::duration).sum()
    }

    /// Time the CPU sat idle between the first dispatch and the last finish.
    pub fn idle_time(&self) -> f64 {
        let Some(first) = self.slices.first() else {
            return 0.0;
        };
        self.processes.makespan() - first.start - self.busy_time()
    }
}
