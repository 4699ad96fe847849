//! Process (job) model.
//!
//! A process is a unit of CPU work described by when it arrives and how
//! much service it needs. Everything else on the record is bookkeeping
//! written by a scheduling run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a process within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// Not on the CPU (not yet dispatched, or preempted).
    #[default]
    Waiting,
    /// Holding the CPU for the current tick.
    Running,
    /// Service complete. Terminal.
    Finished,
}

impl ProcessStatus {
    /// Numeric code used in tick tables (0 waiting, 1 running, 2 finished).
    pub fn code(self) -> u8 {
        match self {
            ProcessStatus::Waiting => 0,
            ProcessStatus::Running => 1,
            ProcessStatus::Finished => 2,
        }
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Waiting => write!(f, "Waiting"),
            ProcessStatus::Running => write!(f, "Running"),
            ProcessStatus::Finished => write!(f, "Finished"),
        }
    }
}

/// A process descriptor plus the timing fields a run fills in.
///
/// # Time Representation
/// Times are abstract units. HRRN treats them as continuous; RR advances
/// in unit ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Stable identity, assigned at input (1-based by convention).
    pub index: usize,
    /// Moment the process becomes eligible to run.
    pub arrival_time: f64,
    /// Total CPU time required. Must be positive.
    pub service_time: f64,
    /// Service consumed so far (RR only).
    pub runed_time: u64,
    /// Current lifecycle state.
    pub status: ProcessStatus,
    /// First dispatch time. `None` until dispatched.
    pub start_time: Option<f64>,
    /// Completion time. `None` until finished.
    pub finish_time: Option<f64>,
    pub turnaround_time: f64,
    pub weighted_turnaround_time: f64,
    pub wait_time: f64,
    /// HRRN priority at the most recent decision point. Transient.
    pub response_ratio: f64,
}

impl ProcessRecord {
    /// Creates a fresh, never-run process.
    pub fn new(index: usize, arrival_time: f64, service_time: f64) -> Self {
        Self {
            index,
            arrival_time,
            service_time,
            runed_time: 0,
            status: ProcessStatus::Waiting,
            start_time: None,
            finish_time: None,
            turnaround_time: 0.0,
            weighted_turnaround_time: 0.0,
            wait_time: 0.0,
            response_ratio: 0.0,
        }
    }

    /// Re-initializes every mutable field, keeping identity and input times.
    pub fn reset(&mut self) {
        *self = Self::new(self.index, self.arrival_time, self.service_time);
    }

    /// `(clock - arrival + service) / service`.
    ///
    /// Callers guarantee `service_time > 0` through validation.
    pub fn response_ratio_at(&self, clock: f64) -> f64 {
        (clock - self.arrival_time + self.service_time) / self.service_time
    }

    /// Records completion at `finish` and derives turnaround, weighted
    /// turnaround and wait from it.
    pub fn complete_at(&mut self, finish: f64) {
        self.finish_time = Some(finish);
        self.turnaround_time = finish - self.arrival_time;
        self.weighted_turnaround_time = self.turnaround_time / self.service_time;
        self.wait_time = self.turnaround_time - self.service_time;
        self.status = ProcessStatus::Finished;
    }

    /// Whether the process has arrived by `time`.
    pub fn has_arrived(&self, time: f64) -> bool {
        self.arrival_time <= time
    }

    pub fn is_finished(&self) -> bool {
        self.status == ProcessStatus::Finished
    }
}
