//! Scheduling engines and run metrics.
//!
//! Provides the two simulated disciplines and the bookkeeping around them.
//!
//! # Algorithms
//!
//! - `HrrnEngine`: non-preemptive Highest Response Ratio Next.
//! - `RrEngine`: preemptive Round Robin with a fixed quantum over unit ticks.
//!
//! Both consume a fresh, arrival-sorted copy of the input and return a
//! fully annotated `RunOutcome`; neither touches the caller's set.
//!
//! # Metrics
//!
//! `RunMetrics` reduces a run to mean turnaround, weighted turnaround and
//! wait; `MetricsAggregator` keeps the latest averages per algorithm.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod hrrn;
mod metrics;
mod outcome;
mod rr;
mod simulator;

#[cfg(test)]
mod properties;

pub use hrrn::{HrrnEngine, HrrnTieBreak};
pub use metrics::{MetricsAggregator, RunMetrics};
pub use outcome::{ExecutionSlice, RunOutcome};
pub use rr::{ReadyQueue, RrEngine};
pub use simulator::Simulator;
