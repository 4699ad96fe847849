//! CPU scheduling simulator.
//!
//! Simulates two classic disciplines over a fixed batch of processes,
//! each described by an arrival time and a service time, and derives
//! per-process timing metrics and run averages so the two can be compared
//! on the same workload.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `ProcessRecord`, `ProcessStatus`,
//!   `ProcessSet`, `Algorithm`
//! - **`validation`**: Input checks (service time, arrival time, quantum)
//! - **`dispatching`**: Selection rules and the rule engine used by HRRN
//! - **`scheduler`**: `HrrnEngine`, `RrEngine`, `RunMetrics`,
//!   `MetricsAggregator`, `Simulator`
//! - **`trace`**: Observational per-tick / per-window events
//! - **`config`**, **`input`**, **`report`**, **`workload`**: Settings, text
//!   input, text tables, synthetic workloads
//!
//! # Architecture
//!
//! The engines are pure over `(input, parameters) → (schedule, metrics)`.
//! All per-run state (clock, quantum, ready queue) lives inside the run;
//! printing happens only through a `TraceSink` or the `report` functions.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod input;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod trace;
pub mod validation;
pub mod workload;

pub use error::SimulationError;
