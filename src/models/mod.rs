//! Process domain models.
//!
//! Provides the data types a scheduling run reads and annotates.
//!
//! # Domain Mappings
//!
//! | u-cpusched | OS textbook | Batch system |
//! |------------|-------------|--------------|
//! | ProcessRecord | PCB | Job |
//! | ProcessSet | Process table | Job batch |
//! | Algorithm | Scheduling discipline | Dispatch policy |

mod algorithm;
mod process;
mod process_set;

pub use algorithm::Algorithm;
pub use process::{ProcessRecord, ProcessStatus};
pub use process_set::ProcessSet;
