use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheduling discipline label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Highest Response Ratio Next (non-preemptive).
    #[serde(rename = "HRRN")]
    Hrrn,
    /// Round Robin (preemptive, fixed quantum).
    #[serde(rename = "RR")]
    Rr,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Hrrn => write!(f, "HRRN"),
            Algorithm::Rr => write!(f, "RR"),
        }
    }
}
