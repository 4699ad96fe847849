//! Built-in dispatching rules.
//!
//! # Score Convention
//! All rules return lower scores for higher priority processes.

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::ProcessRecord;

/// Highest Response Ratio Next.
///
/// Response ratio = `(waiting + service) / service`. Favors processes
/// that have waited long relative to their size, so short jobs go early
/// but long jobs cannot starve.
///
/// # Reference
/// Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems".
#[derive(Debug, Clone, Copy)]
pub struct ResponseRatio;

impl DispatchingRule for ResponseRatio {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn evaluate(&self, process: &ProcessRecord, context: &DispatchContext) -> RuleScore {
        -process.response_ratio_at(context.clock)
    }

    fn description(&self) -> &'static str {
        "Highest Response Ratio Next"
    }
}

/// Earliest arrival first.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl DispatchingRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "ARRIVAL"
    }

    fn evaluate(&self, process: &ProcessRecord, _context: &DispatchContext) -> RuleScore {
        process.arrival_time
    }

    fn description(&self) -> &'static str {
        "Earliest Arrival First"
    }
}
