//! Dispatching rules and rule engine for process selection.
//!
//! Provides the priority rules a non-preemptive engine uses at each
//! decision point, and a rule engine that applies them with an explicit,
//! deterministic tie-breaking strategy.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{DispatchContext, RuleEngine};
//! use u_cpusched::dispatching::rules;
//! use u_cpusched::models::ProcessSet;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ResponseRatio)
//!     .with_tie_breaker(rules::ArrivalOrder);
//!
//! let set = ProcessSet::from_pairs(&[(1.0, 3.0), (2.0, 1.0)]);
//! let context = DispatchContext::at_time(4.0);
//! assert_eq!(engine.select_best(set.as_slice(), &[0, 1], &context), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Brinch Hansen (1971), "Short-term scheduling in multiprogramming systems"

mod context;
mod engine;
pub mod rules;

pub use context::DispatchContext;
pub use engine::{RuleEngine, TieBreaker};

use crate::models::ProcessRecord;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = f64;

/// A dispatching rule that evaluates process priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that maximize a quantity
/// (such as the response ratio) return its negation.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "HRRN", "ARRIVAL").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a process at the current decision point.
    fn evaluate(&self, process: &ProcessRecord, context: &DispatchContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
