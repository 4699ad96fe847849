//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules in sequence and resolves remaining ties
//! with an explicit strategy, so selection is always deterministic.

use std::sync::Arc;

use super::{DispatchContext, DispatchingRule, RuleScore};
use crate::models::ProcessRecord;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// The first candidate in scan order wins (default).
    #[default]
    FirstScanned,
    /// The last candidate in scan order wins.
    LastScanned,
}

/// A composable rule engine for process selection.
///
/// Rules are applied in order; a later rule is consulted only when all
/// earlier rules tie within `epsilon`.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::RuleEngine;
/// use u_cpusched::dispatching::rules;
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::ResponseRatio)
///     .with_tie_breaker(rules::ArrivalOrder);
/// assert_eq!(engine.rule_names(), vec!["HRRN", "ARRIVAL"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::FirstScanned,
            epsilon: 1e-9,
        }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a tie-breaking rule, consulted after the rules before it.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Evaluates a single process and returns scores from each rule.
    pub fn evaluate(&self, process: &ProcessRecord, context: &DispatchContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(process, context))
            .collect()
    }

    /// Returns the position (into `processes`) of the best candidate.
    ///
    /// `candidates` are positions into `processes`, scanned in the given
    /// order. Returns `None` when there are no candidates.
    pub fn select_best(
        &self,
        processes: &[ProcessRecord],
        candidates: &[usize],
        context: &DispatchContext,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;

        for &pos in candidates {
            let Some(incumbent) = best else {
                best = Some(pos);
                continue;
            };

            match self.compare(&processes[pos], &processes[incumbent], context) {
                std::cmp::Ordering::Less => best = Some(pos),
                std::cmp::Ordering::Equal if self.tie_breaker == TieBreaker::LastScanned => {
                    best = Some(pos)
                }
                _ => {}
            }
        }

        best
    }

    fn compare(
        &self,
        a: &ProcessRecord,
        b: &ProcessRecord,
        context: &DispatchContext,
    ) -> std::cmp::Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal);
            }
        }
        std::cmp::Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}
