//! Highest Response Ratio Next scheduler.
//!
//! # Algorithm
//!
//! 1. Sort processes by arrival; the earliest one is dispatched first.
//! 2. At each decision point, compute the response ratio of every
//!    arrived, undispatched process and dispatch the highest.
//! 3. Advance the clock by the dispatched service time. If nothing has
//!    arrived yet, the CPU idles until the next arrival.
//! 4. Walk the final order once to fix start/finish times and metrics.
//!
//! Non-preemptive: a dispatched process runs to completion.
//!
//! # Complexity
//! O(n²) rule evaluations for n processes.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ExecutionSlice, RunMetrics, RunOutcome};
use crate::dispatching::{rules, DispatchContext, RuleEngine, TieBreaker};
use crate::error::SimulationError;
use crate::models::{Algorithm, ProcessRecord, ProcessSet, ProcessStatus};
use crate::trace::{TraceEvent, TraceSink, WindowSnapshot};
use crate::validation::validate_processes;

/// Rule for choosing among processes with equal response ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HrrnTieBreak {
    /// Earliest arrival wins, then lowest index.
    #[default]
    EarliestArrival,
    /// The last tied candidate in arrival order wins.
    LastScanned,
}

/// Non-preemptive HRRN engine.
///
/// # Example
///
/// ```
/// use u_cpusched::models::ProcessSet;
/// use u_cpusched::scheduler::HrrnEngine;
///
/// let input = ProcessSet::from_pairs(&[(0.0, 4.0), (1.0, 3.0), (2.0, 1.0)]);
/// let outcome = HrrnEngine::new().run(&input, &mut ()).unwrap();
/// assert_eq!(outcome.dispatch_order(), vec![1, 3, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct HrrnEngine {
    tie_break: HrrnTieBreak,
    rules: RuleEngine,
}

impl HrrnEngine {
    /// Creates an engine with the earliest-arrival tie-break.
    pub fn new() -> Self {
        Self::with_tie_break(HrrnTieBreak::EarliestArrival)
    }

    /// Creates an engine with the given tie-break.
    pub fn with_tie_break(tie_break: HrrnTieBreak) -> Self {
        let rules = match tie_break {
            HrrnTieBreak::EarliestArrival => RuleEngine::new()
                .with_rule(rules::ResponseRatio)
                .with_tie_breaker(rules::ArrivalOrder),
            HrrnTieBreak::LastScanned => RuleEngine::new()
                .with_rule(rules::ResponseRatio)
                .with_final_tie_breaker(TieBreaker::LastScanned),
        };
        Self { tie_break, rules }
    }

    pub fn tie_break(&self) -> HrrnTieBreak {
        self.tie_break
    }

    /// Runs HRRN on a fresh copy of `input`.
    ///
    /// # Errors
    /// `SimulationError::InvalidInput` if any process is invalid. Nothing
    /// is scheduled in that case.
    pub fn run(
        &self,
        input: &ProcessSet,
        sink: &mut dyn TraceSink,
    ) -> Result<RunOutcome, SimulationError> {
        validate_processes(input)?;

        let order = self.dispatch_order(input.fresh_copy().sorted_by_arrival().into_vec());
        let (processes, slices) = Self::fix_times(order, sink);
        let metrics = RunMetrics::calculate(Algorithm::Hrrn, &processes);

        info!(
            processes = processes.len(),
            makespan = metrics.makespan,
            avg_turnaround = metrics.avg_turnaround_time,
            "HRRN run complete"
        );

        Ok(RunOutcome {
            algorithm: Algorithm::Hrrn,
            processes,
            slices,
            metrics,
        })
    }

    /// Builds the total dispatch order from an arrival-sorted list.
    fn dispatch_order(&self, mut remaining: Vec<ProcessRecord>) -> Vec<ProcessRecord> {
        let mut order = Vec::with_capacity(remaining.len());
        if remaining.is_empty() {
            return order;
        }

        let first = remaining.remove(0);
        let mut context = DispatchContext::at_time(first.arrival_time + first.service_time);
        order.push(first);

        while !remaining.is_empty() {
            // `remaining` stays arrival-sorted, so its head is the next arrival.
            if !remaining[0].has_arrived(context.clock) {
                debug!(from = context.clock, to = remaining[0].arrival_time, "cpu idle");
                context.idle_until(remaining[0].arrival_time);
            }

            let candidates: Vec<usize> = remaining
                .iter()
                .enumerate()
                .filter(|(_, p)| p.has_arrived(context.clock))
                .map(|(pos, _)| pos)
                .collect();

            for &pos in &candidates {
                let ratio = remaining[pos].response_ratio_at(context.clock);
                remaining[pos].response_ratio = ratio;
            }

            let pos = self
                .rules
                .select_best(&remaining, &candidates, &context)
                .unwrap_or(0);
            let selected = remaining.remove(pos);

            debug!(
                clock = context.clock,
                index = selected.index,
                response_ratio = selected.response_ratio,
                "selected"
            );

            context.advance(selected.service_time);
            order.push(selected);
        }

        order
    }

    /// Derives start/finish times along a fixed order and emits the
    /// per-process trace.
    fn fix_times(
        mut order: Vec<ProcessRecord>,
        sink: &mut dyn TraceSink,
    ) -> (ProcessSet, Vec<ExecutionSlice>) {
        let mut slices = Vec::with_capacity(order.len());
        let mut previous_finish: Option<f64> = None;

        for p in order.iter_mut() {
            let start = previous_finish.map_or(p.arrival_time, |f| f.max(p.arrival_time));
            let finish = start + p.service_time;

            p.start_time = Some(start);
            p.status = ProcessStatus::Running;
            sink.record(TraceEvent::Dispatch {
                time: start,
                index: p.index,
            });

            p.complete_at(finish);
            sink.record(TraceEvent::Finish {
                time: finish,
                index: p.index,
            });

            slices.push(ExecutionSlice {
                index: p.index,
                start,
                end: finish,
            });
            previous_finish = Some(finish);
        }

        for (pos, p) in order.iter().enumerate() {
            let finish = p.finish_time.unwrap_or(p.arrival_time);
            sink.record(TraceEvent::Window(WindowSnapshot {
                index: p.index,
                start_time: p.start_time.unwrap_or(p.arrival_time),
                finish_time: finish,
                ready_queue: order[pos + 1..]
                    .iter()
                    .filter(|q| q.has_arrived(finish))
                    .map(|q| q.index)
                    .collect(),
            }));
        }

        (order.into(), slices)
    }
}

impl Default for HrrnEngine {
    fn default() -> Self {
        Self::new()
    }
}
