//! Round Robin scheduler.
//!
//! # Algorithm
//!
//! Time advances in unit ticks. A tick covers the slot `[t, t + 1)`; a
//! process may use the slot once `arrival_time <= t`.
//!
//! 1. Admit every process that has arrived into the tail of the ready
//!    queue, in arrival order.
//! 2. If the CPU is free, dispatch the head of the ready queue. With an
//!    empty queue the CPU idles until the whole tick after the next
//!    arrival, in one step.
//! 3. Run the dispatched process for one tick and record the status of
//!    every process, the runner still marked `Running`.
//! 4. On completion it leaves the queue for good. After `quantum`
//!    consecutive ticks without completing it is preempted: processes
//!    that arrived by the end of the tick are admitted first, then the
//!    preempted process goes to the tail.
//!
//! The run ends once every process is finished. Each tick strictly
//! increases some process's `runed_time`, which is bounded by its service
//! time, so the number of busy ticks is exactly the total service.

use std::collections::VecDeque;

use tracing::{debug, info};

use super::{ExecutionSlice, RunMetrics, RunOutcome};
use crate::error::SimulationError;
use crate::models::{Algorithm, ProcessSet, ProcessStatus};
use crate::trace::{TickSnapshot, TraceEvent, TraceSink};
use crate::validation::validate_round_robin;

/// Arrived-and-waiting processes, kept apart from those not yet arrived.
///
/// Holds positions into an arrival-sorted process list.
#[derive(Debug, Clone, Default)]
pub struct ReadyQueue {
    pending: VecDeque<usize>,
    ready: VecDeque<usize>,
}

impl ReadyQueue {
    /// Starts with every process pending. `processes` must be sorted by
    /// arrival.
    pub fn new(processes: &ProcessSet) -> Self {
        Self {
            pending: (0..processes.len()).collect(),
            ready: VecDeque::with_capacity(processes.len()),
        }
    }

    /// Moves every pending process with `arrival_time <= time` to the
    /// tail of the ready queue. Returns how many were admitted.
    pub fn admit(&mut self, processes: &ProcessSet, time: f64) -> usize {
        let mut admitted = 0;
        while let Some(&pos) = self.pending.front() {
            if !processes[pos].has_arrived(time) {
                break;
            }
            self.pending.pop_front();
            self.ready.push_back(pos);
            admitted += 1;
        }
        admitted
    }

    /// Arrival time of the earliest pending process.
    pub fn next_arrival(&self, processes: &ProcessSet) -> Option<f64> {
        self.pending.front().map(|&pos| processes[pos].arrival_time)
    }

    pub fn pop_front(&mut self) -> Option<usize> {
        self.ready.pop_front()
    }

    pub fn push_back(&mut self, pos: usize) {
        self.ready.push_back(pos);
    }

    /// Positions waiting for the CPU, head first.
    pub fn ready(&self) -> impl Iterator<Item = usize> + '_ {
        self.ready.iter().copied()
    }

    pub fn ready_len(&self) -> usize {
        self.ready.len()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Mutable state of one Round Robin run.
#[derive(Debug)]
struct RrContext {
    now: u64,
    quantum: u64,
    active: usize,
    /// Position on the CPU and ticks used in its current slice.
    current: Option<(usize, u64)>,
}

/// Preemptive Round Robin engine with a fixed quantum.
///
/// # Example
///
/// ```
/// use u_cpusched::models::ProcessSet;
/// use u_cpusched::scheduler::RrEngine;
///
/// let input = ProcessSet::from_pairs(&[(0.0, 5.0), (0.0, 5.0)]);
/// let outcome = RrEngine::new(2).run(&input, &mut ()).unwrap();
/// assert_eq!(outcome.processes[0].finish_time, Some(9.0));
/// assert_eq!(outcome.processes[1].finish_time, Some(10.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RrEngine {
    quantum: u64,
}

impl RrEngine {
    pub fn new(quantum: u64) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }

    /// Runs Round Robin on a fresh copy of `input`.
    ///
    /// The completed set is returned in arrival order.
    ///
    /// # Errors
    /// `SimulationError::InvalidInput` for invalid processes, a zero
    /// quantum, or fractional service times.
    pub fn run(
        &self,
        input: &ProcessSet,
        sink: &mut dyn TraceSink,
    ) -> Result<RunOutcome, SimulationError> {
        validate_round_robin(input, self.quantum)?;

        let mut processes = input.fresh_copy().sorted_by_arrival();
        let mut queue = ReadyQueue::new(&processes);
        let mut ctx = RrContext {
            now: 0,
            quantum: self.quantum,
            active: processes.len(),
            current: None,
        };
        let mut slices: Vec<ExecutionSlice> = Vec::new();

        while ctx.active > 0 {
            queue.admit(&processes, ctx.now as f64);

            let (pos, used) = match ctx.current {
                Some(running) => running,
                None => match queue.pop_front() {
                    Some(pos) => {
                        let index = processes[pos].index;
                        sink.record(TraceEvent::Dispatch {
                            time: ctx.now as f64,
                            index,
                        });
                        slices.push(ExecutionSlice {
                            index,
                            start: ctx.now as f64,
                            end: ctx.now as f64,
                        });
                        (pos, 0)
                    }
                    None => {
                        // Every unfinished process is pending here.
                        let Some(arrival) = queue.next_arrival(&processes) else {
                            break;
                        };
                        let until = arrival.ceil() as u64;
                        sink.record(TraceEvent::Idle {
                            from: ctx.now,
                            until,
                        });
                        ctx.now = until;
                        continue;
                    }
                },
            };

            ctx.now += 1;
            let used = used + 1;
            let now = ctx.now as f64;

            let p = &mut processes[pos];
            if p.start_time.is_none() {
                p.start_time = Some(now - 1.0);
            }
            p.runed_time += 1;
            p.status = ProcessStatus::Running;
            let index = p.index;

            let finished = p.runed_time as f64 == p.service_time;

            sink.record(TraceEvent::Tick(TickSnapshot::capture(
                ctx.now, index, &processes,
            )));

            let p = &mut processes[pos];
            if finished {
                p.complete_at(now);
                ctx.active -= 1;
                ctx.current = None;
            } else if used == ctx.quantum {
                p.status = ProcessStatus::Waiting;
                ctx.current = None;
            } else {
                ctx.current = Some((pos, used));
            }

            if let Some(slice) = slices.last_mut() {
                slice.end = now;
            }

            if finished {
                debug!(time = ctx.now, index, remaining = ctx.active, "finished");
                sink.record(TraceEvent::Finish { time: now, index });
            } else if ctx.current.is_none() {
                queue.admit(&processes, now);
                queue.push_back(pos);
                debug!(time = ctx.now, index, queued = queue.ready_len(), "preempted");
                sink.record(TraceEvent::Preempt { time: now, index });
            }
        }

        // Completed set stays in arrival order for reporting.
        let metrics = RunMetrics::calculate(Algorithm::Rr, &processes);

        info!(
            processes = processes.len(),
            quantum = self.quantum,
            makespan = metrics.makespan,
            avg_turnaround = metrics.avg_turnaround_time,
            "RR run complete"
        );

        Ok(RunOutcome {
            algorithm: Algorithm::Rr,
            processes,
            slices,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    fn run(pairs: &[(f64, f64)], quantum: u64) -> RunOutcome {
        RrEngine::new(quantum)
            .run(&ProcessSet::from_pairs(pairs), &mut ())
            .unwrap()
    }

    fn finish_of(outcome: &RunOutcome, index: usize) -> f64 {
        outcome
            .processes
            .get(index)
            .and_then(|p| p.finish_time)
            .unwrap()
    }

    fn pattern(outcome: &RunOutcome) -> Vec<(usize, f64, f64)> {
        outcome
            .slices
            .iter()
            .map(|s| (s.index, s.start, s.end))
            .collect()
    }

    #[test]
    fn test_scenario_b() {
        let outcome = run(&[(0.0, 5.0), (0.0, 5.0)], 2);

        assert_eq!(
            pattern(&outcome),
            vec![
                (1, 0.0, 2.0),
                (2, 2.0, 4.0),
                (1, 4.0, 6.0),
                (2, 6.0, 8.0),
                (1, 8.0, 9.0),
                (2, 9.0, 10.0),
            ]
        );
        assert_eq!(finish_of(&outcome, 1), 9.0);
        assert_eq!(finish_of(&outcome, 2), 10.0);
        assert!(outcome.processes.iter().all(|p| p.runed_time == 5));
    }

    #[test]
    fn test_new_arrival_goes_before_preempted() {
        // P2 arrives at 1, while P1 is mid-slice; it must run before P1 resumes.
        let outcome = run(&[(0.0, 3.0), (1.0, 2.0)], 2);
        assert_eq!(
            pattern(&outcome),
            vec![(1, 0.0, 2.0), (2, 2.0, 4.0), (1, 4.0, 5.0)]
        );
        assert_eq!(finish_of(&outcome, 2), 4.0);
        assert_eq!(finish_of(&outcome, 1), 5.0);
    }

    #[test]
    fn test_arrival_at_preemption_instant_goes_first() {
        let outcome = run(&[(0.0, 4.0), (2.0, 1.0)], 2);
        assert_eq!(
            pattern(&outcome),
            vec![(1, 0.0, 2.0), (2, 2.0, 3.0), (1, 3.0, 5.0)]
        );
    }

    #[test]
    fn test_idle_until_first_arrival() {
        let outcome = run(&[(3.0, 2.0)], 1);
        let p = &outcome.processes[0];
        assert_eq!(p.start_time, Some(3.0));
        assert_eq!(p.finish_time, Some(5.0));
        assert_eq!(p.wait_time, 0.0);
    }

    #[test]
    fn test_idle_gap_between_processes() {
        let mut events: Vec<TraceEvent> = Vec::new();
        let input = ProcessSet::from_pairs(&[(0.0, 1.0), (3.0, 1.0)]);
        let outcome = RrEngine::new(2).run(&input, &mut events).unwrap();

        let idle: Vec<(u64, u64)> = events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Idle { from, until } => Some((*from, *until)),
                _ => None,
            })
            .collect();
        assert_eq!(idle, vec![(1, 3)]);
        assert_eq!(finish_of(&outcome, 2), 4.0);
    }

    #[test]
    fn test_long_idle_gap_is_one_step() {
        let mut events: Vec<TraceEvent> = Vec::new();
        let input = ProcessSet::from_pairs(&[(1e12, 1.0)]);
        let outcome = RrEngine::new(2).run(&input, &mut events).unwrap();

        assert_eq!(
            events[0],
            TraceEvent::Idle {
                from: 0,
                until: 1_000_000_000_000
            }
        );
        assert_eq!(finish_of(&outcome, 1), 1e12 + 1.0);
        assert_eq!(outcome.processes[0].wait_time, 0.0);
    }

    #[test]
    fn test_fractional_idle_gap_rounds_up() {
        let mut events: Vec<TraceEvent> = Vec::new();
        let input = ProcessSet::from_pairs(&[(2.5, 1.0)]);
        let outcome = RrEngine::new(1).run(&input, &mut events).unwrap();

        assert_eq!(events[0], TraceEvent::Idle { from: 0, until: 3 });
        assert_eq!(outcome.processes[0].start_time, Some(3.0));
    }

    #[test]
    fn test_fractional_arrival_waits_for_next_tick() {
        let outcome = run(&[(0.0, 1.0), (1.5, 1.0)], 1);
        let p2 = outcome.processes.get(2).unwrap();
        assert_eq!(p2.start_time, Some(2.0));
        assert_eq!(p2.finish_time, Some(3.0));
        assert!((p2.wait_time - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_reported_in_arrival_order() {
        let outcome = run(&[(2.0, 1.0), (0.0, 3.0), (1.0, 2.0)], 1);
        assert_eq!(outcome.processes.indices(), vec![2, 3, 1]);
    }

    #[test]
    fn test_tick_trace_every_busy_tick() {
        let input = ProcessSet::from_pairs(&[(0.0, 2.0), (0.0, 3.0)]);
        let mut events: Vec<TraceEvent> = Vec::new();
        RrEngine::new(1).run(&input, &mut events).unwrap();

        let ticks: Vec<&TickSnapshot> = events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Tick(t) => Some(t),
                _ => None,
            })
            .collect();

        assert_eq!(ticks.len(), 5);
        assert_eq!(
            ticks.iter().map(|t| t.current_time).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
        assert_eq!(
            ticks.iter().map(|t| t.running).collect::<Vec<_>>(),
            vec![1, 2, 1, 2, 2]
        );
        let last = ticks[4];
        assert_eq!(last.rows[0].status, ProcessStatus::Finished);
        assert_eq!(last.rows[1].status, ProcessStatus::Running);
    }

    #[test]
    fn test_runner_shows_running_on_its_last_tick() {
        // Quantum 2: P1 is preempted at 2, finishes at 3.
        let input = ProcessSet::from_pairs(&[(0.0, 3.0)]);
        let mut events: Vec<TraceEvent> = Vec::new();
        RrEngine::new(2).run(&input, &mut events).unwrap();

        let statuses: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Tick(t) => Some(t.rows[0].status.code()),
                _ => None,
            })
            .collect();
        assert_eq!(statuses, vec![1, 1, 1]);
    }

    #[test]
    fn test_preempted_shows_waiting_on_next_tick() {
        let input = ProcessSet::from_pairs(&[(0.0, 2.0), (0.0, 1.0)]);
        let mut events: Vec<TraceEvent> = Vec::new();
        RrEngine::new(1).run(&input, &mut events).unwrap();

        let second = events
            .iter()
            .filter_map(|e| match e {
                TraceEvent::Tick(t) => Some(t),
                _ => None,
            })
            .nth(1)
            .unwrap();
        assert_eq!(second.running, 2);
        assert_eq!(second.rows[0].status, ProcessStatus::Waiting);
        assert_eq!(second.rows[1].status, ProcessStatus::Running);
    }

    #[test]
    fn test_finished_never_rescheduled() {
        let input = ProcessSet::from_pairs(&[(0.0, 1.0), (0.0, 4.0), (1.0, 2.0)]);
        let mut events: Vec<TraceEvent> = Vec::new();
        RrEngine::new(1).run(&input, &mut events).unwrap();

        let mut finished = Vec::new();
        for event in &events {
            match event {
                TraceEvent::Finish { index, .. } => {
                    assert!(!finished.contains(index));
                    finished.push(*index);
                }
                TraceEvent::Tick(t) => assert!(!finished.contains(&t.running)),
                _ => {}
            }
        }
        assert_eq!(finished.len(), 3);
    }

    #[test]
    fn test_rejects_bad_quantum_and_service() {
        let input = ProcessSet::from_pairs(&[(0.0, 2.5)]);
        let err = RrEngine::new(0).run(&input, &mut ()).unwrap_err();
        let kinds: Vec<ValidationErrorKind> =
            err.validation_errors().iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::NonPositiveQuantum));
        assert!(kinds.contains(&ValidationErrorKind::FractionalServiceTime));
    }

    #[test]
    fn test_ready_queue_admission() {
        let set = ProcessSet::from_pairs(&[(0.0, 1.0), (0.0, 1.0), (2.0, 1.0)]);
        let mut queue = ReadyQueue::new(&set);
        assert_eq!(queue.pending_len(), 3);

        assert_eq!(queue.admit(&set, 0.0), 2);
        assert_eq!(queue.ready().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(queue.admit(&set, 1.0), 0);
        assert_eq!(queue.admit(&set, 2.0), 1);
        assert_eq!(queue.pop_front(), Some(0));
        queue.push_back(0);
        assert_eq!(queue.ready().collect::<Vec<_>>(), vec![1, 2, 0]);
        assert_eq!(queue.pending_len(), 0);
    }
}
