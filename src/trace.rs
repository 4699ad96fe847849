//! Observational events emitted by the engines.
//!
//! Engines push events into a [`TraceSink`] as they run. Sinks only
//! observe: scheduling order and timing never depend on which sink is
//! attached.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{ProcessSet, ProcessStatus};

/// Per-process row of a Round Robin tick snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRow {
    pub index: usize,
    pub start_time: Option<f64>,
    pub runed_time: u64,
    pub status: ProcessStatus,
}

/// State of every process at the end of one Round Robin tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Clock after the tick.
    pub current_time: u64,
    /// Process that held the CPU during the tick.
    pub running: usize,
    pub rows: Vec<TickRow>,
}

impl TickSnapshot {
    pub(crate) fn capture(current_time: u64, running: usize, processes: &ProcessSet) -> Self {
        Self {
            current_time,
            running,
            rows: processes
                .iter()
                .map(|p| TickRow {
                    index: p.index,
                    start_time: p.start_time,
                    runed_time: p.runed_time,
                    status: p.status,
                })
                .collect(),
        }
    }
}

/// HRRN execution window of one process and who arrived during it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSnapshot {
    pub index: usize,
    pub start_time: f64,
    pub finish_time: f64,
    /// Later-ordered processes that had arrived by `finish_time`.
    pub ready_queue: Vec<usize>,
}

/// An engine event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// A process took the CPU.
    Dispatch { time: f64, index: usize },
    /// A process used up its quantum and went to the back of the queue.
    Preempt { time: f64, index: usize },
    /// A process completed.
    Finish { time: f64, index: usize },
    /// No process was eligible for the ticks in `[from, until)`.
    Idle { from: u64, until: u64 },
    /// End-of-tick status of all processes (RR).
    Tick(TickSnapshot),
    /// Execution window of one process (HRRN).
    Window(WindowSnapshot),
}

/// Receiver of engine events.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

/// Discards everything.
impl TraceSink for () {
    fn record(&mut self, _event: TraceEvent) {}
}

/// Collects events in order.
impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn record(&mut self, event: TraceEvent) {
        match event {
            TraceEvent::Dispatch { time, index } => debug!(time, index, "dispatch"),
            TraceEvent::Preempt { time, index } => debug!(time, index, "preempt"),
            TraceEvent::Finish { time, index } => debug!(time, index, "finish"),
            TraceEvent::Idle { from, until } => debug!(from, until, "cpu idle"),
            TraceEvent::Tick(snapshot) => {
                for row in &snapshot.rows {
                    debug!(
                        current_time = snapshot.current_time,
                        index = row.index,
                        start_time = ?row.start_time,
                        runed_time = row.runed_time,
                        status = %row.status,
                        "tick"
                    );
                }
            }
            TraceEvent::Window(window) => debug!(
                index = window.index,
                start_time = window.start_time,
                finish_time = window.finish_time,
                ready_queue = ?window.ready_queue,
                "window"
            ),
        }
    }
}

/// Fans one event out to two sinks.
pub struct Tee<'a, A: TraceSink + ?Sized, B: TraceSink + ?Sized> {
    pub first: &'a mut A,
    pub second: &'a mut B,
}

impl<A: TraceSink + ?Sized, B: TraceSink + ?Sized> TraceSink for Tee<'_, A, B> {
    fn record(&mut self, event: TraceEvent) {
        self.first.record(event.clone());
        self.second.record(event);
    }
}

/// Passes on only the events `keep` accepts.
pub struct Filtered<'a, S: TraceSink + ?Sized, F> {
    pub inner: &'a mut S,
    pub keep: F,
}

impl<S, F> TraceSink for Filtered<'_, S, F>
where
    S: TraceSink + ?Sized,
    F: FnMut(&TraceEvent) -> bool,
{
    fn record(&mut self, event: TraceEvent) {
        if (self.keep)(&event) {
            self.inner.record(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_records_in_order() {
        let mut events: Vec<TraceEvent> = Vec::new();
        events.record(TraceEvent::Idle { from: 0, until: 1 });
        events.record(TraceEvent::Dispatch {
            time: 1.0,
            index: 2,
        });
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], TraceEvent::Idle { from: 0, until: 1 });
    }

    #[test]
    fn test_tee_duplicates() {
        let mut a: Vec<TraceEvent> = Vec::new();
        let mut b: Vec<TraceEvent> = Vec::new();
        {
            let mut tee = Tee {
                first: &mut a,
                second: &mut b,
            };
            tee.record(TraceEvent::Finish {
                time: 3.0,
                index: 1,
            });
        }
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_filtered_drops_rejected_events() {
        let mut kept: Vec<TraceEvent> = Vec::new();
        {
            let mut sink = Filtered {
                inner: &mut kept,
                keep: |e: &TraceEvent| !matches!(e, TraceEvent::Tick(_)),
            };
            let set = ProcessSet::from_pairs(&[(0.0, 1.0)]);
            sink.record(TraceEvent::Tick(TickSnapshot::capture(1, 1, &set)));
            sink.record(TraceEvent::Finish {
                time: 1.0,
                index: 1,
            });
        }
        assert_eq!(
            kept,
            vec![TraceEvent::Finish {
                time: 1.0,
                index: 1
            }]
        );
    }

    #[test]
    fn test_capture_snapshot() {
        let mut set = ProcessSet::from_pairs(&[(0.0, 2.0), (0.0, 1.0)]);
        set[0].runed_time = 1;
        set[0].start_time = Some(0.0);
        set[0].status = ProcessStatus::Running;

        let snap = TickSnapshot::capture(1, 1, &set);
        assert_eq!(snap.rows.len(), 2);
        assert_eq!(snap.rows[0].runed_time, 1);
        assert_eq!(snap.rows[1].status, ProcessStatus::Waiting);
    }
}
