//! Decision-point state passed to dispatching rules.

/// Runtime state at one decision point of a non-preemptive run.
///
/// Owned by a single run; never shared between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchContext {
    /// Current simulation clock.
    pub clock: f64,
}

impl DispatchContext {
    /// Creates a context at the given time.
    pub fn at_time(clock: f64) -> Self {
        Self { clock }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&mut self, delta: f64) {
        self.clock += delta;
    }

    /// Moves the clock to `time` if it lies in the future (CPU idles).
    pub fn idle_until(&mut self, time: f64) {
        if time > self.clock {
            self.clock = time;
        }
    }
}
