//! Progress logging for long integrations.

use spacetherm_core::Observer;

use crate::traits::HasElapsed;

/// Logs integration progress through `tracing`.
///
/// Emits a `debug` event each time the elapsed time crosses another
/// `interval` fraction of `duration`, and a `trace` event for each rejected
/// step. Never stops the solver.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    label: String,
    duration: f64,
    interval: f64,
    next_report: f64,
    accepted: usize,
    rejected: usize,
}

impl ProgressLog {
    /// Creates a logger reporting every 10% of `duration`.
    pub fn new(label: impl Into<String>, duration: f64) -> Self {
        Self {
            label: label.into(),
            duration,
            interval: 0.1,
            next_report: 0.0,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Sets the reporting interval as a fraction of the duration.
    ///
    /// Values outside `(0, 1]` fall back to reporting every accepted step.
    #[must_use]
    pub fn every(mut self, fraction: f64) -> Self {
        self.interval = if fraction > 0.0 && fraction <= 1.0 {
            fraction
        } else {
            0.0
        };
        self
    }

    /// Accepted events seen so far, including the initial condition.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Rejected trial steps seen so far.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    fn record<E: HasElapsed>(&mut self, event: &E) {
        let elapsed = event.elapsed();

        if event.is_rejected() {
            self.rejected += 1;
            tracing::trace!(label = %self.label, elapsed, "step rejected");
            return;
        }

        self.accepted += 1;
        if elapsed < self.next_report {
            return;
        }

        let percent = if self.duration > 0.0 {
            100.0 * elapsed / self.duration
        } else {
            100.0
        };
        tracing::debug!(
            label = %self.label,
            elapsed,
            percent = format_args!("{percent:.0}"),
            accepted = self.accepted,
            rejected = self.rejected,
            "integration progress"
        );

        let step = self.interval * self.duration;
        if step > 0.0 {
            while self.next_report <= elapsed {
                self.next_report += step;
            }
        }
    }
}

impl<E: HasElapsed, A> Observer<E, A> for ProgressLog {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}

/// Allows `&mut ProgressLog` to be passed to solvers that take an observer
/// by value, so the counters can be read after the solve completes.
impl<E: HasElapsed, A> Observer<E, A> for &mut ProgressLog {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}
