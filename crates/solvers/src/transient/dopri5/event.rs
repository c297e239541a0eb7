use spacetherm_core::Snapshot;

/// Event emitted by the Dormand–Prince solver.
#[derive(Debug, Clone)]
pub enum Event<I, O> {
    /// A step was accepted, or the initial condition was evaluated (step 0).
    Accepted {
        step: usize,
        elapsed: f64,
        step_size: f64,
        error_norm: f64,
        snapshot: Snapshot<I, O>,
    },

    /// A trial step exceeded the tolerance and will be retried smaller.
    Rejected {
        elapsed: f64,
        step_size: f64,
        error_norm: f64,
    },
}

impl<I, O> Event<I, O> {
    /// Returns the elapsed integration time at the start of a rejected step
    /// or the end of an accepted one.
    pub fn elapsed(&self) -> f64 {
        match self {
            Self::Accepted { elapsed, .. } | Self::Rejected { elapsed, .. } => *elapsed,
        }
    }

    /// Returns the snapshot of an accepted step.
    pub fn snapshot(&self) -> Option<&Snapshot<I, O>> {
        match self {
            Self::Accepted { snapshot, .. } => Some(snapshot),
            Self::Rejected { .. } => None,
        }
    }
}
