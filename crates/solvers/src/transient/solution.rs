use spacetherm_core::Snapshot;

/// Indicates how the solver terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the requested end of the integration.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a transient integration.
#[derive(Debug, Clone)]
pub struct Solution<I, O> {
    /// How the solver terminated.
    pub status: Status,

    /// Snapshots at the initial condition and after each accepted step.
    pub history: Vec<Snapshot<I, O>>,

    /// Number of accepted integration steps.
    pub steps: usize,
}

impl<I, O> Solution<I, O> {
    /// Returns the last accepted snapshot.
    ///
    /// The history always holds at least the initial snapshot, so this only
    /// returns `None` for a hand-built empty solution.
    pub fn last(&self) -> Option<&Snapshot<I, O>> {
        self.history.last()
    }
}
