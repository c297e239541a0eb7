use spacetherm_core::Snapshot;

/// Event emitted by the Euler solver for each snapshot.
///
/// Step 0 is the initial condition; steps `1..=N` follow each integration step.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    pub step: usize,
    pub snapshot: Snapshot<I, O>,
}
