/// Receives events from a solver and optionally returns a control action.
///
/// Solvers define their own event and action types. Returning `None` lets the
/// solver continue unchanged.
///
/// Two implementations are provided:
///
/// - `()` ignores every event, for unobserved solves.
/// - Any `FnMut(&E) -> Option<A>` closure.
pub trait Observer<E, A> {
    /// Handles a single solver event.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}
