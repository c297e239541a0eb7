//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, so an
//! observer can be written once and used with either integrator.
//!
//! # Event traits
//!
//! - [`HasElapsed`]: events that know how far the integration has advanced
//!
//! # Action traits
//!
//! - [`CanStopEarly`]: actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use spacetherm_core::Observer;
//! use spacetherm_observers::traits::{CanStopEarly, HasElapsed};
//!
//! /// Ends a run once it has covered a fixed span of time.
//! struct StopAfter(f64);
//!
//! impl<E: HasElapsed, A: CanStopEarly> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.elapsed() >= self.0).then(A::stop_early)
//!     }
//! }
//! ```

use spacetherm_solvers::transient::{dopri5, euler};

/// An event that reports the elapsed integration time in s.
pub trait HasElapsed {
    /// Returns the elapsed time for this event.
    fn elapsed(&self) -> f64;

    /// Returns `true` if the event describes a discarded trial step.
    fn is_rejected(&self) -> bool {
        false
    }
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- HasElapsed for dopri5::Event ---

impl<I, O> HasElapsed for dopri5::Event<I, O> {
    fn elapsed(&self) -> f64 {
        dopri5::Event::elapsed(self)
    }

    fn is_rejected(&self) -> bool {
        matches!(self, dopri5::Event::Rejected { .. })
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for euler::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}

impl CanStopEarly for dopri5::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
