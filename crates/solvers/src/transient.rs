//! Transient (time-marching) solvers for ODE problems.
//!
//! # Solvers
//!
//! - [`euler`]: fixed-step explicit Euler, useful for quick looks and tests
//! - [`dopri5`]: adaptive Dormand–Prince 5(4) with embedded error control
//!
//! Both return a [`Solution`] whose history holds one snapshot per accepted
//! step, starting with the initial condition.

mod error;
mod solution;

pub mod dopri5;
pub mod euler;

pub use error::Error;
pub use solution::{Solution, Status};
