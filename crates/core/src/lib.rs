//! Core traits for integrating lumped-parameter thermal models.
//!
//! This crate defines the seams shared by the thermal network, the
//! integrators, and the observers:
//!
//! - [`Model`]: maps a typed input to a typed output (for a thermal network,
//!   temperatures in and heat-flow rates out)
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model's input and output to an integrable state
//!   and its derivative
//! - [`StepIntegrable`], [`LinearCombination`], [`ErrorNorm`]: the algebra
//!   integrators need from a state and its derivative

mod model;
mod observer;
mod problem;
mod step;

pub use model::{Model, Snapshot};
pub use observer::Observer;
pub use problem::OdeProblem;
pub use step::{DerivativeOf, ErrorNorm, LinearCombination, StepIntegrable};
