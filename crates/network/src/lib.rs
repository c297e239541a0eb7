//! Lumped-parameter thermal network for spacecraft trade studies.
//!
//! Each [`Component`] is a single isothermal mass. Components exchange heat
//! through [`ThermalLink`]s (plain or temperature-switched conductances) and
//! forced transport loops, absorb sunlight, and radiate to deep space. The
//! [`thermal_derivative`] function turns the current temperatures into
//! heating rates and is the function an integrator evaluates repeatedly.
//!
//! # State layout
//!
//! A [`ThermalState`] holds one temperature per component, in network order,
//! followed by four energy accumulators (see [`PowerChannel`]). The matching
//! [`ThermalRate`] holds `dT/dt` per component followed by the four
//! instantaneous powers.
//!
//! # Integrating
//!
//! [`SpacecraftModel`] and [`ThermalProblem`] adapt the network to the
//! `Model`/`OdeProblem` traits so any solver from `spacetherm-solvers` can
//! drive it. The solver history converts into a [`Trajectory`], from which a
//! [`PowerSummary`] is read.

mod component;
mod constraint;
mod derivative;
mod environment;
mod flags;
mod model;
mod network;
mod state;
mod trajectory;

pub mod heat_transfer;
pub mod link;

pub use component::{Component, ComponentConfig, ComponentError, Heater};
pub use constraint::{Constraint, ConstraintError};
pub use derivative::thermal_derivative;
pub use environment::Environment;
pub use flags::CaseFlags;
pub use link::ThermalLink;
pub use model::{SpacecraftModel, ThermalInput, ThermalProblem};
pub use network::{ComponentId, Network, NetworkBuilder, NetworkError};
pub use state::{ACCUMULATOR_COUNT, PowerChannel, StateError, ThermalRate, ThermalState};
pub use trajectory::{PowerSummary, SummaryError, TemperatureRange, Trajectory};
