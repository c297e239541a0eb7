//! Reusable observers for spacetherm solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits
//! that work with both the Euler and Dormand–Prince integrators.
//!
//! # Modules
//!
//! - [`traits`]: Capability traits for cross-solver observers
//!   ([`HasElapsed`], [`CanStopEarly`])
//! - [`ProgressLog`]: `tracing` progress reports for long runs
//!
//! # Features
//!
//! - `plot`: Enables [`PlotObserver`] for viewing temperature histories in
//!   an egui window. This feature adds dependencies on `eframe` and
//!   `egui_plot`.
//!
//! [`Observer`]: spacetherm_core::Observer
//! [`HasElapsed`]: traits::HasElapsed
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod progress;

#[cfg(feature = "plot")]
mod plot;

pub use progress::ProgressLog;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, Plottable, ShowConfig};
