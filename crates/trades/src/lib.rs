//! Thermal trade studies for a sample-return spacecraft.
//!
//! The crate wires the generic network from `spacetherm-network` into one
//! concrete vehicle and runs it through a matrix of design cases and
//! destinations:
//!
//! - [`components`] and [`spacecraft`] build the eight-part vehicle for a
//!   set of [`CaseFlags`](spacetherm_network::CaseFlags)
//! - [`environments`] holds the Venus, Earth, and Enceladus conditions
//! - [`cases`] names the flag presets and groups them into trade studies
//! - [`scenario`] integrates each (destination, case) pair, optionally in
//!   parallel
//! - [`report`] writes the text summaries, CSV trajectories, and LaTeX index
//!
//! ```ignore
//! use spacetherm_trades::{
//!     cases::TradeStudy, config::SimulationConfig, environments::Destination, scenario,
//! };
//!
//! let list = scenario::scenarios(&Destination::ALL, &TradeStudy::Nominal.cases());
//! let results = scenario::run_all(&list, &SimulationConfig::default(), true)?;
//! ```

pub mod cases;
pub mod components;
pub mod config;
pub mod environments;
pub mod report;
pub mod scenario;
pub mod spacecraft;
