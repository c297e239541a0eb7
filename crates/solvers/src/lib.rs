//! Time integrators for the spacecraft thermal framework.
//!
//! Every solver here is generic over a [`Model`] and an [`OdeProblem`], so it
//! can drive any model whose state implements the step algebra from
//! `spacetherm-core`.
//!
//! [`Model`]: spacetherm_core::Model
//! [`OdeProblem`]: spacetherm_core::OdeProblem

pub mod transient;
