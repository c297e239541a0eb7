use crate::{DerivativeOf, StepIntegrable};

/// Defines an ODE (ordinary differential equation) problem over a [`Model`].
///
/// The problem tells a solver how to pull the integrable state out of a model
/// input, how to read the state derivative from a model input and output, and
/// how to rebuild a model input after the state has been stepped by `delta`.
/// Everything else in the input (time, boundary conditions) is carried along
/// by [`build_input`][Self::build_input].
///
/// Solvers may call these methods at trial states that are later discarded,
/// so implementations must not assume calls arrive in time order.
///
/// [`Model`]: crate::Model
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the state from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted from the input.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Computes the derivative of the state from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds model input from a stepped state.
    ///
    /// `base` is the input the step started from and `delta` is how far the
    /// independent variable advanced to reach `state`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed from the state.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;
}
