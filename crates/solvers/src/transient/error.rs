use std::error::Error as StdError;

/// Errors that can occur while integrating an ODE problem.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("model error: {0}")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    #[error("problem error: {0}")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),

    /// The adaptive step size shrank below what floating point can resolve.
    ///
    /// Usually a sign of a stiff or non-finite derivative.
    #[error("step size {step_size:e} underflowed at elapsed time {elapsed}")]
    StepSizeUnderflow { elapsed: f64, step_size: f64 },

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn model<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Model(Box::new(err))
    }

    pub(crate) fn problem<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Problem(Box::new(err))
    }
}
