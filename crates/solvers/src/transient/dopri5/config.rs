use super::Error;

/// Step-size control settings for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Absolute tolerance on each state component.
    pub abs_tol: f64,

    /// Relative tolerance on each state component.
    pub rel_tol: f64,

    /// Size of the first trial step, or `None` to estimate one from the
    /// initial derivative.
    pub first_step: Option<f64>,

    /// Largest step the controller may take.
    pub max_step: f64,
}

impl Config {
    /// Checks that tolerances and step bounds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a tolerance is negative or
    /// non-finite, both tolerances are zero, or a step bound is not positive.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.abs_tol.is_finite() && self.abs_tol >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "abs_tol must be finite and non-negative, got {}",
                self.abs_tol
            )));
        }
        if !(self.rel_tol.is_finite() && self.rel_tol >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "rel_tol must be finite and non-negative, got {}",
                self.rel_tol
            )));
        }
        if self.abs_tol == 0.0 && self.rel_tol == 0.0 {
            return Err(Error::InvalidConfig(
                "abs_tol and rel_tol cannot both be zero".into(),
            ));
        }
        if let Some(h) = self.first_step {
            if !(h.is_finite() && h > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "first_step must be positive, got {h}"
                )));
            }
        }
        if self.max_step.is_nan() || self.max_step <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max_step must be positive, got {}",
                self.max_step
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            abs_tol: 1e-6,
            rel_tol: 1e-3,
            first_step: None,
            max_step: f64::INFINITY,
        }
    }
}
