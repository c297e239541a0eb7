/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets generic ODE solvers advance the type by
/// `derivative * delta`, where the derivative is taken with respect to
/// `Delta` (usually time in seconds).
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

/// Derivatives that can be blended into a weighted sum.
///
/// Multi-stage integrators build each stage from a weighted sum of earlier
/// stage derivatives, `Σ wᵢ kᵢ`.
pub trait LinearCombination: Sized {
    /// Returns `Σ weight * term` over all `terms`.
    ///
    /// Callers always pass at least one term.
    #[must_use]
    fn linear_combination(terms: &[(f64, &Self)]) -> Self;
}

/// States whose distance from another state can be measured against a tolerance.
///
/// Adaptive integrators compare two estimates of the same step and shrink or
/// grow the step size depending on the result.
pub trait ErrorNorm {
    /// Returns the scaled RMS difference between `self` and `other`.
    ///
    /// Each component difference is divided by
    /// `abs_tol + rel_tol * max(|selfᵢ|, |otherᵢ|)` before averaging, so a
    /// value at or below one means the difference is within tolerance.
    fn error_norm(&self, other: &Self, abs_tol: f64, rel_tol: f64) -> f64;
}
