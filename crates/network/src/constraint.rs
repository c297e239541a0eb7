//! Construction-time checks on physical parameters.
//!
//! Every parameter is validated once, when a component, link, or environment
//! is built, so the derivative function can trust its inputs without
//! re-checking them on every evaluation.

use std::fmt;

use thiserror::Error;

/// A numeric invariant a physical parameter must satisfy.
///
/// All constraints also require the value to be finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    Finite,
    NonNegative,
    StrictlyPositive,
    UnitInterval,
    GreaterThanOne,
}

impl Constraint {
    /// Returns `value` if it satisfies the constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] naming `parameter` otherwise.
    pub fn check(self, parameter: &'static str, value: f64) -> Result<f64, ConstraintError> {
        let ok = value.is_finite()
            && match self {
                Self::Finite => true,
                Self::NonNegative => value >= 0.0,
                Self::StrictlyPositive => value > 0.0,
                Self::UnitInterval => (0.0..=1.0).contains(&value),
                Self::GreaterThanOne => value > 1.0,
            };

        if ok {
            Ok(value)
        } else {
            Err(ConstraintError {
                parameter,
                constraint: self,
                value,
            })
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Finite => "finite",
            Self::NonNegative => "finite and non-negative",
            Self::StrictlyPositive => "finite and strictly positive",
            Self::UnitInterval => "within [0, 1]",
            Self::GreaterThanOne => "finite and greater than one",
        })
    }
}

/// A physical parameter violated its [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{parameter} must be {constraint}, got {value}")]
pub struct ConstraintError {
    pub parameter: &'static str,
    pub constraint: Constraint,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_values_inside_bounds() {
        assert_eq!(Constraint::NonNegative.check("area", 0.0), Ok(0.0));
        assert_eq!(Constraint::StrictlyPositive.check("mass", 50.0), Ok(50.0));
        assert_eq!(Constraint::UnitInterval.check("emissivity", 1.0), Ok(1.0));
        assert_eq!(Constraint::GreaterThanOne.check("attenuation", 100.0), Ok(100.0));
        assert_eq!(Constraint::Finite.check("power", -30.0), Ok(-30.0));
    }

    #[test]
    fn rejects_values_outside_bounds() {
        let err = Constraint::StrictlyPositive.check("mass", 0.0).unwrap_err();
        assert_eq!(err.parameter, "mass");
        assert_eq!(err.constraint, Constraint::StrictlyPositive);

        assert!(Constraint::UnitInterval.check("emissivity", 1.2).is_err());
        assert!(Constraint::GreaterThanOne.check("attenuation", 1.0).is_err());
        assert!(Constraint::NonNegative.check("area", -1.0).is_err());
    }

    #[test]
    fn rejects_non_finite_values_for_every_constraint() {
        for constraint in [
            Constraint::Finite,
            Constraint::NonNegative,
            Constraint::StrictlyPositive,
            Constraint::UnitInterval,
            Constraint::GreaterThanOne,
        ] {
            assert!(constraint.check("x", f64::NAN).is_err());
            assert!(constraint.check("x", f64::INFINITY).is_err());
        }
    }

    #[test]
    fn error_message_names_the_parameter() {
        let err = Constraint::StrictlyPositive
            .check("specific heat capacity", -1.0)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "specific heat capacity must be finite and strictly positive, got -1"
        );
    }
}
