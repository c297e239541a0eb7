/// A callable that maps a typed input to a typed output.
///
/// A model is evaluated by reference so a solver can call it many times per
/// step, for example once per stage of a Runge–Kutta scheme or again after a
/// rejected step.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the model at the given input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the model cannot be evaluated at `input`.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// A model input paired with the output it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    /// Pairs an input with its output.
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    /// Newton cooling toward a fixed sink: `dT/dt = -k (T - T_sink)`.
    struct NewtonCooling {
        k: f64,
        t_sink: f64,
    }

    impl Model for NewtonCooling {
        type Input = f64;
        type Output = f64;
        type Error = Infallible;

        fn call(&self, temperature: &f64) -> Result<f64, Infallible> {
            Ok(-self.k * (temperature - self.t_sink))
        }
    }

    #[test]
    fn snapshot_keeps_input_and_output_together() {
        let model = NewtonCooling {
            k: 0.5,
            t_sink: 250.0,
        };
        let input = 300.0;
        let output = model.call(&input).unwrap();

        let snapshot = Snapshot::new(input, output);

        assert_eq!(snapshot.input, 300.0);
        assert_eq!(snapshot.output, -25.0);
    }
}
