//! The integrable state vector and its time derivative.

use spacetherm_core::{ErrorNorm, LinearCombination, StepIntegrable};
use thiserror::Error;

/// Number of energy accumulators that follow the component temperatures.
pub const ACCUMULATOR_COUNT: usize = 4;

/// One of the four power channels tracked alongside the temperatures.
///
/// In a [`ThermalRate`] each channel is an instantaneous power in W. In a
/// [`ThermalState`] it is the energy integrated from that power, in J.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerChannel {
    /// Always-on internal generation.
    Innate,
    /// Thermostatic heater output.
    Heater,
    /// Absorbed sunlight after louver attenuation.
    Incoming,
    /// Net exchange with the deep-space background, negative when rejecting.
    Rejected,
}

impl PowerChannel {
    pub const ALL: [Self; ACCUMULATOR_COUNT] =
        [Self::Innate, Self::Heater, Self::Incoming, Self::Rejected];

    /// Position of the channel within the accumulator block.
    pub fn index(self) -> usize {
        match self {
            Self::Innate => 0,
            Self::Heater => 1,
            Self::Incoming => 2,
            Self::Rejected => 3,
        }
    }

    /// Human-readable name of the channel's average power.
    pub fn label(self) -> &'static str {
        match self {
            Self::Innate => "Avg Innate Power Draw",
            Self::Heater => "Avg Heater Power Draw",
            Self::Incoming => "Avg Incoming Radiative Power",
            Self::Rejected => "Avg Rejected Radiative Power",
        }
    }

    /// Column header for the channel's accumulated energy.
    pub fn column(self) -> &'static str {
        match self {
            Self::Innate => "innate_energy_J",
            Self::Heater => "heater_energy_J",
            Self::Incoming => "incoming_radiative_energy_J",
            Self::Rejected => "rejected_radiative_energy_J",
        }
    }
}

/// A state or rate vector had the wrong length for the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("state has {actual} entries but the network needs {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("state has {len} entries, fewer than the {ACCUMULATOR_COUNT} accumulators")]
    MissingAccumulators { len: usize },
}

/// Component temperatures (K) followed by the accumulated energies (J).
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalState {
    values: Vec<f64>,
}

impl ThermalState {
    /// Creates a state from initial temperatures with zeroed accumulators.
    pub fn from_temperatures(temperatures: impl IntoIterator<Item = f64>) -> Self {
        let mut values: Vec<f64> = temperatures.into_iter().collect();
        values.extend([0.0; ACCUMULATOR_COUNT]);
        Self { values }
    }

    /// Wraps a raw vector laid out as temperatures then accumulators.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::MissingAccumulators`] if the vector cannot hold
    /// the accumulator block.
    pub fn from_values(values: Vec<f64>) -> Result<Self, StateError> {
        if values.len() < ACCUMULATOR_COUNT {
            return Err(StateError::MissingAccumulators { len: values.len() });
        }
        Ok(Self { values })
    }

    /// Total number of entries, `N + 4`.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn component_count(&self) -> usize {
        self.values.len() - ACCUMULATOR_COUNT
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.values[..self.component_count()]
    }

    pub fn accumulators(&self) -> &[f64] {
        &self.values[self.component_count()..]
    }

    /// Energy accumulated on `channel`, in J.
    pub fn accumulator(&self, channel: PowerChannel) -> f64 {
        self.accumulators()[channel.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Heating rates (K/s) followed by the instantaneous channel powers (W).
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalRate {
    values: Vec<f64>,
}

impl ThermalRate {
    pub fn new(temperature_rates: Vec<f64>, powers: [f64; ACCUMULATOR_COUNT]) -> Self {
        let mut values = temperature_rates;
        values.extend(powers);
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn temperature_rates(&self) -> &[f64] {
        &self.values[..self.values.len().saturating_sub(ACCUMULATOR_COUNT)]
    }

    /// Instantaneous power on `channel`, in W.
    pub fn power(&self, channel: PowerChannel) -> f64 {
        let start = self.values.len().saturating_sub(ACCUMULATOR_COUNT);
        self.values[start + channel.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl StepIntegrable<f64> for ThermalState {
    type Derivative = ThermalRate;

    fn step(&self, derivative: ThermalRate, dt: f64) -> Self {
        debug_assert_eq!(self.values.len(), derivative.values.len());

        Self {
            values: self
                .values
                .iter()
                .zip(&derivative.values)
                .map(|(y, dy)| y + dy * dt)
                .collect(),
        }
    }
}

impl LinearCombination for ThermalRate {
    fn linear_combination(terms: &[(f64, &Self)]) -> Self {
        let len = terms.first().map_or(0, |(_, rate)| rate.values.len());
        let mut values = vec![0.0; len];

        for (weight, rate) in terms {
            for (sum, value) in values.iter_mut().zip(&rate.values) {
                *sum += weight * value;
            }
        }

        Self { values }
    }
}

impl ErrorNorm for ThermalState {
    fn error_norm(&self, other: &Self, abs_tol: f64, rel_tol: f64) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }

        let sum_sq: f64 = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(a, b)| {
                let scale = abs_tol + rel_tol * a.abs().max(b.abs());
                ((a - b) / scale).powi(2)
            })
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let n = self.values.len() as f64;
        (sum_sq / n).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn initial_state_has_zero_accumulators() {
        let state = ThermalState::from_temperatures([293.0, 180.0]);

        assert_eq!(state.len(), 6);
        assert_eq!(state.temperatures(), &[293.0, 180.0]);
        assert_eq!(state.accumulators(), &[0.0; 4]);
    }

    #[test]
    fn from_values_requires_accumulators() {
        assert_eq!(
            ThermalState::from_values(vec![1.0, 2.0]),
            Err(StateError::MissingAccumulators { len: 2 })
        );

        let state = ThermalState::from_values(vec![300.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(state.component_count(), 1);
        assert_eq!(state.accumulator(PowerChannel::Rejected), 4.0);
    }

    #[test]
    fn step_advances_temperatures_and_accumulators() {
        let state = ThermalState::from_temperatures([300.0]);
        let rate = ThermalRate::new(vec![-0.5], [100.0, 20.0, 50.0, -170.0]);

        let next = state.step(rate, 10.0);

        assert_relative_eq!(next.temperatures()[0], 295.0);
        assert_relative_eq!(next.accumulator(PowerChannel::Innate), 1000.0);
        assert_relative_eq!(next.accumulator(PowerChannel::Rejected), -1700.0);
    }

    #[test]
    fn linear_combination_is_weighted_sum() {
        let a = ThermalRate::new(vec![1.0], [1.0, 2.0, 3.0, 4.0]);
        let b = ThermalRate::new(vec![-2.0], [0.0, 0.0, 0.0, 8.0]);

        let blended = ThermalRate::linear_combination(&[(2.0, &a), (0.5, &b)]);

        assert_eq!(blended.temperature_rates(), &[1.0]);
        assert_relative_eq!(blended.power(PowerChannel::Rejected), 12.0);
        assert!(ThermalRate::linear_combination(&[]).is_empty());
    }

    #[test]
    fn error_norm_is_rms_of_scaled_differences() {
        let a = ThermalState::from_values(vec![100.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let b = ThermalState::from_values(vec![100.0, 0.0, 0.0, 0.0, 0.1]).unwrap();

        // Only the last entry differs: scale = 0.01 + 0.001 * 0.1
        let expected = (0.1_f64 / 0.0101).powi(2) / 5.0;
        assert_relative_eq!(a.error_norm(&b, 0.01, 0.001), expected.sqrt());
        assert_relative_eq!(a.error_norm(&a, 0.01, 0.001), 0.0);
    }

    #[test]
    fn channel_metadata_is_consistent() {
        for (i, channel) in PowerChannel::ALL.into_iter().enumerate() {
            assert_eq!(channel.index(), i);
        }
        assert_eq!(PowerChannel::Heater.label(), "Avg Heater Power Draw");
    }
}
