use std::fmt;

use spacetherm_core::Snapshot;
use thiserror::Error;

use crate::{
    model::ThermalInput,
    state::{ACCUMULATOR_COUNT, PowerChannel, StateError, ThermalRate, ThermalState},
};

/// A power summary could not be read from a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SummaryError {
    #[error("a power summary needs at least two samples, got {0}")]
    TooFewSamples(usize),

    #[error("the last two samples share the time {0} s")]
    ZeroInterval(f64),
}

/// Time samples of a thermal state, with the component names they belong to.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    names: Vec<String>,
    times: Vec<f64>,
    states: Vec<ThermalState>,
}

/// Coldest and hottest temperature a component reached, in K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub min: f64,
    pub max: f64,
}

impl Trajectory {
    /// Collects the accepted snapshots of a solver run.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::LengthMismatch`] if a snapshot does not hold one
    /// temperature per name plus the accumulators.
    pub fn from_history(
        names: Vec<String>,
        history: &[Snapshot<ThermalInput, ThermalRate>],
    ) -> Result<Self, StateError> {
        let expected = names.len() + ACCUMULATOR_COUNT;

        let mut times = Vec::with_capacity(history.len());
        let mut states = Vec::with_capacity(history.len());
        for snapshot in history {
            let state = &snapshot.input.state;
            if state.len() != expected {
                return Err(StateError::LengthMismatch {
                    expected,
                    actual: state.len(),
                });
            }
            times.push(snapshot.input.time);
            states.push(state.clone());
        }

        Ok(Self {
            names,
            times,
            states,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn component_names(&self) -> &[String] {
        &self.names
    }

    /// Sample times in s.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[ThermalState] {
        &self.states
    }

    /// Temperature history of the component at `index`, in K.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a component index.
    pub fn temperatures(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        assert!(index < self.names.len(), "no component at index {index}");
        self.states.iter().map(move |s| s.temperatures()[index])
    }

    /// Accumulated energy history on `channel`, in J.
    pub fn energies(&self, channel: PowerChannel) -> impl Iterator<Item = f64> + '_ {
        self.states.iter().map(move |s| s.accumulator(channel))
    }

    /// Temperatures at the last sample, if any.
    pub fn final_temperatures(&self) -> Option<&[f64]> {
        self.states.last().map(ThermalState::temperatures)
    }

    /// Per-component temperature range over the whole run, in network order.
    pub fn temperature_extremes(&self) -> Vec<TemperatureRange> {
        (0..self.names.len())
            .map(|i| {
                self.temperatures(i).fold(
                    TemperatureRange {
                        min: f64::INFINITY,
                        max: f64::NEG_INFINITY,
                    },
                    |range, t| TemperatureRange {
                        min: range.min.min(t),
                        max: range.max.max(t),
                    },
                )
            })
            .collect()
    }

    /// Average power on each channel over the final step.
    ///
    /// Each value is the backward difference of the accumulated energy
    /// across the last two samples.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if there are fewer than two samples or the
    /// last two share a time.
    pub fn power_summary(&self) -> Result<PowerSummary, SummaryError> {
        let n = self.len();
        if n < 2 {
            return Err(SummaryError::TooFewSamples(n));
        }

        let (t0, t1) = (self.times[n - 2], self.times[n - 1]);
        let dt = t1 - t0;
        if dt == 0.0 {
            return Err(SummaryError::ZeroInterval(t1));
        }

        let (before, after) = (&self.states[n - 2], &self.states[n - 1]);
        let powers = PowerChannel::ALL
            .map(|channel| (after.accumulator(channel) - before.accumulator(channel)) / dt);

        Ok(PowerSummary { powers })
    }
}

/// Average power per channel, in W.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerSummary {
    powers: [f64; ACCUMULATOR_COUNT],
}

impl PowerSummary {
    pub fn power(&self, channel: PowerChannel) -> f64 {
        self.powers[channel.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PowerChannel, f64)> + '_ {
        PowerChannel::ALL.into_iter().map(|c| (c, self.power(c)))
    }
}

/// One `"<label>: <value> W"` line per channel, rounded to two decimals.
impl fmt::Display for PowerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (channel, power) in self.iter() {
            writeln!(f, "{}: {power:.2} W", channel.label())?;
        }
        Ok(())
    }
}
