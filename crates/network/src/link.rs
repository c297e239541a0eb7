//! Conductive couplings between two components.
//!
//! A [`ThermalLink`] is an immutable conductance policy. The network stores
//! one link per unordered pair of components and resolves it from both
//! sides on every evaluation, passing each side's own temperature as
//! `self_temp`. A switched link can therefore conduct fully in one direction
//! and throttled in the other during the same evaluation.

use uom::si::{
    f64::{ThermalConductance, ThermodynamicTemperature},
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::constraint::{Constraint, ConstraintError};

/// A conductance between two components, in W/K.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalLink {
    conductance: f64,
    kind: LinkKind,
}

/// How a link's conductance responds to the temperatures on either side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkKind {
    /// Conducts at its full conductance regardless of temperature.
    Plain,

    /// Throttles by `attenuation_factor` to protect the component on the
    /// `self` side.
    ///
    /// The link attenuates when heat would flow into a component that is
    /// already above `heat_limit`, or out of a component that is already
    /// below `cool_limit`.
    Switch {
        cool_limit: f64,
        heat_limit: f64,
        attenuation_factor: f64,
    },
}

impl ThermalLink {
    /// A link that carries no heat.
    pub const NONE: Self = Self {
        conductance: 0.0,
        kind: LinkKind::Plain,
    };

    /// Creates a fixed-conductance link.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the conductance is negative or not finite.
    pub fn plain(conductance: ThermalConductance) -> Result<Self, ConstraintError> {
        let conductance =
            Constraint::NonNegative.check("conductance", conductance.get::<watt_per_kelvin>())?;

        Ok(Self {
            conductance,
            kind: LinkKind::Plain,
        })
    }

    /// Creates a thermal switch.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the conductance is negative, a limit
    /// is not finite, or the attenuation factor is not greater than one.
    pub fn switch(
        conductance: ThermalConductance,
        cool_limit: ThermodynamicTemperature,
        heat_limit: ThermodynamicTemperature,
        attenuation_factor: f64,
    ) -> Result<Self, ConstraintError> {
        let conductance =
            Constraint::NonNegative.check("conductance", conductance.get::<watt_per_kelvin>())?;
        let cool_limit = Constraint::Finite.check("cool limit", cool_limit.get::<kelvin>())?;
        let heat_limit = Constraint::Finite.check("heat limit", heat_limit.get::<kelvin>())?;
        let attenuation_factor =
            Constraint::GreaterThanOne.check("attenuation factor", attenuation_factor)?;

        Ok(Self {
            conductance,
            kind: LinkKind::Switch {
                cool_limit,
                heat_limit,
                attenuation_factor,
            },
        })
    }

    /// Returns the unattenuated conductance in W/K.
    pub fn base_conductance(&self) -> f64 {
        self.conductance
    }

    /// Returns how this link responds to temperature.
    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Resolves the conductance seen from the component at `self_temp`
    /// looking toward the component at `other_temp`, both in kelvin.
    ///
    /// Equal temperatures always resolve to the full conductance.
    pub fn resolve(&self, self_temp: f64, other_temp: f64) -> f64 {
        match self.kind {
            LinkKind::Plain => self.conductance,
            LinkKind::Switch {
                cool_limit,
                heat_limit,
                attenuation_factor,
            } => {
                let overheating = other_temp > self_temp && self_temp > heat_limit;
                let overcooling = other_temp < self_temp && self_temp < cool_limit;

                if overheating || overcooling {
                    self.conductance / attenuation_factor
                } else {
                    self.conductance
                }
            }
        }
    }
}

impl Default for ThermalLink {
    fn default() -> Self {
        Self::NONE
    }
}
