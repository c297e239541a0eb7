use uom::si::{
    f64::{HeatFluxDensity, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    thermodynamic_temperature::kelvin,
};

use crate::constraint::{Constraint, ConstraintError};

/// The radiative surroundings a spacecraft orbits in.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    name: String,
    incident_radiative_flux: f64,
    background_temperature: f64,
}

impl Environment {
    /// Creates an environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the solar flux is negative or either
    /// value is not finite.
    pub fn new(
        name: impl Into<String>,
        incident_radiative_flux: HeatFluxDensity,
        background_temperature: ThermodynamicTemperature,
    ) -> Result<Self, ConstraintError> {
        Ok(Self {
            name: name.into(),
            incident_radiative_flux: Constraint::NonNegative.check(
                "incident radiative flux",
                incident_radiative_flux.get::<watt_per_square_meter>(),
            )?,
            background_temperature: Constraint::NonNegative.check(
                "background temperature",
                background_temperature.get::<kelvin>(),
            )?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct solar flux in W/m².
    pub fn incident_radiative_flux(&self) -> f64 {
        self.incident_radiative_flux
    }

    /// Deep-space background temperature in K.
    pub fn background_temperature(&self) -> f64 {
        self.background_temperature
    }
}
