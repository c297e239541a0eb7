use thiserror::Error;
use uom::si::{
    area::square_meter,
    f64::{Area, Mass, Power, SpecificHeatCapacity, ThermodynamicTemperature},
    mass::kilogram,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::constraint::{Constraint, ConstraintError};

/// A thermostatic electric heater.
///
/// The heater delivers its full power while the component is strictly colder
/// than `set_temp` and nothing otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heater {
    power: f64,
    set_temp: f64,
}

impl Heater {
    /// A heater that never turns on.
    pub const NONE: Self = Self {
        power: 0.0,
        set_temp: 0.0,
    };

    /// Creates a heater.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the power is negative or either value
    /// is not finite.
    pub fn new(
        power: Power,
        set_temp: ThermodynamicTemperature,
    ) -> Result<Self, ConstraintError> {
        Ok(Self {
            power: Constraint::NonNegative.check("heater power", power.get::<watt>())?,
            set_temp: Constraint::Finite.check("heater set point", set_temp.get::<kelvin>())?,
        })
    }

    /// Rated power in W.
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Thermostat set point in K.
    pub fn set_temp(&self) -> f64 {
        self.set_temp
    }

    /// Returns the power delivered to a component at `temperature` (K).
    pub fn output(&self, temperature: f64) -> f64 {
        if temperature < self.set_temp {
            self.power
        } else {
            0.0
        }
    }
}

impl Default for Heater {
    fn default() -> Self {
        Self::NONE
    }
}

/// Parameters for building a [`Component`].
#[derive(Debug, Clone)]
pub struct ComponentConfig {
    pub name: String,
    pub mass: Mass,
    pub specific_heat_capacity: SpecificHeatCapacity,

    /// Area exchanging radiation with the environment.
    pub radiative_area: Area,

    /// Emissivity of the radiative area, also used as its absorptivity.
    pub emissivity: f64,

    /// Initial temperature.
    pub temperature: ThermodynamicTemperature,

    /// Fraction of the radiative area in direct sunlight.
    pub illumination_factor: f64,

    /// Always-on internal generation, such as electronics or RHUs.
    pub innate_power: Power,

    pub heater: Heater,
}

/// A component's configuration was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("component `{name}`: {source}")]
pub struct ComponentError {
    pub name: String,
    #[source]
    pub source: ConstraintError,
}

/// A lumped thermal mass: one uniform temperature per component.
///
/// All values are stored in SI base units. Only the temperature changes after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    name: String,
    mass: f64,
    specific_heat_capacity: f64,
    radiative_area: f64,
    emissivity: f64,
    temperature: f64,
    illumination_factor: f64,
    innate_power: f64,
    heater: Heater,
}

impl Component {
    /// Validates a configuration and builds the component.
    ///
    /// # Errors
    ///
    /// Returns a [`ComponentError`] if the mass or specific heat capacity is
    /// not strictly positive, the radiative area is negative, the emissivity
    /// or illumination factor lies outside `[0, 1]`, or any value is not
    /// finite.
    pub fn new(config: ComponentConfig) -> Result<Self, ComponentError> {
        let ComponentConfig {
            name,
            mass,
            specific_heat_capacity,
            radiative_area,
            emissivity,
            temperature,
            illumination_factor,
            innate_power,
            heater,
        } = config;

        let checked = (|| {
            Ok(Self {
                mass: Constraint::StrictlyPositive.check("mass", mass.get::<kilogram>())?,
                specific_heat_capacity: Constraint::StrictlyPositive.check(
                    "specific heat capacity",
                    specific_heat_capacity.get::<joule_per_kilogram_kelvin>(),
                )?,
                radiative_area: Constraint::NonNegative
                    .check("radiative area", radiative_area.get::<square_meter>())?,
                emissivity: Constraint::UnitInterval.check("emissivity", emissivity)?,
                temperature: Constraint::Finite.check("temperature", temperature.get::<kelvin>())?,
                illumination_factor: Constraint::UnitInterval
                    .check("illumination factor", illumination_factor)?,
                innate_power: Constraint::Finite.check("innate power", innate_power.get::<watt>())?,
                heater,
                name: String::new(),
            })
        })();

        match checked {
            Ok(component) => Ok(Self { name, ..component }),
            Err(source) => Err(ComponentError { name, source }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mass in kg.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Specific heat capacity in J/(kg·K).
    pub fn specific_heat_capacity(&self) -> f64 {
        self.specific_heat_capacity
    }

    /// Radiative area in m².
    pub fn radiative_area(&self) -> f64 {
        self.radiative_area
    }

    pub fn emissivity(&self) -> f64 {
        self.emissivity
    }

    /// Current temperature in K.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn illumination_factor(&self) -> f64 {
        self.illumination_factor
    }

    /// Internal generation in W.
    pub fn innate_power(&self) -> f64 {
        self.innate_power
    }

    pub fn heater(&self) -> &Heater {
        &self.heater
    }

    /// Heat capacity of the whole mass, `mass × specific heat capacity`, in J/K.
    ///
    /// Always strictly positive.
    pub fn thermal_inertia(&self) -> f64 {
        self.mass * self.specific_heat_capacity
    }

    pub(crate) fn set_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
    }
}
