use std::{fmt, str::FromStr};

use spacetherm_network::{ConstraintError, Environment};
use uom::si::{
    f64::{HeatFluxDensity, ThermodynamicTemperature},
    heat_flux_density::watt_per_square_meter,
    thermodynamic_temperature::kelvin,
};

/// Cosmic microwave background, K.
const DEEP_SPACE: f64 = 2.7;

/// Where the spacecraft is parked for a trade run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Venus,
    Earth,
    Enceladus,
}

impl Destination {
    /// All destinations, in the order a full study visits them.
    pub const ALL: [Self; 3] = [Self::Enceladus, Self::Venus, Self::Earth];

    pub fn name(self) -> &'static str {
        match self {
            Self::Venus => "Venus",
            Self::Earth => "Earth",
            Self::Enceladus => "Enceladus",
        }
    }

    /// Solar flux at the destination, W/m².
    pub fn solar_flux(self) -> f64 {
        match self {
            Self::Venus => 2900.0,
            Self::Earth => 1400.0,
            Self::Enceladus => 15.0,
        }
    }

    /// Builds the radiative environment at the destination.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the tabulated values are rejected.
    pub fn environment(self) -> Result<Environment, ConstraintError> {
        Environment::new(
            self.name(),
            HeatFluxDensity::new::<watt_per_square_meter>(self.solar_flux()),
            ThermodynamicTemperature::new::<kelvin>(DEEP_SPACE),
        )
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An unrecognised destination name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown destination `{0}`, expected one of: venus, earth, enceladus")]
pub struct UnknownDestination(pub String);

impl FromStr for Destination {
    type Err = UnknownDestination;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "venus" => Ok(Self::Venus),
            "earth" => Ok(Self::Earth),
            "enceladus" => Ok(Self::Enceladus),
            _ => Err(UnknownDestination(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environments_carry_tabulated_flux() {
        let venus = Destination::Venus.environment().unwrap();

        assert_eq!(venus.name(), "Venus");
        assert_eq!(venus.incident_radiative_flux(), 2900.0);
        assert_eq!(venus.background_temperature(), 2.7);
        assert_eq!(Destination::Enceladus.solar_flux(), 15.0);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Earth".parse(), Ok(Destination::Earth));
        assert_eq!("enceladus".parse(), Ok(Destination::Enceladus));
        assert!("Mars".parse::<Destination>().is_err());
    }
}
