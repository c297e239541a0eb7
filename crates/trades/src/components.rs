//! Component parameters of the sample-return spacecraft.
//!
//! Every part starts at room temperature except the sample box, which is
//! loaded cold.

use spacetherm_network::{CaseFlags, Component, ComponentConfig, ComponentError, Heater};
use uom::si::{
    area::square_meter,
    f64::{Area, Mass, Power, SpecificHeatCapacity, ThermodynamicTemperature},
    mass::kilogram,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

/// Component names in state-vector order.
pub const COMPONENT_NAMES: [&str; 8] = [
    "Radiators",
    "Structure",
    "Electronics",
    "Solar Arrays",
    "Sample Box",
    "Propellant Tanks",
    "Engines",
    "Antenna",
];

/// Aluminium, J/(kg·K).
const ALUMINIUM_SHC: f64 = 890.0;

/// Hydrazine propellant, J/(kg·K).
const PROPELLANT_SHC: f64 = 500.0;

/// Heat added by each radioisotope heater unit, in W.
const RHU_POWER: f64 = 100.0;

/// Layers of multi-layer insulation on the structure.
const STRUCTURE_MLI_LAYERS: f64 = 40.0;

/// Layers of multi-layer insulation on the antenna.
const ANTENNA_MLI_LAYERS: f64 = 20.0;

/// Face of a 3 m dish, m².
const ANTENNA_DISH_AREA: f64 = 7.065;

/// Parameters of one part, in SI units.
struct Part {
    name: &'static str,
    mass: f64,
    shc: f64,
    area: f64,
    emissivity: f64,
    temperature: f64,
    illumination: f64,
    innate_power: f64,
    heater: (f64, f64),
}

impl Part {
    fn build(self) -> Result<Component, ComponentError> {
        let (power, set_temp) = self.heater;
        let heater = Heater::new(
            Power::new::<watt>(power),
            ThermodynamicTemperature::new::<kelvin>(set_temp),
        )
        .map_err(|source| ComponentError {
            name: self.name.to_owned(),
            source,
        })?;

        Component::new(ComponentConfig {
            name: self.name.to_owned(),
            mass: Mass::new::<kilogram>(self.mass),
            specific_heat_capacity: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
                self.shc,
            ),
            radiative_area: Area::new::<square_meter>(self.area),
            emissivity: self.emissivity,
            temperature: ThermodynamicTemperature::new::<kelvin>(self.temperature),
            illumination_factor: self.illumination,
            innate_power: Power::new::<watt>(self.innate_power),
            heater,
        })
    }
}

/// Builds the eight spacecraft components for a trade case, in
/// [`COMPONENT_NAMES`] order.
///
/// # Errors
///
/// Returns a [`ComponentError`] if a resolved parameter is out of range.
pub fn sample_return_components(
    flags: &CaseFlags,
) -> Result<[Component; 8], ComponentError> {
    let rhu = if flags.rhus { RHU_POWER } else { 0.0 };

    let structure_emissivity = if flags.insulation {
        0.95 / STRUCTURE_MLI_LAYERS
    } else if flags.paint {
        0.3
    } else {
        0.95
    };

    let electronics_power = if flags.electronics_active {
        400.0
    } else {
        rhu
    };

    let parts = [
        // One-sided 1 mm aluminium sheet facing deep space.
        Part {
            name: COMPONENT_NAMES[0],
            mass: 50.0,
            shc: ALUMINIUM_SHC,
            area: if flags.radiators { 20.0 } else { 0.0 },
            emissivity: 0.95,
            temperature: 293.0,
            illumination: 0.0,
            innate_power: rhu,
            heater: (0.0, 0.0),
        },
        // Main tube, 2.5 m diameter by 4.5 m tall.
        Part {
            name: COMPONENT_NAMES[1],
            mass: 400.0,
            shc: ALUMINIUM_SHC,
            area: 25.0,
            emissivity: structure_emissivity,
            temperature: 293.0,
            illumination: 0.33,
            innate_power: rhu,
            heater: (20.0, 220.0),
        },
        // Fully enclosed avionics and batteries.
        Part {
            name: COMPONENT_NAMES[2],
            mass: 100.0,
            shc: ALUMINIUM_SHC,
            area: 0.0,
            emissivity: 0.0,
            temperature: 293.0,
            illumination: 0.0,
            innate_power: electronics_power,
            heater: (100.0, 293.0),
        },
        // 230 m² of collectors radiating from both faces.
        Part {
            name: COMPONENT_NAMES[3],
            mass: 1000.0,
            shc: ALUMINIUM_SHC,
            area: 230.0 * 2.0,
            emissivity: 0.8,
            temperature: 293.0,
            illumination: 0.35,
            innate_power: rhu,
            heater: (100.0, 293.0),
        },
        Part {
            name: COMPONENT_NAMES[4],
            mass: 20.0,
            shc: ALUMINIUM_SHC,
            area: 5.0,
            emissivity: 0.01,
            temperature: 180.0,
            illumination: 0.5,
            innate_power: if flags.electronics_active { 10.0 } else { 0.0 },
            heater: (0.0, 0.0),
        },
        Part {
            name: COMPONENT_NAMES[5],
            mass: 5000.0,
            shc: PROPELLANT_SHC,
            area: 0.0,
            emissivity: 0.0,
            temperature: 293.0,
            illumination: 0.0,
            innate_power: rhu,
            heater: (100.0, 293.0),
        },
        Part {
            name: COMPONENT_NAMES[6],
            mass: 50.0,
            shc: ALUMINIUM_SHC,
            area: 1.0,
            emissivity: 0.95,
            temperature: 293.0,
            illumination: 0.3,
            innate_power: 0.0,
            heater: (0.0, 0.0),
        },
        // 3 m dish facing away from the radiators.
        Part {
            name: COMPONENT_NAMES[7],
            mass: 30.0,
            shc: ALUMINIUM_SHC,
            area: ANTENNA_DISH_AREA,
            emissivity: 0.95 / ANTENNA_MLI_LAYERS,
            temperature: 293.0,
            illumination: 0.7,
            innate_power: 30.0,
            heater: (20.0, 293.0),
        },
    ];

    let [
        radiators,
        structure,
        electronics,
        solar_arrays,
        sample_box,
        propellant_tanks,
        engines,
        antenna,
    ] = parts.map(Part::build);

    Ok([
        radiators?,
        structure?,
        electronics?,
        solar_arrays?,
        sample_box?,
        propellant_tanks?,
        engines?,
        antenna?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::cases;

    #[test]
    fn components_follow_state_order() {
        let components = sample_return_components(&cases::NOTHING).unwrap();

        let names: Vec<_> = components.iter().map(Component::name).collect();
        assert_eq!(names, COMPONENT_NAMES);
    }

    #[test]
    fn radiator_area_depends_on_flag() {
        let without = sample_return_components(&cases::NOTHING).unwrap();
        let with = sample_return_components(&cases::NOTHING_WITH_RADIATORS).unwrap();

        assert_eq!(without[0].radiative_area(), 0.0);
        assert_eq!(with[0].radiative_area(), 20.0);
    }

    #[test]
    fn insulation_takes_precedence_over_paint() {
        let both = CaseFlags {
            insulation: true,
            paint: true,
            ..CaseFlags::NONE
        };

        let insulated = sample_return_components(&both).unwrap();
        let painted = sample_return_components(&cases::NOTHING_WITH_PAINT).unwrap();
        let bare = sample_return_components(&cases::NOTHING).unwrap();

        assert_relative_eq!(insulated[1].emissivity(), 0.95 / 40.0);
        assert_relative_eq!(painted[1].emissivity(), 0.3);
        assert_relative_eq!(bare[1].emissivity(), 0.95);
    }

    #[test]
    fn rhus_heat_every_host_part() {
        let components = sample_return_components(&cases::NOTHING_WITH_RHUS).unwrap();

        let innate: Vec<_> = components.iter().map(Component::innate_power).collect();
        assert_eq!(innate, [100.0, 100.0, 100.0, 100.0, 0.0, 100.0, 0.0, 30.0]);
    }

    #[test]
    fn active_electronics_replace_rhu_heat() {
        let components = sample_return_components(&cases::FINAL_DESIGN_ELEC_ON).unwrap();

        assert_eq!(components[2].innate_power(), 400.0);
        assert_eq!(components[4].innate_power(), 10.0);
    }

    #[test]
    fn antenna_dish_area() {
        let components = sample_return_components(&cases::NOTHING).unwrap();

        assert_relative_eq!(components[7].radiative_area(), 7.065);
        assert_eq!(components[4].temperature(), 180.0);
    }
}
