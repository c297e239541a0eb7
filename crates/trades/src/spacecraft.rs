//! Thermal topology of the sample-return spacecraft.

use spacetherm_network::{
    CaseFlags, ComponentError, ConstraintError, Network, NetworkBuilder, NetworkError,
    ThermalLink,
};
use thiserror::Error;
use uom::si::{
    f64::{Power, ThermalConductance, ThermodynamicTemperature},
    power::watt,
    thermal_conductance::watt_per_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::components::sample_return_components;

/// Attenuation of every thermal switch on the spacecraft.
const SWITCH_ATTENUATION: f64 = 100.0;

/// Heat pumped from the sample box into the radiators when active cooling is
/// fitted, in W.
const ACTIVE_COOLING_POWER: f64 = 100.0;

/// The prefab spacecraft could not be built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrefabError {
    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error("invalid link: {0}")]
    Link(#[from] ConstraintError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Builds the sample-return spacecraft network for a trade case.
///
/// The structure is the conductive hub: every part except the radiators
/// hangs off it through a thermal switch. The radiators also reach the
/// sample box directly through a switch that shields the box above 160 K.
///
/// # Errors
///
/// Returns a [`PrefabError`] if a component, link, or the assembled network
/// is invalid.
pub fn sample_return_spacecraft(flags: &CaseFlags) -> Result<Network, PrefabError> {
    let mut builder = NetworkBuilder::new();
    let [
        radiators,
        structure,
        electronics,
        solar_arrays,
        sample_box,
        propellant_tanks,
        engines,
        antenna,
    ] = sample_return_components(flags)?.map(|component| builder.add_component(component));

    builder.link(radiators, structure, plain(20.0)?);
    builder.link(radiators, sample_box, switch(20.0, 0.0, 160.0)?);
    builder.link(structure, electronics, switch(20.0, 280.0, 310.0)?);
    builder.link(structure, solar_arrays, switch(30.0, 250.0, 350.0)?);
    builder.link(structure, sample_box, switch(20.0, 0.0, 150.0)?);
    builder.link(structure, propellant_tanks, switch(10.0, 288.0, 400.0)?);
    builder.link(structure, engines, switch(10.0, 250.0, 300.0)?);
    builder.link(structure, antenna, switch(20.0, 250.0, 330.0)?);

    if flags.active_cooling {
        builder.pump(sample_box, radiators, Power::new::<watt>(ACTIVE_COOLING_POWER));
    }

    Ok(builder.build()?)
}

fn plain(conductance: f64) -> Result<ThermalLink, ConstraintError> {
    ThermalLink::plain(ThermalConductance::new::<watt_per_kelvin>(conductance))
}

fn switch(
    conductance: f64,
    cool_limit: f64,
    heat_limit: f64,
) -> Result<ThermalLink, ConstraintError> {
    ThermalLink::switch(
        ThermalConductance::new::<watt_per_kelvin>(conductance),
        ThermodynamicTemperature::new::<kelvin>(cool_limit),
        ThermodynamicTemperature::new::<kelvin>(heat_limit),
        SWITCH_ATTENUATION,
    )
}
