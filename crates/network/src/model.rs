use std::{cell::RefCell, convert::Infallible};

use spacetherm_core::{DerivativeOf, Model, OdeProblem};

use crate::{
    derivative::thermal_derivative,
    environment::Environment,
    flags::CaseFlags,
    network::Network,
    state::{StateError, ThermalRate, ThermalState},
};

/// Input to a [`SpacecraftModel`]: elapsed time in s and the full state.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalInput {
    pub time: f64,
    pub state: ThermalState,
}

/// A spacecraft in an environment, evaluated as a [`Model`].
///
/// The model owns its network and writes every evaluated state into it, so
/// it is not `Sync`. Build one model per scenario and thread.
#[derive(Debug)]
pub struct SpacecraftModel {
    network: RefCell<Network>,
    environment: Environment,
    flags: CaseFlags,
}

impl SpacecraftModel {
    pub fn new(network: Network, environment: Environment, flags: CaseFlags) -> Self {
        Self {
            network: RefCell::new(network),
            environment,
            flags,
        }
    }

    /// The input at `t = 0`, seeded from the network's current temperatures.
    pub fn initial_input(&self) -> ThermalInput {
        ThermalInput {
            time: 0.0,
            state: self.network.borrow().initial_state(),
        }
    }

    pub fn component_names(&self) -> Vec<String> {
        self.network.borrow().component_names()
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn flags(&self) -> &CaseFlags {
        &self.flags
    }

    /// Releases the network, holding the temperatures last evaluated.
    pub fn into_network(self) -> Network {
        self.network.into_inner()
    }
}

impl Model for SpacecraftModel {
    type Input = ThermalInput;
    type Output = ThermalRate;
    type Error = StateError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        thermal_derivative(
            input.time,
            &input.state,
            &mut self.network.borrow_mut(),
            &self.environment,
            &self.flags,
        )
    }
}

/// Integrates a [`SpacecraftModel`] over time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalProblem;

impl OdeProblem for ThermalProblem {
    type Input = ThermalInput;
    type Output = ThermalRate;
    type Delta = f64;
    type State = ThermalState;
    type Error = Infallible;

    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error> {
        Ok(input.state.clone())
    }

    fn derivative(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error> {
        Ok(output.clone())
    }

    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(ThermalInput {
            time: base.time + delta,
            state: state.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{
            Area, HeatFluxDensity, Mass, Power, SpecificHeatCapacity, ThermodynamicTemperature,
        },
        heat_flux_density::watt_per_square_meter,
        mass::kilogram,
        power::watt,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermodynamic_temperature::kelvin,
    };

    use crate::{
        component::{Component, ComponentConfig, Heater},
        network::NetworkBuilder,
        state::PowerChannel,
    };

    fn single_body() -> SpacecraftModel {
        let mut builder = NetworkBuilder::new();
        builder.add_component(
            Component::new(ComponentConfig {
                name: "Electronics".into(),
                mass: Mass::new::<kilogram>(100.0),
                specific_heat_capacity: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(
                    890.0,
                ),
                radiative_area: Area::new::<square_meter>(0.0),
                emissivity: 0.0,
                temperature: ThermodynamicTemperature::new::<kelvin>(293.0),
                illumination_factor: 0.0,
                innate_power: Power::new::<watt>(400.0),
                heater: Heater::NONE,
            })
            .unwrap(),
        );
        let env = Environment::new(
            "Dark",
            HeatFluxDensity::new::<watt_per_square_meter>(0.0),
            ThermodynamicTemperature::new::<kelvin>(2.7),
        )
        .unwrap();

        SpacecraftModel::new(builder.build().unwrap(), env, CaseFlags::NONE)
    }

    #[test]
    fn initial_input_starts_at_zero() {
        let model = single_body();

        let input = model.initial_input();

        assert_eq!(input.time, 0.0);
        assert_eq!(input.state.as_slice(), &[293.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(model.component_names(), vec!["Electronics"]);
    }

    #[test]
    fn call_evaluates_the_derivative() {
        let model = single_body();

        let rate = model.call(&model.initial_input()).unwrap();

        assert_relative_eq!(rate.temperature_rates()[0], 400.0 / (100.0 * 890.0));
        assert_eq!(rate.power(PowerChannel::Innate), 400.0);
    }

    #[test]
    fn build_input_advances_time() {
        let base = ThermalInput {
            time: 100.0,
            state: ThermalState::from_temperatures([293.0]),
        };
        let stepped = ThermalState::from_temperatures([294.0]);

        let next = ThermalProblem.build_input(&base, &stepped, &25.0).unwrap();

        assert_eq!(next.time, 125.0);
        assert_eq!(next.state, stepped);
    }
}
