use crate::{
    environment::Environment,
    flags::CaseFlags,
    heat_transfer::{background_flux, conduction_flux, louvered_incident_flux},
    network::Network,
    state::{ACCUMULATOR_COUNT, PowerChannel, StateError, ThermalRate, ThermalState},
};

/// Evaluates the time derivative of a thermal state.
///
/// Writes the state's temperatures into `network`, then sums for every
/// component its innate power, heater output (when `electric_heaters` is
/// set), absorbed sunlight (louvered when `louvers` is set), background
/// exchange, conduction from every other component, and pumped transport.
/// Each heating rate is that net power divided by the component's thermal
/// inertia. The accumulator rates are the network-wide innate, heater,
/// incoming, and background powers.
///
/// `time` does not enter the physics. The function can be called in any
/// order, including repeatedly at the same or an earlier time, and does not
/// fail for any finite temperatures.
///
/// # Errors
///
/// Returns [`StateError::LengthMismatch`] if the state does not hold exactly
/// one temperature per component plus the accumulators.
///
/// # Panics
///
/// Panics if the network does not report back the temperatures just written
/// into it.
pub fn thermal_derivative(
    _time: f64,
    state: &ThermalState,
    network: &mut Network,
    environment: &Environment,
    flags: &CaseFlags,
) -> Result<ThermalRate, StateError> {
    let n = network.len();
    if state.len() != n + ACCUMULATOR_COUNT {
        return Err(StateError::LengthMismatch {
            expected: n + ACCUMULATOR_COUNT,
            actual: state.len(),
        });
    }

    let temperatures = state.temperatures();
    network.sync_temperatures(temperatures);
    assert!(
        network
            .temperatures()
            .zip(temperatures)
            .all(|(stored, &given)| stored.to_bits() == given.to_bits()),
        "network temperatures diverged from the state they were written from"
    );

    let components = network.components();
    let mut powers = [0.0; ACCUMULATOR_COUNT];
    let mut rates = Vec::with_capacity(n);

    for (i, component) in components.iter().enumerate() {
        let mut flux = component.innate_power();
        powers[PowerChannel::Innate.index()] += component.innate_power();

        if flags.electric_heaters {
            let heat = component.heater().output(component.temperature());
            flux += heat;
            powers[PowerChannel::Heater.index()] += heat;
        }

        let incoming = louvered_incident_flux(component, environment, flags.louvers);
        let background = background_flux(component, environment);
        flux += incoming + background;
        powers[PowerChannel::Incoming.index()] += incoming;
        powers[PowerChannel::Rejected.index()] += background;

        for (j, other) in components.iter().enumerate() {
            flux += conduction_flux(other, component, network.link(i, j));
            flux += network.transport(i, j);
        }

        rates.push(flux / component.thermal_inertia());
    }

    Ok(ThermalRate::new(rates, powers))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::{
            Area, HeatFluxDensity, Mass, Power, SpecificHeatCapacity, ThermalConductance,
            ThermodynamicTemperature,
        },
        heat_flux_density::watt_per_square_meter,
        mass::kilogram,
        power::watt,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::kelvin,
    };

    use crate::{
        component::{Component, ComponentConfig, Heater},
        heat_transfer::{STEFAN_BOLTZMANN, incident_flux},
        link::ThermalLink,
        network::NetworkBuilder,
    };

    fn k(value: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<kelvin>(value)
    }

    fn w(value: f64) -> Power {
        Power::new::<watt>(value)
    }

    fn g(value: f64) -> ThermalConductance {
        ThermalConductance::new::<watt_per_kelvin>(value)
    }

    /// 50 kg of aluminium with no radiative area, heaters, or generation.
    fn inert(name: &str, temperature: f64) -> ComponentConfig {
        ComponentConfig {
            name: name.into(),
            mass: Mass::new::<kilogram>(50.0),
            specific_heat_capacity: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(890.0),
            radiative_area: Area::new::<square_meter>(0.0),
            emissivity: 0.0,
            temperature: k(temperature),
            illumination_factor: 0.0,
            innate_power: w(0.0),
            heater: Heater::NONE,
        }
    }

    fn dark() -> Environment {
        Environment::new("Dark", HeatFluxDensity::new::<watt_per_square_meter>(0.0), k(2.7))
            .unwrap()
    }

    fn sunlit() -> Environment {
        Environment::new(
            "Earth",
            HeatFluxDensity::new::<watt_per_square_meter>(1400.0),
            k(2.7),
        )
        .unwrap()
    }

    fn two_body() -> Network {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_component(Component::new(inert("A", 300.0)).unwrap());
        let b = builder.add_component(Component::new(inert("B", 250.0)).unwrap());
        builder.link(a, b, ThermalLink::plain(g(20.0)).unwrap());
        builder.build().unwrap()
    }

    #[test]
    fn two_body_conduction_matches_hand_calculation() {
        let mut network = two_body();
        let state = network.initial_state();

        let rate =
            thermal_derivative(0.0, &state, &mut network, &dark(), &CaseFlags::NONE).unwrap();

        let expected = 20.0 * (250.0 - 300.0) / (50.0 * 890.0);
        assert_relative_eq!(rate.temperature_rates()[0], expected);
        assert_relative_eq!(rate.temperature_rates()[1], -expected);
        for channel in PowerChannel::ALL {
            assert_eq!(rate.power(channel), 0.0);
        }
    }

    #[test]
    fn plain_conduction_conserves_energy() {
        let mut builder = NetworkBuilder::new();
        let ids: Vec<_> = [310.0, 250.0, 180.0, 400.0]
            .into_iter()
            .enumerate()
            .map(|(i, t)| builder.add_component(Component::new(inert(&i.to_string(), t)).unwrap()))
            .collect();
        builder
            .link(ids[0], ids[1], ThermalLink::plain(g(20.0)).unwrap())
            .link(ids[1], ids[2], ThermalLink::plain(g(5.0)).unwrap())
            .link(ids[0], ids[3], ThermalLink::plain(g(12.5)).unwrap());
        let mut network = builder.build().unwrap();
        let state = network.initial_state();

        let rate =
            thermal_derivative(0.0, &state, &mut network, &dark(), &CaseFlags::NONE).unwrap();

        let net_power: f64 = rate
            .temperature_rates()
            .iter()
            .zip(network.thermal_inertias())
            .map(|(dt, c)| dt * c)
            .sum();
        assert_relative_eq!(net_power, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn writes_state_temperatures_into_network() {
        let mut network = two_body();
        let state = ThermalState::from_values(vec![280.0, 270.0, 1.0, 2.0, 3.0, 4.0]).unwrap();

        let rate =
            thermal_derivative(5.0, &state, &mut network, &dark(), &CaseFlags::NONE).unwrap();

        assert_eq!(network.temperatures().collect::<Vec<_>>(), vec![280.0, 270.0]);
        assert_relative_eq!(rate.temperature_rates()[0], 20.0 * -10.0 / (50.0 * 890.0));
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        let mut network = two_body();
        let env = sunlit();
        let flags = CaseFlags {
            electric_heaters: true,
            louvers: true,
            ..CaseFlags::NONE
        };
        let state = ThermalState::from_values(vec![290.0, 260.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        let other = ThermalState::from_values(vec![100.0, 500.0, 0.0, 0.0, 0.0, 0.0]).unwrap();

        let first = thermal_derivative(0.0, &state, &mut network, &env, &flags).unwrap();
        // Disturb the stored temperatures, then evaluate at an earlier time.
        thermal_derivative(10.0, &other, &mut network, &env, &flags).unwrap();
        let second = thermal_derivative(-3.0, &state, &mut network, &env, &flags).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn heater_adds_power_only_below_set_point() {
        let heater = Heater::new(w(100.0), k(293.0)).unwrap();
        let mut builder = NetworkBuilder::new();
        builder.add_component(
            Component::new(ComponentConfig {
                heater,
                ..inert("Tank", 280.0)
            })
            .unwrap(),
        );
        let mut network = builder.build().unwrap();
        let heaters_on = CaseFlags {
            electric_heaters: true,
            ..CaseFlags::NONE
        };

        let cold = ThermalState::from_temperatures([280.0]);
        let rate = thermal_derivative(0.0, &cold, &mut network, &dark(), &heaters_on).unwrap();
        assert_eq!(rate.power(PowerChannel::Heater), 100.0);
        assert_relative_eq!(rate.temperature_rates()[0], 100.0 / (50.0 * 890.0));

        let at_set_point = ThermalState::from_temperatures([293.0]);
        let rate =
            thermal_derivative(0.0, &at_set_point, &mut network, &dark(), &heaters_on).unwrap();
        assert_eq!(rate.power(PowerChannel::Heater), 0.0);

        let rate =
            thermal_derivative(0.0, &cold, &mut network, &dark(), &CaseFlags::NONE).unwrap();
        assert_eq!(rate.power(PowerChannel::Heater), 0.0);
    }

    #[test]
    fn louvers_cut_incident_but_not_background() {
        let config = ComponentConfig {
            radiative_area: Area::new::<square_meter>(5.0),
            emissivity: 0.9,
            illumination_factor: 0.5,
            heater: Heater::new(w(0.0), k(273.0)).unwrap(),
            ..inert("Panel", 300.0)
        };
        let panel = Component::new(config.clone()).unwrap();
        let mut builder = NetworkBuilder::new();
        builder.add_component(Component::new(config).unwrap());
        let mut network = builder.build().unwrap();
        let env = sunlit();
        let state = network.initial_state();
        let louvered = CaseFlags {
            louvers: true,
            ..CaseFlags::NONE
        };

        let open = thermal_derivative(0.0, &state, &mut network, &env, &CaseFlags::NONE).unwrap();
        let closed = thermal_derivative(0.0, &state, &mut network, &env, &louvered).unwrap();

        let full = incident_flux(&panel, &env);
        assert_relative_eq!(open.power(PowerChannel::Incoming), full);
        assert_relative_eq!(closed.power(PowerChannel::Incoming), full / 10.0);
        assert_eq!(
            open.power(PowerChannel::Rejected),
            closed.power(PowerChannel::Rejected)
        );
        assert_relative_eq!(
            closed.power(PowerChannel::Rejected),
            STEFAN_BOLTZMANN * 5.0 * 0.9 * (2.7_f64.powi(4) - 300.0_f64.powi(4))
        );
    }

    #[test]
    fn innate_power_and_transport_enter_the_balance() {
        let mut builder = NetworkBuilder::new();
        let radiator = builder.add_component(Component::new(inert("Radiator", 250.0)).unwrap());
        let sample_box = builder.add_component(
            Component::new(ComponentConfig {
                innate_power: w(10.0),
                ..inert("Box", 180.0)
            })
            .unwrap(),
        );
        builder.pump(sample_box, radiator, w(100.0));
        let mut network = builder.build().unwrap();
        let state = network.initial_state();

        let rate =
            thermal_derivative(0.0, &state, &mut network, &dark(), &CaseFlags::NONE).unwrap();

        let inertia = 50.0 * 890.0;
        assert_relative_eq!(rate.temperature_rates()[0], 100.0 / inertia);
        assert_relative_eq!(rate.temperature_rates()[1], (10.0 - 100.0) / inertia);
        assert_eq!(rate.power(PowerChannel::Innate), 10.0);
    }

    #[test]
    fn rejects_state_of_wrong_length() {
        let mut network = two_body();
        let state = ThermalState::from_temperatures([300.0]);

        let err = thermal_derivative(0.0, &state, &mut network, &dark(), &CaseFlags::NONE)
            .unwrap_err();

        assert_eq!(
            err,
            StateError::LengthMismatch {
                expected: 6,
                actual: 5
            }
        );
    }
}
