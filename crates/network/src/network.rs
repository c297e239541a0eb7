use ndarray::Array2;
use thiserror::Error;
use uom::si::{f64::Power, power::watt};

use crate::{
    component::Component,
    constraint::{Constraint, ConstraintError},
    link::ThermalLink,
    state::ThermalState,
};

/// Relative tolerance when checking `transport[i][j] == -transport[j][i]`.
const SKEW_TOLERANCE: f64 = 1e-12;

/// A network could not be assembled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    #[error("{matrix} matrix is {rows}x{cols} but there are {components} components")]
    DimensionMismatch {
        matrix: &'static str,
        rows: usize,
        cols: usize,
        components: usize,
    },

    #[error("link ({i}, {j}) differs from link ({j}, {i})")]
    AsymmetricLink { i: usize, j: usize },

    #[error("transport ({i}, {j}) = {forward} W is not the negative of ({j}, {i}) = {backward} W")]
    TransportNotSkewSymmetric {
        i: usize,
        j: usize,
        forward: f64,
        backward: f64,
    },

    #[error("transport ({i}, {j}) is not finite")]
    NonFiniteTransport { i: usize, j: usize },

    #[error("component {0} cannot be coupled to itself")]
    SelfCoupling(usize),

    #[error("no component with index {index} in a network of {len}")]
    UnknownComponent { index: usize, len: usize },

    #[error("invalid pump between components {from} and {to}: {source}")]
    InvalidPump {
        from: usize,
        to: usize,
        #[source]
        source: ConstraintError,
    },
}

/// Index of a component within a network, handed out by [`NetworkBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(usize);

impl ComponentId {
    /// Position of the component in the state vector.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Components plus the conductive and forced-transport couplings between them.
///
/// Component order fixes the layout of the state vector. Both coupling
/// matrices are `N×N`; links are symmetric and transport is skew-symmetric,
/// with `transport[i][j]` the power pumped into `i` from `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    components: Vec<Component>,
    links: Array2<ThermalLink>,
    transport: Array2<f64>,
}

impl Network {
    /// Assembles a network from explicit matrices.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] if either matrix is not `N×N`, the link
    /// matrix is not symmetric, or the transport matrix is not finite and
    /// skew-symmetric.
    pub fn new(
        components: Vec<Component>,
        links: Array2<ThermalLink>,
        transport: Array2<f64>,
    ) -> Result<Self, NetworkError> {
        let n = components.len();

        for (matrix, (rows, cols)) in [("link", links.dim()), ("transport", transport.dim())] {
            if rows != n || cols != n {
                return Err(NetworkError::DimensionMismatch {
                    matrix,
                    rows,
                    cols,
                    components: n,
                });
            }
        }

        for i in 0..n {
            for j in i..n {
                if links[[i, j]] != links[[j, i]] {
                    return Err(NetworkError::AsymmetricLink { i, j });
                }

                let forward = transport[[i, j]];
                let backward = transport[[j, i]];
                if !forward.is_finite() {
                    return Err(NetworkError::NonFiniteTransport { i, j });
                }
                if !backward.is_finite() {
                    return Err(NetworkError::NonFiniteTransport { i: j, j: i });
                }
                let scale = forward.abs().max(backward.abs()).max(1.0);
                if (forward + backward).abs() > SKEW_TOLERANCE * scale {
                    return Err(NetworkError::TransportNotSkewSymmetric {
                        i,
                        j,
                        forward,
                        backward,
                    });
                }
            }
        }

        Ok(Self {
            components,
            links,
            transport,
        })
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// The link between components `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn link(&self, i: usize, j: usize) -> &ThermalLink {
        &self.links[[i, j]]
    }

    /// Power pumped into component `i` from component `j`, in W.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn transport(&self, i: usize, j: usize) -> f64 {
        self.transport[[i, j]]
    }

    pub fn links(&self) -> &Array2<ThermalLink> {
        &self.links
    }

    pub fn transport_matrix(&self) -> &Array2<f64> {
        &self.transport
    }

    /// Current component temperatures in K, in network order.
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(Component::temperature)
    }

    /// Component heat capacities in J/K, in network order.
    pub fn thermal_inertias(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(Component::thermal_inertia)
    }

    pub fn component_names(&self) -> Vec<String> {
        self.components.iter().map(|c| c.name().to_owned()).collect()
    }

    /// The state to start integrating from: current temperatures and zero
    /// accumulated energy.
    pub fn initial_state(&self) -> ThermalState {
        ThermalState::from_temperatures(self.temperatures())
    }

    /// Overwrites the component temperatures, in network order.
    pub(crate) fn sync_temperatures(&mut self, temperatures: &[f64]) {
        debug_assert_eq!(temperatures.len(), self.components.len());

        for (component, &t) in self.components.iter_mut().zip(temperatures) {
            component.set_temperature(t);
        }
    }
}

/// Incrementally assembles a [`Network`].
///
/// Pairs that are never linked carry no conduction. Linking a pair twice
/// keeps the later link. Pumps between the same pair add up.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    components: Vec<Component>,
    links: Vec<(ComponentId, ComponentId, ThermalLink)>,
    pumps: Vec<(ComponentId, ComponentId, Power)>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a component and returns its id.
    pub fn add_component(&mut self, component: Component) -> ComponentId {
        self.components.push(component);
        ComponentId(self.components.len() - 1)
    }

    /// Couples `a` and `b` through `link`, in both directions.
    pub fn link(&mut self, a: ComponentId, b: ComponentId, link: ThermalLink) -> &mut Self {
        self.links.push((a, b, link));
        self
    }

    /// Pumps `power` from `from` into `to`.
    pub fn pump(&mut self, from: ComponentId, to: ComponentId, power: Power) -> &mut Self {
        self.pumps.push((from, to, power));
        self
    }

    /// Validates the couplings and builds the network.
    ///
    /// # Errors
    ///
    /// Returns a [`NetworkError`] if a coupling names an unknown component or
    /// couples a component to itself, or if a pump power is negative or not
    /// finite.
    pub fn build(self) -> Result<Network, NetworkError> {
        let n = self.components.len();
        let check = |id: ComponentId| {
            if id.0 < n {
                Ok(id.0)
            } else {
                Err(NetworkError::UnknownComponent { index: id.0, len: n })
            }
        };

        let mut links = Array2::from_elem((n, n), ThermalLink::NONE);
        for (a, b, link) in &self.links {
            let (i, j) = (check(*a)?, check(*b)?);
            if i == j {
                return Err(NetworkError::SelfCoupling(i));
            }
            links[[i, j]] = *link;
            links[[j, i]] = *link;
        }

        let mut transport: Array2<f64> = Array2::zeros((n, n));
        for (from, to, power) in &self.pumps {
            let (from, to) = (check(*from)?, check(*to)?);
            if from == to {
                return Err(NetworkError::SelfCoupling(from));
            }
            let power = Constraint::NonNegative
                .check("pump power", power.get::<watt>())
                .map_err(|source| NetworkError::InvalidPump { from, to, source })?;
            transport[[to, from]] += power;
            transport[[from, to]] -= power;
        }

        tracing::debug!(
            components = n,
            links = self.links.len(),
            pumps = self.pumps.len(),
            "assembled thermal network"
        );

        Network::new(self.components, links, transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;
    use uom::si::{
        area::square_meter,
        f64::{Area, Mass, SpecificHeatCapacity, ThermalConductance, ThermodynamicTemperature},
        mass::kilogram,
        specific_heat_capacity::joule_per_kilogram_kelvin,
        thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::kelvin,
    };

    use crate::component::{ComponentConfig, Heater};

    fn body(name: &str, temperature: f64) -> Component {
        Component::new(ComponentConfig {
            name: name.into(),
            mass: Mass::new::<kilogram>(50.0),
            specific_heat_capacity: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(890.0),
            radiative_area: Area::new::<square_meter>(0.0),
            emissivity: 0.0,
            temperature: ThermodynamicTemperature::new::<kelvin>(temperature),
            illumination_factor: 0.0,
            innate_power: Power::new::<watt>(0.0),
            heater: Heater::NONE,
        })
        .unwrap()
    }

    fn plain(g: f64) -> ThermalLink {
        ThermalLink::plain(ThermalConductance::new::<watt_per_kelvin>(g)).unwrap()
    }

    #[test]
    fn builder_mirrors_links_and_skews_pumps() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_component(body("A", 300.0));
        let b = builder.add_component(body("B", 250.0));
        builder
            .link(a, b, plain(20.0))
            .pump(b, a, Power::new::<watt>(100.0));

        let network = builder.build().unwrap();

        assert_eq!(network.len(), 2);
        assert_eq!(network.link(0, 1), network.link(1, 0));
        assert_eq!(network.link(0, 1).base_conductance(), 20.0);
        assert_eq!(network.link(0, 0), &ThermalLink::NONE);
        assert_eq!(network.transport(0, 1), 100.0);
        assert_eq!(network.transport(1, 0), -100.0);
        assert_eq!(network.component_names(), vec!["A", "B"]);
    }

    #[test]
    fn initial_state_appends_zero_accumulators() {
        let mut builder = NetworkBuilder::new();
        builder.add_component(body("A", 300.0));
        builder.add_component(body("B", 250.0));

        let state = builder.build().unwrap().initial_state();

        assert_eq!(state.as_slice(), &[300.0, 250.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn rejects_mismatched_dimensions() {
        let components = vec![body("A", 300.0), body("B", 250.0)];
        let links = Array2::from_elem((3, 3), ThermalLink::NONE);

        let err = Network::new(components, links, Array2::zeros((2, 2))).unwrap_err();

        assert!(matches!(
            err,
            NetworkError::DimensionMismatch { matrix: "link", rows: 3, .. }
        ));
    }

    #[test]
    fn rejects_asymmetric_links() {
        let components = vec![body("A", 300.0), body("B", 250.0)];
        let links = array![[ThermalLink::NONE, plain(20.0)], [plain(10.0), ThermalLink::NONE]];

        let err = Network::new(components, links, Array2::zeros((2, 2))).unwrap_err();

        assert_eq!(err, NetworkError::AsymmetricLink { i: 0, j: 1 });
    }

    #[test]
    fn rejects_transport_that_is_not_skew_symmetric() {
        let components = vec![body("A", 300.0), body("B", 250.0)];
        let links = Array2::from_elem((2, 2), ThermalLink::NONE);
        let transport = array![[0.0, 100.0], [100.0, 0.0]];

        let err = Network::new(components, links, transport).unwrap_err();

        assert!(matches!(
            err,
            NetworkError::TransportNotSkewSymmetric { i: 0, j: 1, .. }
        ));
    }

    #[test]
    fn rejects_self_coupling_and_foreign_ids() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_component(body("A", 300.0));
        builder.link(a, a, plain(1.0));
        assert_eq!(builder.build().unwrap_err(), NetworkError::SelfCoupling(0));

        let mut other = NetworkBuilder::new();
        other.add_component(body("X", 1.0));
        let foreign = other.add_component(body("Y", 1.0));

        let mut builder = NetworkBuilder::new();
        let a = builder.add_component(body("A", 300.0));
        builder.link(a, foreign, plain(1.0));
        assert_eq!(
            builder.build().unwrap_err(),
            NetworkError::UnknownComponent { index: 1, len: 1 }
        );
    }

    #[test]
    fn rejects_negative_pump_power() {
        let mut builder = NetworkBuilder::new();
        let a = builder.add_component(body("A", 300.0));
        let b = builder.add_component(body("B", 300.0));
        builder.pump(a, b, Power::new::<watt>(-5.0));

        assert!(matches!(
            builder.build().unwrap_err(),
            NetworkError::InvalidPump { from: 0, to: 1, .. }
        ));
    }
}
