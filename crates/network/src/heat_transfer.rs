//! Heat-transfer primitives.
//!
//! Every function returns a power in W, positive when heat flows into the
//! component it is evaluated for.

use crate::{component::Component, environment::Environment, link::ThermalLink};

/// Stefan–Boltzmann constant in W/(m²·K⁴).
pub const STEFAN_BOLTZMANN: f64 = 5.670_374_419e-8;

/// Factor by which closed louvers cut absorbed sunlight.
pub const LOUVER_ATTENUATION: f64 = 10.0;

/// Sunlight absorbed over the illuminated part of the radiative area.
///
/// Never negative.
pub fn incident_flux(component: &Component, environment: &Environment) -> f64 {
    environment.incident_radiative_flux()
        * component.radiative_area()
        * component.illumination_factor()
        * component.emissivity()
}

/// Net radiative exchange with the background.
///
/// Negative when the component is warmer than the background.
pub fn background_flux(component: &Component, environment: &Environment) -> f64 {
    let t_bg = environment.background_temperature();
    let t = component.temperature();

    STEFAN_BOLTZMANN
        * component.radiative_area()
        * component.emissivity()
        * (t_bg.powi(4) - t.powi(4))
}

/// [`incident_flux`] after louvers, if fitted, have closed.
///
/// Louvers close on a component warmer than its heater set point.
pub fn louvered_incident_flux(
    component: &Component,
    environment: &Environment,
    louvers: bool,
) -> f64 {
    let flux = incident_flux(component, environment);

    if louvers && component.temperature() > component.heater().set_temp() && flux > 0.0 {
        flux / LOUVER_ATTENUATION
    } else {
        flux
    }
}

/// Heat conducted from `other` into `this` through `link`.
///
/// The link is resolved from `this` component's side.
pub fn conduction_flux(other: &Component, this: &Component, link: &ThermalLink) -> f64 {
    let g = link.resolve(this.temperature(), other.temperature());
    g * (other.temperature() - this.temperature())
}
