//! Running trade cases against destinations.

use std::{fmt, time::Instant};

use rayon::prelude::*;
use spacetherm_core::Observer;
use spacetherm_network::{
    CaseFlags, ConstraintError, PowerSummary, SpacecraftModel, StateError, SummaryError,
    ThermalInput, ThermalProblem, ThermalRate, Trajectory,
};
use spacetherm_observers::ProgressLog;
use spacetherm_solvers::transient::{self, Solution, Status, dopri5, euler};
use thiserror::Error;

use crate::{
    cases::Case,
    config::{ConfigError, Method, SimulationConfig},
    environments::Destination,
    spacecraft::{PrefabError, sample_return_spacecraft},
};

/// One case flown at one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub destination: Destination,
    pub case: Case,
}

impl Scenario {
    pub fn new(destination: Destination, case: Case) -> Self {
        Self { destination, case }
    }

    /// `"<destination> - <case>"`, used in logs and plot titles.
    pub fn label(&self) -> String {
        format!("{} - {}", self.destination, self.case.name)
    }
}

/// Pairs every destination with every case, destination-major.
pub fn scenarios(destinations: &[Destination], cases: &[Case]) -> Vec<Scenario> {
    destinations
        .iter()
        .flat_map(|&destination| {
            cases
                .iter()
                .map(move |case| Scenario::new(destination, case.clone()))
        })
        .collect()
}

/// A scenario could not be run to a summary.
#[derive(Debug, Error)]
#[error("scenario `{label}` failed")]
pub struct ScenarioError {
    pub label: String,
    #[source]
    pub kind: ScenarioErrorKind,
}

#[derive(Debug, Error)]
pub enum ScenarioErrorKind {
    #[error("could not build the spacecraft")]
    Prefab(#[from] PrefabError),

    #[error("could not build the environment")]
    Environment(#[from] ConstraintError),

    #[error("invalid simulation settings")]
    Config(#[from] ConfigError),

    #[error("integration failed")]
    Solver(#[from] transient::Error),

    #[error("solver history does not match the network")]
    State(#[from] StateError),

    #[error("could not summarise powers")]
    Summary(#[from] SummaryError),
}

/// Everything a finished scenario produced.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub environment: String,
    pub flags: CaseFlags,
    pub trajectory: Trajectory,
    pub summary: PowerSummary,
    /// Accepted solver steps, excluding the initial condition.
    pub steps: usize,
    pub status: Status,
}

impl ScenarioResult {
    pub fn case_name(&self) -> &str {
        &self.scenario.case.name
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.scenario.label())?;
        write!(f, "{}", self.summary)
    }
}

/// Runs one scenario with the configured [`Method`], logging solver
/// progress at `debug`.
///
/// # Errors
///
/// Returns a [`ScenarioError`] naming the scenario if any stage fails.
pub fn run(scenario: &Scenario, config: &SimulationConfig) -> Result<ScenarioResult, ScenarioError> {
    match config.method {
        Method::Dopri5 => {
            let mut progress = ProgressLog::new(scenario.label(), config.t_end);
            let result = run_observed(scenario, config, &mut progress)?;
            tracing::trace!(
                scenario = %scenario.label(),
                rejected = progress.rejected(),
                "rejected steps"
            );
            Ok(result)
        }
        Method::Euler => run_euler(scenario, config),
    }
}

/// Runs one scenario with Dormand–Prince and a caller-supplied observer.
///
/// The observer may stop the solver early. The result is still summarised
/// from the steps taken, with [`Status::StoppedByObserver`].
///
/// # Errors
///
/// Returns a [`ScenarioError`] naming the scenario if any stage fails.
pub fn run_observed<Obs>(
    scenario: &Scenario,
    config: &SimulationConfig,
    observer: Obs,
) -> Result<ScenarioResult, ScenarioError>
where
    Obs: Observer<dopri5::Event<ThermalInput, ThermalRate>, dopri5::Action>,
{
    let span = scenario_span(scenario);
    let _entered = span.enter();

    let attempt = || -> Result<ScenarioResult, ScenarioErrorKind> {
        let model = build_model(scenario)?;
        tracing::info!(t_end = config.t_end, method = %Method::Dopri5, "scenario started");
        let started = Instant::now();

        let solution = dopri5::solve(
            &model,
            &ThermalProblem,
            model.initial_input(),
            config.t_end,
            &config.solver_config(),
            observer,
        )?;
        summarise(scenario, &model, solution, started)
    };

    attempt().map_err(|kind| ScenarioError {
        label: scenario.label(),
        kind,
    })
}

/// Runs one scenario with fixed-step forward Euler.
///
/// The step is [`SimulationConfig::euler_step`], shortened so the last step
/// lands on `t_end`.
///
/// # Errors
///
/// Returns a [`ScenarioError`] naming the scenario if any stage fails.
pub fn run_euler(
    scenario: &Scenario,
    config: &SimulationConfig,
) -> Result<ScenarioResult, ScenarioError> {
    let span = scenario_span(scenario);
    let _entered = span.enter();

    let attempt = || -> Result<ScenarioResult, ScenarioErrorKind> {
        let (dt, steps) = config.euler_schedule()?;
        let model = build_model(scenario)?;
        tracing::info!(t_end = config.t_end, method = %Method::Euler, dt, steps, "scenario started");
        let started = Instant::now();

        let report_every = (steps / 10).max(1);
        let progress = |event: &euler::Event<ThermalInput, ThermalRate>| -> Option<euler::Action> {
            if event.step % report_every == 0 {
                tracing::debug!(
                    elapsed = event.snapshot.input.time,
                    step = event.step,
                    steps,
                    "integration progress"
                );
            }
            None
        };

        let solution = euler::solve(
            &model,
            &ThermalProblem,
            model.initial_input(),
            dt,
            steps,
            progress,
        )?;
        summarise(scenario, &model, solution, started)
    };

    attempt().map_err(|kind| ScenarioError {
        label: scenario.label(),
        kind,
    })
}

fn scenario_span(scenario: &Scenario) -> tracing::Span {
    tracing::info_span!(
        "scenario",
        environment = scenario.destination.name(),
        case = %scenario.case.name,
    )
}

fn build_model(scenario: &Scenario) -> Result<SpacecraftModel, ScenarioErrorKind> {
    let network = sample_return_spacecraft(&scenario.case.flags)?;
    let environment = scenario.destination.environment()?;
    Ok(SpacecraftModel::new(network, environment, scenario.case.flags))
}

fn summarise(
    scenario: &Scenario,
    model: &SpacecraftModel,
    solution: Solution<ThermalInput, ThermalRate>,
    started: Instant,
) -> Result<ScenarioResult, ScenarioErrorKind> {
    let trajectory = Trajectory::from_history(model.component_names(), &solution.history)?;
    let summary = trajectory.power_summary()?;

    tracing::info!(
        steps = solution.steps,
        samples = trajectory.len(),
        status = ?solution.status,
        wall_s = started.elapsed().as_secs_f64(),
        "scenario finished"
    );

    Ok(ScenarioResult {
        environment: model.environment().name().to_owned(),
        flags: scenario.case.flags,
        scenario: scenario.clone(),
        trajectory,
        summary,
        steps: solution.steps,
        status: solution.status,
    })
}

/// Runs every scenario, fanning out across threads unless `parallel` is
/// false. Results keep the input order.
///
/// # Errors
///
/// Returns the first failing scenario's error.
pub fn run_all(
    scenarios: &[Scenario],
    config: &SimulationConfig,
    parallel: bool,
) -> Result<Vec<ScenarioResult>, ScenarioError> {
    tracing::info!(count = scenarios.len(), parallel, "running scenarios");

    if parallel {
        scenarios
            .par_iter()
            .map(|scenario| run(scenario, config))
            .collect()
    } else {
        scenarios
            .iter()
            .map(|scenario| run(scenario, config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use spacetherm_network::PowerChannel;

    use crate::cases::{self, TradeStudy};

    #[test]
    fn scenarios_are_destination_major() {
        let cases = TradeStudy::Nominal.cases();
        let list = scenarios(&Destination::ALL, &cases);

        assert_eq!(list.len(), 6);
        assert_eq!(list[0].destination, Destination::Enceladus);
        assert_eq!(list[1].destination, Destination::Enceladus);
        assert_eq!(list[2].destination, Destination::Venus);
        assert_eq!(list[1].case.name, "electronics on");
        assert_eq!(list[5].label(), "Earth - electronics on");
    }

    #[test]
    fn short_run_produces_a_summary() {
        let scenario = Scenario::new(Destination::Earth, Case::new("Nothing", cases::NOTHING));
        let config = SimulationConfig {
            t_end: 100.0,
            ..SimulationConfig::default()
        };

        let result = run(&scenario, &config).unwrap();

        assert_eq!(result.status, Status::Complete);
        assert_eq!(result.environment, "Earth");
        assert_relative_eq!(*result.trajectory.times().last().unwrap(), 100.0);
        assert!(result.trajectory.len() >= 2);
        // No radiators, RHUs or electronics: only the antenna draws power.
        assert_relative_eq!(
            result.summary.power(PowerChannel::Innate),
            30.0,
            max_relative = 1e-6
        );
    }

    #[test]
    fn observer_can_cut_a_run_short() {
        let scenario = Scenario::new(Destination::Venus, Case::new("Nothing", cases::NOTHING));
        let config = SimulationConfig {
            t_end: 1.0e4,
            max_step: Some(100.0),
            ..SimulationConfig::default()
        };

        let mut accepted = 0;
        let stop_after_three = |event: &dopri5::Event<ThermalInput, ThermalRate>| {
            if matches!(event, dopri5::Event::Accepted { .. }) {
                accepted += 1;
            }
            (accepted > 3).then_some(dopri5::Action::StopEarly)
        };

        let result = run_observed(&scenario, &config, stop_after_three).unwrap();

        assert_eq!(result.status, Status::StoppedByObserver);
        assert!(result.trajectory.times().last().unwrap() < &1.0e4);
    }

    #[test]
    fn euler_method_lands_on_end_time() {
        let scenario = Scenario::new(Destination::Earth, Case::new("Nothing", cases::NOTHING));
        let config = SimulationConfig {
            t_end: 95.0,
            method: Method::Euler,
            euler_step: 10.0,
            ..SimulationConfig::default()
        };

        let result = run(&scenario, &config).unwrap();

        assert_eq!(result.status, Status::Complete);
        assert_eq!(result.steps, 10);
        assert_eq!(result.trajectory.len(), 11);
        assert_relative_eq!(*result.trajectory.times().last().unwrap(), 95.0);
        assert_relative_eq!(
            result.summary.power(PowerChannel::Innate),
            30.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn euler_and_dopri5_agree_on_a_short_run() {
        let scenario = Scenario::new(
            Destination::Venus,
            Case::new("Nothing", cases::NOTHING),
        );
        let adaptive = SimulationConfig {
            t_end: 200.0,
            abs_tol: 1e-6,
            rel_tol: 1e-6,
            ..SimulationConfig::default()
        };
        let fixed = SimulationConfig {
            method: Method::Euler,
            euler_step: 0.1,
            ..adaptive
        };

        let adaptive = run(&scenario, &adaptive).unwrap();
        let fixed = run(&scenario, &fixed).unwrap();

        let a = adaptive.trajectory.final_temperatures().unwrap();
        let b = fixed.trajectory.final_temperatures().unwrap();
        for (a, b) in a.iter().zip(b) {
            assert_relative_eq!(*a, *b, max_relative = 1e-4);
        }
    }

    #[test]
    fn invalid_euler_step_names_the_scenario() {
        let scenario = Scenario::new(Destination::Earth, Case::new("Nothing", cases::NOTHING));
        let config = SimulationConfig {
            method: Method::Euler,
            euler_step: -1.0,
            ..SimulationConfig::default()
        };

        let err = run(&scenario, &config).unwrap_err();

        assert_eq!(err.label, "Earth - Nothing");
        assert!(matches!(
            err.kind,
            ScenarioErrorKind::Config(ConfigError::InvalidEulerStep(_))
        ));
    }

    #[test]
    fn serial_and_parallel_agree() {
        let list = scenarios(
            &[Destination::Enceladus, Destination::Venus],
            &[Case::new("Nothing with RHUs", cases::NOTHING_WITH_RHUS)],
        );
        let config = SimulationConfig {
            t_end: 50.0,
            ..SimulationConfig::default()
        };

        let serial = run_all(&list, &config, false).unwrap();
        let parallel = run_all(&list, &config, true).unwrap();

        assert_eq!(serial.len(), 2);
        for (a, b) in serial.iter().zip(&parallel) {
            assert_eq!(a.scenario, b.scenario);
            assert_eq!(a.trajectory.times(), b.trajectory.times());
        }
    }

    #[test]
    fn errors_name_the_scenario() {
        let scenario = Scenario::new(Destination::Earth, Case::new("Nothing", cases::NOTHING));
        let config = SimulationConfig {
            t_end: f64::NAN,
            ..SimulationConfig::default()
        };

        let err = run(&scenario, &config).unwrap_err();

        assert_eq!(err.label, "Earth - Nothing");
        assert!(matches!(err.kind, ScenarioErrorKind::Solver(_)));
    }
}
