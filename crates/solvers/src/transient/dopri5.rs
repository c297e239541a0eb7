//! Adaptive Dormand–Prince 5(4) solver for ODE problems.
//!
//! An explicit embedded Runge–Kutta method that computes fifth- and
//! fourth-order solutions from the same seven stages. Their difference
//! estimates the local truncation error, and the step size is adjusted to keep
//! that error within `abs_tol + rel_tol * |state|` for every component. The
//! fifth-order solution is propagated.
//!
//! The derivative of the last stage is reused as the first stage of the next
//! step, so an accepted step costs six model calls.
//!
//! Rejected steps are retried from the same input. Models therefore see trial
//! states that never make it into the history, possibly at times earlier than
//! a trial they already evaluated.
//!
//! # Example
//!
//! ```ignore
//! use spacetherm_solvers::transient::dopri5::{self, Config};
//!
//! let config = Config { abs_tol: 1e-2, ..Config::default() };
//! let solution = dopri5::solve_unobserved(&model, &problem, initial_input, 1.0e6, &config)?;
//! ```

mod action;
mod config;
mod event;
mod tableau;

pub use action::Action;
pub use config::Config;
pub use event::Event;

use spacetherm_core::{
    DerivativeOf, ErrorNorm, LinearCombination, Model, Observer, OdeProblem, Snapshot,
    StepIntegrable,
};

use super::{Error, Solution, Status};

/// Safety factor applied to the optimal step-size estimate.
const SAFETY: f64 = 0.9;

/// Smallest allowed shrink factor after a rejected step.
const MIN_FACTOR: f64 = 0.2;

/// Largest allowed growth factor after an accepted step.
const MAX_FACTOR: f64 = 10.0;

/// `-1 / (q + 1)` for the fourth-order error estimator.
const ERROR_EXPONENT: f64 = -1.0 / 5.0;

/// Integrates an ODE problem over `duration` using Dormand–Prince 5(4).
///
/// # Algorithm
///
/// 1. Call the model with the initial input and emit step 0.
/// 2. Until the elapsed time reaches `duration`:
///    - Shorten the trial step if it would overshoot `duration`.
///    - Evaluate the six new stages by building trial inputs from the problem.
///    - Compare the fifth- and fourth-order states with [`ErrorNorm`].
///    - Accept the step when the norm is at most one, otherwise shrink the
///      step and retry. Growth is suppressed right after a rejection.
/// 3. Return the accepted history.
///
/// # Observer
///
/// The observer sees every accepted and rejected step and may return
/// [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Returns an error if the configuration or duration is invalid, if the model
/// or problem fails, or if the step size underflows.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    duration: f64,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: ErrorNorm,
    DerivativeOf<P::State, f64>: LinearCombination,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    config.validate()?;
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(Error::InvalidConfig(format!(
            "duration must be finite and non-negative, got {duration}"
        )));
    }

    let initial_output = model.call(&initial).map_err(Error::model)?;
    let mut current = Snapshot::new(initial, initial_output);
    let mut history = vec![current.clone()];

    let event = Event::Accepted {
        step: 0,
        elapsed: 0.0,
        step_size: 0.0,
        error_norm: 0.0,
        snapshot: current.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    let mut state = problem.state(&current.input).map_err(Error::problem)?;

    // stages[0] always holds the derivative at `state`.
    let mut stages = Vec::with_capacity(7);
    stages.push(
        problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem)?,
    );

    let mut step_size = match config.first_step {
        Some(h) => h,
        None => initial_step(&state, &stages[0], duration, config),
    }
    .min(config.max_step);

    let mut elapsed = 0.0;
    let mut steps = 0;
    let mut just_rejected = false;

    while elapsed < duration {
        let remaining = duration - elapsed;
        let min_step = 10.0 * f64::EPSILON * elapsed.abs().max(1.0);
        let landing = step_size >= remaining - min_step;
        let h = if landing { remaining } else { step_size };

        if !landing && h < min_step {
            return Err(Error::StepSizeUnderflow {
                elapsed,
                step_size: h,
            });
        }

        let evaluate_stage = |stages: &[DerivativeOf<P::State, f64>],
                              row: &[f64],
                              c: f64|
         -> Result<
            (
                P::State,
                M::Input,
                M::Output,
                DerivativeOf<P::State, f64>,
            ),
            Error,
        > {
            let stage_state = state.step(combine(stages, row), h);
            let stage_input = problem
                .build_input(&current.input, &stage_state, &(c * h))
                .map_err(Error::problem)?;
            let stage_output = model.call(&stage_input).map_err(Error::model)?;
            let derivative = problem
                .derivative(&stage_input, &stage_output)
                .map_err(Error::problem)?;
            Ok((stage_state, stage_input, stage_output, derivative))
        };

        let last = tableau::A.len() - 1;
        for (&row, c) in tableau::A[..last].iter().zip(tableau::C) {
            let (_, _, _, derivative) = evaluate_stage(stages.as_slice(), row, c)?;
            stages.push(derivative);
        }
        let (next_state, next_input, next_output, next_derivative) =
            evaluate_stage(stages.as_slice(), tableau::A[last], tableau::C[last])?;
        stages.push(next_derivative);

        let embedded = state.step(combine(&stages, &tableau::B4), h);
        let error_norm = next_state.error_norm(&embedded, config.abs_tol, config.rel_tol);

        if error_norm <= 1.0 {
            let mut factor = if error_norm == 0.0 {
                MAX_FACTOR
            } else {
                (SAFETY * error_norm.powf(ERROR_EXPONENT)).min(MAX_FACTOR)
            };
            if just_rejected {
                factor = factor.min(1.0);
            }
            just_rejected = false;

            elapsed = if landing { duration } else { elapsed + h };
            step_size = (h * factor).min(config.max_step);
            steps += 1;

            state = next_state;
            current = Snapshot::new(next_input, next_output);
            history.push(current.clone());

            // Keep the last stage as the first stage of the next step.
            stages.drain(..stages.len() - 1);

            let event = Event::Accepted {
                step: steps,
                elapsed,
                step_size: h,
                error_norm,
                snapshot: current.clone(),
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    history,
                    steps,
                });
            }
        } else {
            // A NaN norm falls through to the minimum factor.
            let factor = (SAFETY * error_norm.powf(ERROR_EXPONENT)).max(MIN_FACTOR);
            just_rejected = true;
            step_size = h * factor.min(1.0);
            stages.truncate(1);

            let event = Event::Rejected {
                elapsed,
                step_size: h,
                error_norm,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(Solution {
                    status: Status::StoppedByObserver,
                    history,
                    steps,
                });
            }
        }
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Integrates an ODE problem using Dormand–Prince 5(4) without observation.
///
/// # Errors
///
/// Returns an error if the configuration or duration is invalid, if the model
/// or problem fails, or if the step size underflows.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    duration: f64,
    config: &Config,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: ErrorNorm,
    DerivativeOf<P::State, f64>: LinearCombination,
{
    solve(model, problem, initial, duration, config, ())
}

/// Weighted sum of stage derivatives, pairing `weights[i]` with `stages[i]`.
fn combine<D: LinearCombination>(stages: &[D], weights: &[f64]) -> D {
    let terms: Vec<(f64, &D)> = weights.iter().copied().zip(stages).collect();
    D::linear_combination(&terms)
}

/// Estimates a first step from the initial derivative.
///
/// Hairer's first guess: the step over which an Euler update moves the state
/// by one percent of the tolerance scale.
fn initial_step<S>(
    state: &S,
    derivative: &DerivativeOf<S, f64>,
    duration: f64,
    config: &Config,
) -> f64
where
    S: StepIntegrable<f64> + ErrorNorm,
    DerivativeOf<S, f64>: LinearCombination,
{
    if duration <= 0.0 {
        return duration;
    }

    let trial_step = duration * 1e-6;
    let nudged = state.step(combine(std::slice::from_ref(derivative), &[1.0]), trial_step);
    let rate = nudged.error_norm(state, config.abs_tol, config.rel_tol) / trial_step;

    if rate > 1e-15 {
        (0.01 / rate).min(duration)
    } else {
        duration
    }
}
