//! Forward Euler solver for ODE problems.
//!
//! Steps a model forward with a fixed step size:
//!
//! ```text
//! state_{n+1} = state_n + derivative_n * dt
//! ```
//!
//! Explicit Euler is only conditionally stable. For a lumped thermal mass the
//! step must stay well below `thermal_inertia / total_conductance`, so prefer
//! [`dopri5`](super::dopri5) for production runs.
//!
//! # Example
//!
//! ```ignore
//! use spacetherm_solvers::transient::euler;
//!
//! let solution = euler::solve_unobserved(&model, &problem, initial_input, 60.0, 1_000)?;
//! ```

mod action;
mod event;

pub use action::Action;
pub use event::Event;

use spacetherm_core::{Model, Observer, OdeProblem, Snapshot, StepIntegrable};

use super::{Error, Solution, Status};

/// Integrates an ODE problem for `steps` fixed steps of size `dt`.
///
/// The observer receives an [`Event`] for the initial snapshot and after each
/// step, and may return [`Action::StopEarly`] to end the run.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    let initial_output = model.call(&initial).map_err(Error::model)?;
    let mut current = Snapshot::new(initial, initial_output);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(current.clone());

    let event = Event {
        step: 0,
        snapshot: current.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    for step in 1..=steps {
        let state = problem.state(&current.input).map_err(Error::problem)?;
        let derivative = problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem)?;

        let next_state = state.step(derivative, dt.clone());
        let next_input = problem
            .build_input(&current.input, &next_state, &dt)
            .map_err(Error::problem)?;
        let next_output = model.call(&next_input).map_err(Error::model)?;

        current = Snapshot::new(next_input, next_output);
        history.push(current.clone());

        let event = Event {
            step,
            snapshot: current.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Integrates an ODE problem using forward Euler without observation.
///
/// # Errors
///
/// Returns an error if the model or problem returns an error at any point.
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: P::Delta,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output>,
    P::Delta: Clone,
{
    solve(model, problem, initial, dt, steps, ())
}
