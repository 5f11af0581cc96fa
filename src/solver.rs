//! The CP-SAT driver (spec §4.5): builds the model, posts every hard
//! constraint in spec order, attaches the weighted objective, and runs
//! the solver with a bounded time budget.

use std::time::Instant;

use cp_sat::builder::CpModelBuilder;
use cp_sat::proto::{CpSolverStatus, SatParameters};

use crate::constraints;
use crate::error::InputError;
use crate::model::DecisionVars;
use crate::normalize::{self, NormalizedInput, SolveRequest};
use crate::objectives;
use crate::result::{self, SolveResult, SolveStatus};

/// Default search-worker count (spec §4.5): matches the Python
/// original's `num_workers = 4`.
const DEFAULT_SEARCH_WORKERS: i32 = 4;
const DEFAULT_TIME_LIMIT_SECONDS: u64 = 30;

/// Normalizes `request`, builds the CP-SAT model, and solves it.
/// Returns `Ok(None)` when the solver proves the model infeasible or
/// otherwise fails to reach `OPTIMAL`/`FEASIBLE` within the time budget;
/// returns `Err` only for invalid input caught during normalization.
#[tracing::instrument(skip_all, fields(num_employees = request.employees.len()))]
pub fn solve(request: SolveRequest) -> Result<Option<SolveResult>, InputError> {
    let input = normalize::normalize(request)?;
    tracing::info!(
        num_employees = input.employees.len(),
        num_days = input.days.len(),
        num_shifts = input.shift_types.len(),
        "normalized solve request"
    );

    let mut model = CpModelBuilder::default();
    let vars = DecisionVars::allocate(
        &mut model,
        input.employees.len(),
        input.days.len(),
        input.shift_types.len(),
    );

    post_hard_constraints(&mut model, &vars, &input);

    if let Some(objective) = objectives::build_objective(&mut model, &vars, &input) {
        model.maximize(objective);
    }

    let mut params = SatParameters::default();
    let time_limit = if input.time_limit_seconds == 0 {
        DEFAULT_TIME_LIMIT_SECONDS
    } else {
        input.time_limit_seconds
    };
    params.max_time_in_seconds = Some(time_limit as f64);
    params.num_search_workers = Some(DEFAULT_SEARCH_WORKERS);

    let start = Instant::now();
    let response = model.solve_with_parameters(&params);
    let solve_time_ms = start.elapsed().as_millis() as u64;

    let status = match response.status() {
        CpSolverStatus::Optimal => SolveStatus::Optimal,
        CpSolverStatus::Feasible => SolveStatus::Feasible,
        other => {
            tracing::warn!(?other, "solve did not reach optimal or feasible");
            return Ok(None);
        }
    };

    let objective_value = response.objective_value() as i64;
    tracing::info!(?status, solve_time_ms, objective_value, "solve finished");

    Ok(Some(result::extract(
        &vars,
        &input,
        &response,
        status,
        objective_value,
        solve_time_ms,
    )))
}

fn post_hard_constraints(model: &mut CpModelBuilder, vars: &DecisionVars, input: &NormalizedInput) {
    constraints::at_most_one_shift_per_day(model, vars);
    constraints::coverage_minima(model, vars, input);
    constraints::rest_between_consecutive_days(model, vars, input);
    constraints::weekly_hours_cap(model, vars, input);
    constraints::availability_by_working_days(model, vars, input);
    constraints::absence_constraints(model, vars, input);
    constraints::two_week_free_weekend_quota(model, vars, input);
    constraints::locked_assignments(model, vars, input);
}
