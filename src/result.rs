//! Result extraction (spec §4.6): walks the solved decision variables
//! into a plain assignments list plus summary statistics.

use std::collections::HashSet;

use chrono::NaiveDate;
use cp_sat::proto::CpSolverResponse;
use serde::{Deserialize, Serialize};

use crate::model::DecisionVars;
use crate::normalize::NormalizedInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    Optimal,
    Feasible,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    pub employee_id: String,
    pub shift_type_id: String,
    pub date: NaiveDate,
    pub is_locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveStats {
    pub solve_time_ms: u64,
    pub status: SolveStatus,
    pub objective_value: i64,
    pub num_employees: usize,
    pub num_days: usize,
    pub num_assignments: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResult {
    pub assignments: Vec<Assignment>,
    pub stats: SolveStats,
}

/// Walks `x` and collects every triple with value 1 into an assignments
/// list, marking `is_locked` by membership in the locked-input set.
/// Ordering of assignments is unspecified; callers group/sort for
/// display (spec §4.6).
pub fn extract(
    vars: &DecisionVars,
    input: &NormalizedInput,
    response: &CpSolverResponse,
    status: SolveStatus,
    objective_value: i64,
    solve_time_ms: u64,
) -> SolveResult {
    let locked_set: HashSet<(&str, NaiveDate)> = input
        .locked
        .iter()
        .map(|l| (l.employee_id.as_str(), l.date))
        .collect();

    let mut assignments = Vec::new();
    for (e, employee) in input.employees.iter().enumerate() {
        for (d, day) in input.days.iter().enumerate() {
            for (s, shift) in input.shift_types.iter().enumerate() {
                if vars.at(e, d, s).solution_value(response) {
                    let is_locked = locked_set.contains(&(employee.id.as_str(), day.date));
                    assignments.push(Assignment {
                        employee_id: employee.id.clone(),
                        shift_type_id: shift.id.clone(),
                        date: day.date,
                        is_locked,
                    });
                }
            }
        }
    }

    let num_assignments = assignments.len();
    SolveResult {
        assignments,
        stats: SolveStats {
            solve_time_ms,
            status,
            objective_value,
            num_employees: input.employees.len(),
            num_days: input.days.len(),
            num_assignments,
        },
    }
}
