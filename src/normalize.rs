//! Input normalization: converts the raw wire-shaped records into the
//! typed entities of `domain.rs`, deriving the day list and folding rule
//! parameters into a `SolverConfig`.
//!
//! Errors are returned synchronously; no solver work starts until
//! normalization succeeds.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::domain::{
    self, Absence, ConstraintRule, CoverageRequirement, Day, Employee, LockedAssignment, Role,
    ShiftType,
};
use crate::error::InputError;

const VALID_ACTIVITY_RATES: [i64; 5] = [20, 40, 60, 80, 100];

/// Wire shape of an employee record (see spec §6): `working_days` are
/// French day names and `role` is a free string until validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeInput {
    pub id: String,
    pub role: String,
    pub activity_rate: i64,
    pub working_days: Vec<String>,
    #[serde(default)]
    pub preferred_shifts: Vec<String>,
}

/// Bundles one solve request exactly as the external interface describes
/// it (spec §6): plain records plus the period bounds and time budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub employees: Vec<EmployeeInput>,
    pub shift_types: Vec<ShiftType>,
    pub coverage: Vec<CoverageRequirement>,
    #[serde(default)]
    pub absences: Vec<Absence>,
    #[serde(default)]
    pub constraint_rules: Vec<ConstraintRule>,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(default)]
    pub locked_assignments: Vec<LockedAssignment>,
    pub time_limit_seconds: u64,
}

/// The typed, validated snapshot the model builder consumes.
pub struct NormalizedInput {
    pub employees: Vec<Employee>,
    pub shift_types: Vec<ShiftType>,
    pub coverage: Vec<CoverageRequirement>,
    pub absences: Vec<Absence>,
    pub locked: Vec<LockedAssignment>,
    pub days: Vec<Day>,
    pub config: SolverConfig,
    pub time_limit_seconds: u64,
}

fn normalize_employee(input: EmployeeInput) -> Result<Employee, InputError> {
    if !VALID_ACTIVITY_RATES.contains(&input.activity_rate) {
        return Err(InputError::InvalidActivityRate {
            employee_id: input.id,
            rate: input.activity_rate,
        });
    }

    let role = input.role.parse::<Role>().map_err(|_| InputError::UnknownRole {
        employee_id: input.id.clone(),
        role: input.role.clone(),
    })?;

    let mut working_days = HashSet::new();
    for raw_day in &input.working_days {
        let day = domain::parse_working_day(raw_day).map_err(|_| InputError::UnknownDayName {
            employee_id: input.id.clone(),
            day: raw_day.clone(),
        })?;
        working_days.insert(day);
    }

    let expected = (input.activity_rate / 20) as usize;
    if working_days.len() != expected {
        return Err(InputError::WorkingDaysMismatch {
            employee_id: input.id,
            rate: input.activity_rate,
            expected,
            actual: working_days.len(),
        });
    }

    Ok(Employee {
        id: input.id,
        role,
        activity_rate: input.activity_rate,
        working_days,
        preferred_shifts: input.preferred_shifts.into_iter().collect(),
    })
}

pub fn normalize(req: SolveRequest) -> Result<NormalizedInput, InputError> {
    if req.period_end < req.period_start {
        return Err(InputError::PeriodInverted {
            period_start: req.period_start.to_string(),
            period_end: req.period_end.to_string(),
        });
    }

    let employees = req
        .employees
        .into_iter()
        .map(normalize_employee)
        .collect::<Result<Vec<_>, _>>()?;
    let employee_ids: HashSet<&str> = employees.iter().map(|e| e.id.as_str()).collect();

    let shift_types = req
        .shift_types
        .into_iter()
        .map(domain::finalize_shift_type)
        .collect::<Result<Vec<_>, _>>()?;
    let shift_type_ids: HashSet<&str> = shift_types.iter().map(|s| s.id.as_str()).collect();

    let mut seen_coverage: HashSet<(String, domain::DayType)> = HashSet::new();
    for c in &req.coverage {
        if !shift_type_ids.contains(c.shift_type_id.as_str()) {
            return Err(InputError::UnknownShiftTypeId {
                shift_type_id: c.shift_type_id.clone(),
            });
        }
        let key = (c.shift_type_id.clone(), c.day_type);
        if !seen_coverage.insert(key) {
            return Err(InputError::DuplicateCoverageRequirement {
                shift_type_id: c.shift_type_id.clone(),
                day_type: format!("{:?}", c.day_type),
            });
        }
    }

    for a in &req.absences {
        if !employee_ids.contains(a.employee_id.as_str()) {
            return Err(InputError::UnknownEmployeeId {
                employee_id: a.employee_id.clone(),
            });
        }
    }

    for l in &req.locked_assignments {
        if !employee_ids.contains(l.employee_id.as_str()) {
            return Err(InputError::UnknownEmployeeId {
                employee_id: l.employee_id.clone(),
            });
        }
        if !shift_type_ids.contains(l.shift_type_id.as_str()) {
            return Err(InputError::UnknownShiftTypeId {
                shift_type_id: l.shift_type_id.clone(),
            });
        }
        if l.date < req.period_start || l.date > req.period_end {
            return Err(InputError::LockedAssignmentOutsidePeriod {
                employee_id: l.employee_id.clone(),
                date: l.date.to_string(),
            });
        }
    }

    let days = domain::enumerate_days(req.period_start, req.period_end);
    let config = SolverConfig::from_rules(&req.constraint_rules);

    Ok(NormalizedInput {
        employees,
        shift_types,
        coverage: req.coverage,
        absences: req.absences,
        locked: req.locked_assignments,
        days,
        config,
        time_limit_seconds: req.time_limit_seconds,
    })
}
