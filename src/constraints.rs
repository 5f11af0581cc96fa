//! Hard-constraint builders, posted in the order spec.md §4.3 lists them.
//! Order does not affect correctness, only presolve predictability.

use std::collections::HashMap;

use chrono::Datelike;
use cp_sat::builder::CpModelBuilder;

use crate::domain::DayType;
use crate::model::{self, DecisionVars};
use crate::normalize::NormalizedInput;

/// 1. At most one shift per day per employee: `sum_s x[e,d,s] <= 1`.
pub fn at_most_one_shift_per_day(model: &mut CpModelBuilder, vars: &DecisionVars) {
    for e in 0..vars.num_employees {
        for d in 0..vars.num_days {
            let shifts_today = (0..vars.num_shifts).map(|s| vars.at(e, d, s).clone());
            model.add_le(model::sum_expr(shifts_today), 1_i64);
        }
    }
}

/// 2. Coverage minima: per (day, shift) with a matching requirement,
/// both the role sub-sums and the total must be met.
pub fn coverage_minima(model: &mut CpModelBuilder, vars: &DecisionVars, input: &NormalizedInput) {
    let mut by_key: HashMap<(String, DayType), &crate::domain::CoverageRequirement> =
        HashMap::new();
    for c in &input.coverage {
        by_key.insert((c.shift_type_id.clone(), c.day_type), c);
    }

    for (s, shift) in input.shift_types.iter().enumerate() {
        for (d, day) in input.days.iter().enumerate() {
            let Some(coverage) = by_key.get(&(shift.id.clone(), day.day_type)) else {
                continue;
            };

            let all_employees = (0..vars.num_employees).map(|e| vars.at(e, d, s).clone());
            model.add_ge(model::sum_expr(all_employees), coverage.total());

            for role in [
                crate::domain::Role::Infirmier,
                crate::domain::Role::Assc,
                crate::domain::Role::AideSoignant,
            ] {
                let min = coverage.min_for(role);
                if min <= 0 {
                    continue;
                }
                let role_employees = (0..vars.num_employees)
                    .filter(|&e| input.employees[e].role == role)
                    .map(|e| vars.at(e, d, s).clone());
                model.add_ge(model::sum_expr(role_employees), min);
            }
        }
    }
}

/// Precomputes, for every ordered pair of shift types `(s1, s2)`, whether
/// working `s1` on day `d` and `s2` on day `d+1` violates the minimum
/// rest requirement. Computed once per solve, not per employee-day.
fn forbidden_rest_pairs(
    shift_types: &[crate::domain::ShiftType],
    min_rest_hours: i64,
) -> Vec<(usize, usize)> {
    let mut forbidden = Vec::new();
    for (i, s1) in shift_types.iter().enumerate() {
        for (j, s2) in shift_types.iter().enumerate() {
            let gap = if s1.is_night {
                (s2.start_hour - s1.end_hour).rem_euclid(24.0)
            } else {
                (24.0 - s1.end_hour) + s2.start_hour
            };
            if gap < min_rest_hours as f64 {
                forbidden.push((i, j));
            }
        }
    }
    forbidden
}

/// 3. Rest between consecutive days: forbids any (s1, s2) pair from the
/// precomputed forbidden-gap table across consecutive days.
pub fn rest_between_consecutive_days(
    model: &mut CpModelBuilder,
    vars: &DecisionVars,
    input: &NormalizedInput,
) {
    let forbidden = forbidden_rest_pairs(&input.shift_types, input.config.min_rest_hours);
    if forbidden.is_empty() {
        return;
    }

    for e in 0..vars.num_employees {
        for d in 0..vars.num_days.saturating_sub(1) {
            for &(s1, s2) in &forbidden {
                let a = vars.at(e, d, s1).clone();
                let b = vars.at(e, d + 1, s2).clone();
                model.add_le(model::sum_expr([a, b]), 1_i64);
            }
        }
    }
}

/// 4. Weekly hours cap over ISO-aligned 7-day windows (last window
/// truncated to whatever remains of the horizon).
pub fn weekly_hours_cap(model: &mut CpModelBuilder, vars: &DecisionVars, input: &NormalizedInput) {
    let deci_hours: Vec<i64> = input
        .shift_types
        .iter()
        .map(|s| s.duration_deci_hours())
        .collect();

    let mut window_start = 0;
    while window_start < vars.num_days {
        let window_end = (window_start + 7).min(vars.num_days);
        for (e, employee) in input.employees.iter().enumerate() {
            let terms = (window_start..window_end).flat_map(|d| {
                (0..vars.num_shifts).map(move |s| (deci_hours[s], vars.at(e, d, s).clone()))
            });
            model.add_le(model::weighted_sum(terms), employee.max_weekly_deci_hours());
        }
        window_start += 7;
    }
}

/// 5. Availability by working days: the sole mechanism preventing work
/// on days whose weekday is outside `working_days`.
pub fn availability_by_working_days(
    model: &mut CpModelBuilder,
    vars: &DecisionVars,
    input: &NormalizedInput,
) {
    for (e, employee) in input.employees.iter().enumerate() {
        for (d, day) in input.days.iter().enumerate() {
            if employee.working_days.contains(&day.date.weekday()) {
                continue;
            }
            for s in 0..vars.num_shifts {
                model.add_eq(model::lit(vars.at(e, d, s)), 0_i64);
            }
        }
    }
}

/// 6. Absences: forbids every (employee, day, shift) inside an absence
/// window.
pub fn absence_constraints(model: &mut CpModelBuilder, vars: &DecisionVars, input: &NormalizedInput) {
    let index_of: HashMap<&str, usize> = input
        .employees
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.as_str(), i))
        .collect();

    for absence in &input.absences {
        let Some(&e) = index_of.get(absence.employee_id.as_str()) else {
            continue;
        };
        for (d, day) in input.days.iter().enumerate() {
            if !absence.covers(day.date) {
                continue;
            }
            for s in 0..vars.num_shifts {
                model.add_eq(model::lit(vars.at(e, d, s)), 0_i64);
            }
        }
    }
}

/// 7. Two-week free-weekend quota: partitions the (Sat, Sun) pairs found
/// in the horizon into non-overlapping windows of two consecutive
/// weekend pairs, and requires at least `min_free_weekends_per_2weeks`
/// fully-free weekends per window per employee. Leftover single
/// weekends at the tail are ignored.
pub fn two_week_free_weekend_quota(
    model: &mut CpModelBuilder,
    vars: &DecisionVars,
    input: &NormalizedInput,
) {
    let weekend_pairs = find_weekend_pairs(input);
    if weekend_pairs.is_empty() {
        return;
    }

    for window in weekend_pairs.chunks(2) {
        if window.len() < 2 {
            // Leftover single weekend at the tail: ignored per spec.
            continue;
        }
        for e in 0..vars.num_employees {
            let mut free_vars = Vec::with_capacity(window.len());
            for &(sat, sun) in window {
                let busy_sat =
                    model::sum_expr((0..vars.num_shifts).map(|s| vars.at(e, sat, s).clone()));
                let busy_sun =
                    model::sum_expr((0..vars.num_shifts).map(|s| vars.at(e, sun, s).clone()));
                let free = model.new_bool_var();

                // free = (1 - busy_sat) AND (1 - busy_sun), linearized:
                // free + busy_sat <= 1, free + busy_sun <= 1,
                // free + busy_sat + busy_sun >= 1.
                model.add_le(model::lit(&free) + busy_sat.clone(), 1_i64);
                model.add_le(model::lit(&free) + busy_sun.clone(), 1_i64);
                model.add_ge(model::lit(&free) + busy_sat + busy_sun, 1_i64);

                free_vars.push(free);
            }
            model.add_ge(
                model::sum_expr(free_vars),
                input.config.min_free_weekends_per_2weeks,
            );
        }
    }
}

/// Finds every (Saturday, Sunday) pair of day indices present in the
/// horizon, in chronological order.
fn find_weekend_pairs(input: &NormalizedInput) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for d in 0..input.days.len() {
        if input.days[d].day_type != DayType::Saturday {
            continue;
        }
        if d + 1 < input.days.len() && input.days[d + 1].day_type == DayType::Sunday {
            pairs.push((d, d + 1));
        }
    }
    pairs
}

/// 8. Locked assignments: forces `x = 1` on each locked triple. A lock
/// that conflicts with another hard constraint makes infeasibility a
/// legitimate outcome.
pub fn locked_assignments(model: &mut CpModelBuilder, vars: &DecisionVars, input: &NormalizedInput) {
    let employee_index: HashMap<&str, usize> = input
        .employees
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id.as_str(), i))
        .collect();
    let shift_index: HashMap<&str, usize> = input
        .shift_types
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.as_str(), i))
        .collect();
    let day_index: HashMap<chrono::NaiveDate, usize> = input
        .days
        .iter()
        .enumerate()
        .map(|(i, d)| (d.date, i))
        .collect();

    for lock in &input.locked {
        let (Some(&e), Some(&s), Some(&d)) = (
            employee_index.get(lock.employee_id.as_str()),
            shift_index.get(lock.shift_type_id.as_str()),
            day_index.get(&lock.date),
        ) else {
            continue;
        };
        model.add_eq(model::lit(vars.at(e, d, s)), 1_i64);
    }
}
