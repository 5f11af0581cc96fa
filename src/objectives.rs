//! Soft-objective term builders (spec §4.4).
//!
//! Each builder contributes a weighted linear term to a single objective
//! expression that the driver maximizes. Weights come from
//! `SolverConfig.weights`; a negative weight expresses a penalty.

use cp_sat::builder::{BoolVar, CpModelBuilder, IntVar, LinearExpr};

use crate::model::{self, DecisionVars};
use crate::normalize::NormalizedInput;

fn empty_expr() -> LinearExpr {
    Vec::<(i64, BoolVar)>::new().into_iter().collect()
}

/// Rewards identical shift on identical weekday of the following week:
/// `reg[e,d,s]` reified to `x[e,d,s] AND x[e,d+7,s]` for every `d` with
/// `d + 7 < num_days`.
fn shift_regularity_terms(model: &mut CpModelBuilder, vars: &DecisionVars) -> Vec<BoolVar> {
    let mut reg_vars = Vec::new();
    for e in 0..vars.num_employees {
        for d in 0..vars.num_days {
            if d + 7 >= vars.num_days {
                continue;
            }
            for s in 0..vars.num_shifts {
                let a = vars.at(e, d, s).clone();
                let b = vars.at(e, d + 7, s).clone();
                let reg = model.new_bool_var();

                // reg = a AND b, linearized (spec §9 Design Notes):
                // reg <= a, reg <= b, reg >= a + b - 1.
                model.add_le(model::lit(&reg), model::lit(&a));
                model.add_le(model::lit(&reg), model::lit(&b));
                model.add_ge(
                    model::lit(&reg),
                    model::sum_expr([a, b]) - 1_i64,
                );

                reg_vars.push(reg);
            }
        }
    }
    reg_vars
}

/// Collects the `x[e,d,s]` variables where shift `s` is in employee `e`'s
/// preferred-shifts list. Empty whenever no employee declares a
/// preference (spec §4.4: "contributes nothing").
fn preference_terms(
    vars: &DecisionVars,
    input: &NormalizedInput,
) -> Vec<BoolVar> {
    let mut pref_vars = Vec::new();
    for (e, employee) in input.employees.iter().enumerate() {
        if employee.preferred_shifts.is_empty() {
            continue;
        }
        for (s, shift) in input.shift_types.iter().enumerate() {
            if !employee.preferred_shifts.contains(&shift.id) {
                continue;
            }
            for d in 0..vars.num_days {
                pref_vars.push(vars.at(e, d, s).clone());
            }
        }
    }
    pref_vars
}

/// Night/weekend-equity penalty: `spread = U_max - U_min` over the
/// per-employee night-or-weekend load `U_e`, for employees eligible for
/// weekend work (working_days intersects Saturday/Sunday). Skipped if
/// fewer than two employees are eligible.
fn equity_spread_term(
    model: &mut CpModelBuilder,
    vars: &DecisionVars,
    input: &NormalizedInput,
) -> Option<IntVar> {
    use chrono::Weekday;

    let eligible: Vec<usize> = input
        .employees
        .iter()
        .enumerate()
        .filter(|(_, e)| e.working_days.contains(&Weekday::Sat) || e.working_days.contains(&Weekday::Sun))
        .map(|(idx, _)| idx)
        .collect();

    if eligible.len() < 2 {
        return None;
    }

    // U_e is two separate sums added together (spec §4.4, mirrored from
    // the Python original's objectives.py): a shift that is both on a
    // weekend day and a night shift counts twice toward U_e, so the two
    // sums must be built independently rather than deduplicated by (d, s).
    let max_possible_load = (2 * vars.num_days * vars.num_shifts) as i64;

    let u_max = model.new_int_var(vec![(0, max_possible_load)]);
    let u_min = model.new_int_var(vec![(0, max_possible_load)]);

    for &e in &eligible {
        let mut terms: Vec<(i64, BoolVar)> = Vec::new();
        for d in 0..vars.num_days {
            let is_weekend = matches!(
                input.days[d].day_type,
                crate::domain::DayType::Saturday | crate::domain::DayType::Sunday
            );
            if is_weekend {
                for s in 0..vars.num_shifts {
                    terms.push((1, vars.at(e, d, s).clone()));
                }
            }
        }
        for d in 0..vars.num_days {
            for s in 0..vars.num_shifts {
                if input.shift_types[s].is_night {
                    terms.push((1, vars.at(e, d, s).clone()));
                }
            }
        }
        let u_e_for_max: LinearExpr = terms.clone().into_iter().collect();
        let u_e_for_min: LinearExpr = terms.into_iter().collect();
        model.add_ge(model::lit_int(&u_max), u_e_for_max);
        model.add_le(model::lit_int(&u_min), u_e_for_min);
    }

    let spread = model.new_int_var(vec![(0, max_possible_load)]);
    model.add_eq(
        model::lit_int(&spread),
        model::lit_int(&u_max) - model::lit_int(&u_min),
    );

    Some(spread)
}

/// Builds the combined, weighted objective expression. Returns `None`
/// when every contributing objective is empty (e.g. an empty horizon),
/// matching the Python original's "skip `Maximize` if there are no
/// terms" behavior.
pub fn build_objective(
    model: &mut CpModelBuilder,
    vars: &DecisionVars,
    input: &NormalizedInput,
) -> Option<LinearExpr> {
    let weights = input.config.weights;
    let mut total = empty_expr();
    let mut has_terms = false;

    let reg_vars = shift_regularity_terms(model, vars);
    if !reg_vars.is_empty() {
        let weighted: LinearExpr = reg_vars
            .into_iter()
            .map(|v| (weights.regularity, v))
            .collect();
        total = total + weighted;
        has_terms = true;
    }

    let pref_vars = preference_terms(vars, input);
    if !pref_vars.is_empty() {
        let weighted: LinearExpr = pref_vars
            .into_iter()
            .map(|v| (weights.preferences, v))
            .collect();
        total = total + weighted;
        has_terms = true;
    }

    if let Some(spread) = equity_spread_term(model, vars, input) {
        // Subtract the weighted spread rather than multiplying a
        // LinearExpr by a scalar (unconfirmed on this cp_sat version):
        // repeated addition mirrors the negation-by-subtraction pattern
        // cp_sat callers use elsewhere for scalar scaling.
        let mut weighted_spread = empty_expr();
        for _ in 0..weights.equity.max(0) {
            weighted_spread = weighted_spread + model::lit_int(&spread);
        }
        total = total - weighted_spread;
        has_terms = true;
    }

    if has_terms {
        Some(total)
    } else {
        None
    }
}
