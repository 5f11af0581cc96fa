//! Decision-variable allocation and small linear-expression helpers
//! shared by the constraint and objective builders.
//!
//! `x[e][d][s]` is a `|E| x |D| x |S|` array of CP-SAT boolean
//! variables meaning "employee e works shift s on day d". Variables are
//! allocated in a fixed (e, d, s) nesting order so that identical inputs
//! always produce an equivalent model, matching the stable
//! `shift_e{e}_d{d}_s{s}` naming scheme of the original formulation.

use cp_sat::builder::{BoolVar, CpModelBuilder, IntVar, LinearExpr};

pub struct DecisionVars {
    pub x: Vec<Vec<Vec<BoolVar>>>,
    pub num_employees: usize,
    pub num_days: usize,
    pub num_shifts: usize,
}

impl DecisionVars {
    pub fn allocate(model: &mut CpModelBuilder, num_employees: usize, num_days: usize, num_shifts: usize) -> Self {
        let mut x = Vec::with_capacity(num_employees);
        for _e in 0..num_employees {
            let mut per_day = Vec::with_capacity(num_days);
            for _d in 0..num_days {
                let mut per_shift = Vec::with_capacity(num_shifts);
                for _s in 0..num_shifts {
                    per_shift.push(model.new_bool_var());
                }
                per_day.push(per_shift);
            }
            x.push(per_day);
        }
        Self {
            x,
            num_employees,
            num_days,
            num_shifts,
        }
    }

    #[inline]
    pub fn at(&self, e: usize, d: usize, s: usize) -> &BoolVar {
        &self.x[e][d][s]
    }
}

/// A linear expression with coefficient 1 for every variable (a plain
/// boolean sum).
pub fn sum_expr(vars: impl IntoIterator<Item = BoolVar>) -> LinearExpr {
    vars.into_iter().map(|v| (1_i64, v)).collect()
}

/// A linear expression with per-variable coefficients (used for the
/// deci-hour weighted weekly-hours sum).
pub fn weighted_sum(pairs: impl IntoIterator<Item = (i64, BoolVar)>) -> LinearExpr {
    pairs.into_iter().collect()
}

/// A single-variable linear expression, for readability at call sites
/// that compare one boolean against another.
pub fn lit(v: &BoolVar) -> LinearExpr {
    sum_expr(std::iter::once(v.clone()))
}

/// A single-integer-variable linear expression.
pub fn lit_int(v: &IntVar) -> LinearExpr {
    LinearExpr::from(v.clone())
}
