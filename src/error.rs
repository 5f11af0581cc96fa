//! Input-validation errors for the roster core.
//!
//! Every variant here corresponds to a synchronous input-validation
//! failure: malformed data, unknown ids, or inconsistent snapshots. No
//! solver work is ever started once one of these is returned.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("shift type {shift_type_id:?} has malformed time {raw:?}: expected HH:MM")]
    InvalidTime { shift_type_id: String, raw: String },

    #[error("malformed date {raw:?}: expected YYYY-MM-DD")]
    InvalidDate { raw: String },

    #[error("period_end ({period_end}) is before period_start ({period_start})")]
    PeriodInverted {
        period_start: String,
        period_end: String,
    },

    #[error("employee {employee_id:?} has unknown role {role:?}")]
    UnknownRole { employee_id: String, role: String },

    #[error("employee {employee_id:?} has unknown working day {day:?}")]
    UnknownDayName { employee_id: String, day: String },

    #[error("employee {employee_id:?} has activity_rate {rate}, must be one of 20/40/60/80/100")]
    InvalidActivityRate { employee_id: String, rate: i64 },

    #[error(
        "employee {employee_id:?} has {actual} working day(s), expected {expected} for activity_rate {rate}"
    )]
    WorkingDaysMismatch {
        employee_id: String,
        rate: i64,
        expected: usize,
        actual: usize,
    },

    #[error("locked assignment references unknown employee id {employee_id:?}")]
    UnknownEmployeeId { employee_id: String },

    #[error("locked/coverage record references unknown shift type id {shift_type_id:?}")]
    UnknownShiftTypeId { shift_type_id: String },

    #[error("locked assignment for {employee_id:?} on {date} falls outside the solve period")]
    LockedAssignmentOutsidePeriod { employee_id: String, date: String },

    #[error("coverage requirement for shift {shift_type_id:?} / {day_type:?} is duplicated")]
    DuplicateCoverageRequirement {
        shift_type_id: String,
        day_type: String,
    },
}
