//! Typed entities for the roster solve, derived from the raw input
//! records documented in the external interface.
//!
//! Everything here is immutable for the duration of a solve; the core
//! never mutates an input snapshot.

use std::collections::HashSet;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday as ChronoWeekday};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Caregiver role. The three values are the only ones the core
/// recognizes; anything else is an input error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Infirmier,
    Assc,
    AideSoignant,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "infirmier" => Ok(Role::Infirmier),
            "assc" => Ok(Role::Assc),
            "aide-soignant" => Ok(Role::AideSoignant),
            _ => Err(()),
        }
    }
}

/// French day-name vocabulary used in `Employee.working_days`, mapped to
/// `chrono::Weekday` for calendar arithmetic.
pub fn parse_working_day(s: &str) -> Result<ChronoWeekday, ()> {
    match s {
        "lundi" => Ok(ChronoWeekday::Mon),
        "mardi" => Ok(ChronoWeekday::Tue),
        "mercredi" => Ok(ChronoWeekday::Wed),
        "jeudi" => Ok(ChronoWeekday::Thu),
        "vendredi" => Ok(ChronoWeekday::Fri),
        "samedi" => Ok(ChronoWeekday::Sat),
        "dimanche" => Ok(ChronoWeekday::Sun),
        _ => Err(()),
    }
}

/// Coverage class of a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Saturday,
    Sunday,
}

impl DayType {
    pub fn of(weekday: ChronoWeekday) -> Self {
        match weekday {
            ChronoWeekday::Sat => DayType::Saturday,
            ChronoWeekday::Sun => DayType::Sunday,
            _ => DayType::Weekday,
        }
    }
}

/// A caregiver eligible for assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub role: Role,
    pub activity_rate: i64,
    pub working_days: HashSet<ChronoWeekday>,
    /// Shift-type ids this employee prefers; drives the preference-respect
    /// objective. Added explicitly to the canonical schema (see
    /// `SPEC_FULL.md`, Open Questions) since it has no counterpart in the
    /// `working_days`-based employee record otherwise.
    #[serde(default)]
    pub preferred_shifts: HashSet<String>,
}

impl Employee {
    /// `max_weekly_hours = 42 * activity_rate / 100`, expressed in
    /// deci-hours (tenths of an hour) to stay integer-linear.
    pub fn max_weekly_deci_hours(&self) -> i64 {
        42 * 10 * self.activity_rate / 100
    }

    pub fn expected_working_day_count(&self) -> usize {
        (self.activity_rate / 20) as usize
    }
}

/// A named daily duty with a start/end clock time and a duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftType {
    pub id: String,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_hours: f64,
    #[serde(skip)]
    pub start_hour: f64,
    #[serde(skip)]
    pub end_hour: f64,
    #[serde(skip)]
    pub is_night: bool,
}

impl ShiftType {
    pub fn duration_deci_hours(&self) -> i64 {
        (self.duration_hours * 10.0) as i64
    }
}

fn parse_hhmm(shift_type_id: &str, raw: &str) -> Result<f64, InputError> {
    let mut parts = raw.splitn(2, ':');
    let (h, m) = match (parts.next(), parts.next()) {
        (Some(h), Some(m)) => (h, m),
        _ => {
            return Err(InputError::InvalidTime {
                shift_type_id: shift_type_id.to_string(),
                raw: raw.to_string(),
            })
        }
    };
    let h: f64 = h.parse().map_err(|_| InputError::InvalidTime {
        shift_type_id: shift_type_id.to_string(),
        raw: raw.to_string(),
    })?;
    let m: f64 = m.parse().map_err(|_| InputError::InvalidTime {
        shift_type_id: shift_type_id.to_string(),
        raw: raw.to_string(),
    })?;
    if !(0.0..24.0).contains(&h) || !(0.0..60.0).contains(&m) {
        return Err(InputError::InvalidTime {
            shift_type_id: shift_type_id.to_string(),
            raw: raw.to_string(),
        });
    }
    Ok(h + m / 60.0)
}

/// Derives `start_hour`, `end_hour` and `is_night` from the raw `HH:MM`
/// strings. `is_night` is schedule-based, never name-based: a shift is a
/// night shift iff it starts at or after 20:00, or its end clock time is
/// earlier than its start clock time (it crosses midnight).
pub fn finalize_shift_type(mut shift: ShiftType) -> Result<ShiftType, InputError> {
    let start_hour = parse_hhmm(&shift.id, &shift.start_time)?;
    let end_hour = parse_hhmm(&shift.id, &shift.end_time)?;
    shift.start_hour = start_hour;
    shift.end_hour = end_hour;
    shift.is_night = start_hour >= 20.0 || end_hour < start_hour;
    Ok(shift)
}

/// Per-(shift, day-class) minimum headcount, broken down by role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageRequirement {
    pub shift_type_id: String,
    pub day_type: DayType,
    #[serde(default)]
    pub min_infirmier: i64,
    #[serde(default)]
    pub min_assc: i64,
    #[serde(default)]
    pub min_aide_soignant: i64,
}

impl CoverageRequirement {
    pub fn total(&self) -> i64 {
        self.min_infirmier + self.min_assc + self.min_aide_soignant
    }

    pub fn min_for(&self, role: Role) -> i64 {
        match role {
            Role::Infirmier => self.min_infirmier,
            Role::Assc => self.min_assc,
            Role::AideSoignant => self.min_aide_soignant,
        }
    }
}

/// An inclusive date range during which an employee cannot be assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Absence {
    pub employee_id: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub kind: String,
}

impl Absence {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.date_start <= date && date <= self.date_end
    }
}

/// A (employee, shift, date) triple forced to `x = 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedAssignment {
    pub employee_id: String,
    pub shift_type_id: String,
    pub date: NaiveDate,
}

/// Raw externalized tuning rule, as received from the caller. Folded into
/// a `SolverConfig` at normalization time (see `config.rs`); the solver
/// core never looks at the free-form `parameter` map again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintRule {
    pub name: String,
    #[serde(default)]
    pub parameter: serde_json::Map<String, serde_json::Value>,
    pub is_active: bool,
}

/// One calendar day in the solve horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub date: NaiveDate,
    pub day_type: DayType,
}

/// Enumerates the contiguous list of days from `start` to `end`
/// inclusive, stepping one calendar day at a time. No timezone
/// arithmetic is ever involved — inputs are date-only.
pub fn enumerate_days(start: NaiveDate, end: NaiveDate) -> Vec<Day> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(Day {
            date: current,
            day_type: DayType::of(current.weekday()),
        });
        current += Duration::days(1);
    }
    days
}
