//! Demo data generators for the ward roster core: produce
//! `SolveRequest`-shaped fixtures for tests, benchmarks, and the
//! `roster_bench` CLI.

use chrono::{Duration, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::{Absence, ConstraintRule, CoverageRequirement, DayType, LockedAssignment};
use crate::normalize::{EmployeeInput, SolveRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSize {
    Small,
    Pilot,
}

impl std::str::FromStr for DemoSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoSize::Small),
            "PILOT" => Ok(DemoSize::Pilot),
            _ => Err(()),
        }
    }
}

impl DemoSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoSize::Small => "SMALL",
            DemoSize::Pilot => "PILOT",
        }
    }

    fn parameters(&self) -> DemoParameters {
        match self {
            DemoSize::Small => DemoParameters {
                employee_count: 8,
                horizon_days: 7,
            },
            DemoSize::Pilot => DemoParameters {
                employee_count: 25,
                horizon_days: 31,
            },
        }
    }
}

struct DemoParameters {
    employee_count: usize,
    horizon_days: i64,
}

pub fn list_demo_sizes() -> Vec<&'static str> {
    vec!["SMALL", "PILOT"]
}

const FRENCH_WORKING_DAYS: [&str; 7] = [
    "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche",
];
const ACTIVITY_RATES: [i64; 5] = [20, 40, 60, 80, 100];

fn shift_type_fixtures() -> Vec<crate::domain::ShiftType> {
    vec![
        crate::domain::ShiftType {
            id: "matin".to_string(),
            name: "Matin".to_string(),
            start_time: "06:30".to_string(),
            end_time: "14:30".to_string(),
            duration_hours: 8.0,
            start_hour: 0.0,
            end_hour: 0.0,
            is_night: false,
        },
        crate::domain::ShiftType {
            id: "apres-midi".to_string(),
            name: "Apres-midi".to_string(),
            start_time: "14:00".to_string(),
            end_time: "22:00".to_string(),
            duration_hours: 8.0,
            start_hour: 0.0,
            end_hour: 0.0,
            is_night: false,
        },
        crate::domain::ShiftType {
            id: "nuit".to_string(),
            name: "Nuit".to_string(),
            start_time: "22:00".to_string(),
            end_time: "06:00".to_string(),
            duration_hours: 8.0,
            start_hour: 0.0,
            end_hour: 0.0,
            is_night: false,
        },
    ]
}

/// Picks a working-day set whose size matches the employee's
/// activity-rate-derived expected count, so normalization never rejects
/// generated demo data.
fn pick_working_days(rng: &mut StdRng, count: usize) -> Vec<String> {
    let mut days: Vec<&str> = FRENCH_WORKING_DAYS.to_vec();
    days.shuffle(rng);
    days.into_iter().take(count).map(|d| d.to_string()).collect()
}

/// Generates a self-consistent `SolveRequest` fixture of the requested
/// size, deterministic under a fixed seed so repeated benchmark runs are
/// comparable.
pub fn generate(size: DemoSize) -> SolveRequest {
    let params = size.parameters();
    let mut rng = StdRng::seed_from_u64(42);

    let roles = ["infirmier", "assc", "aide-soignant"];
    let shift_types = shift_type_fixtures();

    let mut employees = Vec::with_capacity(params.employee_count);
    for i in 0..params.employee_count {
        let rate = ACTIVITY_RATES[rng.gen_range(1..ACTIVITY_RATES.len())];
        let expected = (rate / 20) as usize;
        let role = roles[i % roles.len()].to_string();
        let preferred_shifts = if rng.gen_bool(0.4) {
            vec![shift_types[rng.gen_range(0..shift_types.len())].id.clone()]
        } else {
            Vec::new()
        };
        employees.push(EmployeeInput {
            id: format!("emp-{i:03}"),
            role,
            activity_rate: rate,
            working_days: pick_working_days(&mut rng, expected),
            preferred_shifts,
        });
    }

    let coverage = vec![
        CoverageRequirement {
            shift_type_id: "matin".to_string(),
            day_type: DayType::Weekday,
            min_infirmier: 2,
            min_assc: 1,
            min_aide_soignant: 1,
        },
        CoverageRequirement {
            shift_type_id: "apres-midi".to_string(),
            day_type: DayType::Weekday,
            min_infirmier: 2,
            min_assc: 1,
            min_aide_soignant: 1,
        },
        CoverageRequirement {
            shift_type_id: "nuit".to_string(),
            day_type: DayType::Weekday,
            min_infirmier: 1,
            min_assc: 0,
            min_aide_soignant: 1,
        },
        CoverageRequirement {
            shift_type_id: "matin".to_string(),
            day_type: DayType::Saturday,
            min_infirmier: 1,
            min_assc: 1,
            min_aide_soignant: 0,
        },
        CoverageRequirement {
            shift_type_id: "nuit".to_string(),
            day_type: DayType::Saturday,
            min_infirmier: 1,
            min_assc: 0,
            min_aide_soignant: 0,
        },
        CoverageRequirement {
            shift_type_id: "matin".to_string(),
            day_type: DayType::Sunday,
            min_infirmier: 1,
            min_assc: 1,
            min_aide_soignant: 0,
        },
        CoverageRequirement {
            shift_type_id: "nuit".to_string(),
            day_type: DayType::Sunday,
            min_infirmier: 1,
            min_assc: 0,
            min_aide_soignant: 0,
        },
    ];

    let period_start = find_next_monday(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    let period_end = period_start + Duration::days(params.horizon_days - 1);

    // One absence for an arbitrary employee mid-horizon, when the
    // horizon is long enough to contain it.
    let absences = if params.horizon_days >= 5 && !employees.is_empty() {
        vec![Absence {
            employee_id: employees[0].id.clone(),
            date_start: period_start + Duration::days(2),
            date_end: period_start + Duration::days(3),
            kind: "conge".to_string(),
        }]
    } else {
        Vec::new()
    };

    let locked_assignments: Vec<LockedAssignment> = Vec::new();

    let constraint_rules = vec![ConstraintRule {
        name: "min_rest_hours".to_string(),
        parameter: serde_json::json!({"hours": 11})
            .as_object()
            .cloned()
            .unwrap(),
        is_active: true,
    }];

    SolveRequest {
        employees,
        shift_types,
        coverage,
        absences,
        constraint_rules,
        period_start,
        period_end,
        locked_assignments,
        time_limit_seconds: 30,
    }
}

fn find_next_monday(date: NaiveDate) -> NaiveDate {
    let days_until_monday = match date.weekday() {
        Weekday::Mon => 0,
        Weekday::Tue => 6,
        Weekday::Wed => 5,
        Weekday::Thu => 4,
        Weekday::Fri => 3,
        Weekday::Sat => 2,
        Weekday::Sun => 1,
    };
    date + Duration::days(days_until_monday)
}
