//! End-to-end scenario tests exercising the public `solve` entry point.

use chrono::{Datelike, NaiveDate};
use ward_roster_core::domain::{Absence, CoverageRequirement, DayType};
use ward_roster_core::normalize::{EmployeeInput, SolveRequest};
use ward_roster_core::{InputError, SolveStatus};

fn base_shift_types() -> Vec<ward_roster_core::domain::ShiftType> {
    vec![
        ward_roster_core::domain::ShiftType {
            id: "matin".to_string(),
            name: "Matin".to_string(),
            start_time: "06:30".to_string(),
            end_time: "14:30".to_string(),
            duration_hours: 8.0,
            start_hour: 0.0,
            end_hour: 0.0,
            is_night: false,
        },
        ward_roster_core::domain::ShiftType {
            id: "veille".to_string(),
            name: "Veille".to_string(),
            start_time: "22:00".to_string(),
            end_time: "06:00".to_string(),
            duration_hours: 8.0,
            start_hour: 0.0,
            end_hour: 0.0,
            is_night: false,
        },
        ward_roster_core::domain::ShiftType {
            id: "soir-plus".to_string(),
            name: "Soir+".to_string(),
            start_time: "20:00".to_string(),
            end_time: "23:59".to_string(),
            duration_hours: 3.983,
            start_hour: 0.0,
            end_hour: 0.0,
            is_night: false,
        },
    ]
}

fn one_week_request(employee_count: usize) -> SolveRequest {
    let employees = (0..employee_count)
        .map(|i| EmployeeInput {
            id: format!("emp-{i}"),
            role: "infirmier".to_string(),
            activity_rate: 100,
            working_days: vec![
                "lundi".to_string(),
                "mardi".to_string(),
                "mercredi".to_string(),
                "jeudi".to_string(),
                "vendredi".to_string(),
            ],
            preferred_shifts: Vec::new(),
        })
        .collect();

    SolveRequest {
        employees,
        shift_types: base_shift_types(),
        coverage: vec![CoverageRequirement {
            shift_type_id: "matin".to_string(),
            day_type: DayType::Weekday,
            min_infirmier: 1,
            min_assc: 0,
            min_aide_soignant: 0,
        }],
        absences: Vec::new(),
        constraint_rules: Vec::new(),
        period_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
        locked_assignments: Vec::new(),
        time_limit_seconds: 10,
    }
}

#[test]
fn one_week_single_role_requirement_is_feasible() {
    let request = one_week_request(3);
    let result = ward_roster_core::solve(request).expect("valid input").expect("feasible");
    assert!(result.stats.num_assignments > 0);
    assert!(matches!(result.stats.status, SolveStatus::Optimal | SolveStatus::Feasible));
}

#[test]
fn absence_is_never_scheduled() {
    let mut request = one_week_request(3);
    request.absences.push(Absence {
        employee_id: "emp-0".to_string(),
        date_start: request.period_start,
        date_end: request.period_start + chrono::Duration::days(2),
        kind: "conge".to_string(),
    });

    let result = ward_roster_core::solve(request.clone())
        .expect("valid input")
        .expect("feasible");

    for assignment in &result.assignments {
        if assignment.employee_id == "emp-0" {
            assert!(
                assignment.date > request.period_start + chrono::Duration::days(2),
                "emp-0 must not be assigned during their absence window"
            );
        }
    }
}

#[test]
fn availability_outside_working_days_is_never_scheduled() {
    let request = one_week_request(3);
    // emp-0..emp-2 are available Mon-Fri only; Jan 10/11 2026 are Sat/Sun.
    let result = ward_roster_core::solve(request)
        .expect("valid input")
        .expect("feasible");

    let weekend_start = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
    for assignment in &result.assignments {
        if assignment.date >= weekend_start {
            panic!(
                "no employee in this fixture works weekends, but {:?} was assigned on {}",
                assignment.employee_id, assignment.date
            );
        }
    }
}

#[test]
fn locked_assignment_is_preserved_in_result() {
    let mut request = one_week_request(3);
    request.locked_assignments.push(ward_roster_core::domain::LockedAssignment {
        employee_id: "emp-1".to_string(),
        shift_type_id: "matin".to_string(),
        date: request.period_start,
    });

    let result = ward_roster_core::solve(request.clone())
        .expect("valid input")
        .expect("feasible");

    let locked = result
        .assignments
        .iter()
        .find(|a| a.employee_id == "emp-1" && a.date == request.period_start);
    assert!(locked.is_some(), "locked assignment must appear in the result");
    assert!(locked.unwrap().is_locked);
}

#[test]
fn night_detection_is_schedule_based_not_name_based() {
    let request = one_week_request(1);
    let normalized = ward_roster_core::normalize::normalize(request).expect("valid input");

    let by_id = |id: &str| normalized.shift_types.iter().find(|s| s.id == id).unwrap();
    assert!(by_id("veille").is_night, "22:00->06:00 crosses midnight, must be a night shift");
    assert!(!by_id("matin").is_night, "06:30->14:30 is a plain day shift");
    assert!(by_id("soir-plus").is_night, "20:00->23:59 starts at/after 20:00, must be a night shift");
}

/// Seed scenario 6 (spec.md §8): 25 employees, 2026-03-01..2026-03-31,
/// two absences injected, 30s time limit, expecting `optimal|feasible`
/// with more than 100 assignments.
#[test]
fn pilot_scale_25_employees_31_days_is_feasible() {
    let mut request = ward_roster_core::demo_data::generate(ward_roster_core::demo_data::DemoSize::Pilot);
    request.time_limit_seconds = 30;
    // demo_data::generate already injects one absence for employee 0;
    // add a second, distinct absence so the fixture matches the seed
    // scenario's "two absences injected" literally.
    request.absences.push(Absence {
        employee_id: request.employees[1].id.clone(),
        date_start: request.period_start + chrono::Duration::days(10),
        date_end: request.period_start + chrono::Duration::days(11),
        kind: "conge".to_string(),
    });

    let result = ward_roster_core::solve(request)
        .expect("valid input")
        .expect("pilot-scale demo data should yield a feasible roster");

    assert!(matches!(result.stats.status, SolveStatus::Optimal | SolveStatus::Feasible));
    assert!(
        result.stats.num_assignments > 100,
        "expected > 100 assignments, got {}",
        result.stats.num_assignments
    );
}

/// Boundary behavior (spec.md §8): an empty employee list with any
/// non-trivial coverage requirement must yield either `None` or a result
/// with zero assignments — never a spurious assignment.
#[test]
fn empty_employee_list_yields_none_or_zero_assignments() {
    let request = SolveRequest {
        employees: Vec::new(),
        shift_types: base_shift_types(),
        coverage: vec![CoverageRequirement {
            shift_type_id: "matin".to_string(),
            day_type: DayType::Weekday,
            min_infirmier: 1,
            min_assc: 0,
            min_aide_soignant: 0,
        }],
        absences: Vec::new(),
        constraint_rules: Vec::new(),
        period_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2026, 1, 11).unwrap(),
        locked_assignments: Vec::new(),
        time_limit_seconds: 10,
    };

    match ward_roster_core::solve(request).expect("valid input") {
        None => {}
        Some(result) => assert_eq!(result.stats.num_assignments, 0),
    }
}

/// Boundary behavior (spec.md §8): a one-day, weekday horizon with
/// coverage of exactly 1 infirmier on Matin and exactly one available
/// infirmier must yield exactly one assignment, `(emp, matin, d0)`.
#[test]
fn single_day_single_shift_single_employee_yields_exactly_one_assignment() {
    let period_start = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(); // a Monday
    let request = SolveRequest {
        employees: vec![EmployeeInput {
            id: "emp-0".to_string(),
            role: "infirmier".to_string(),
            activity_rate: 20,
            working_days: vec!["lundi".to_string()],
            preferred_shifts: Vec::new(),
        }],
        shift_types: base_shift_types(),
        coverage: vec![CoverageRequirement {
            shift_type_id: "matin".to_string(),
            day_type: DayType::Weekday,
            min_infirmier: 1,
            min_assc: 0,
            min_aide_soignant: 0,
        }],
        absences: Vec::new(),
        constraint_rules: Vec::new(),
        period_start,
        period_end: period_start,
        locked_assignments: Vec::new(),
        time_limit_seconds: 10,
    };

    let result = ward_roster_core::solve(request)
        .expect("valid input")
        .expect("single available infirmier must cover the single required shift");

    assert_eq!(result.assignments.len(), 1);
    let assignment = &result.assignments[0];
    assert_eq!(assignment.employee_id, "emp-0");
    assert_eq!(assignment.shift_type_id, "matin");
    assert_eq!(assignment.date, period_start);
}

/// Exercises the invariants spec.md §8 requires of every returned
/// result directly against the pilot-scale fixture: no double-booking,
/// availability respected, rest honored, weekly hours within cap.
#[test]
fn pilot_scale_result_satisfies_core_invariants() {
    use std::collections::HashMap;

    let request = ward_roster_core::demo_data::generate(ward_roster_core::demo_data::DemoSize::Pilot);
    let normalized = ward_roster_core::normalize::normalize(request.clone()).expect("valid input");
    let result = ward_roster_core::solve(request)
        .expect("valid input")
        .expect("pilot-scale demo data should be feasible");

    let shift_by_id: HashMap<&str, &ward_roster_core::domain::ShiftType> = normalized
        .shift_types
        .iter()
        .map(|s| (s.id.as_str(), s))
        .collect();
    let employee_by_id: HashMap<&str, &ward_roster_core::domain::Employee> = normalized
        .employees
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();

    // No double-booking: at most one assignment per (employee, date).
    let mut per_employee_day: HashMap<(&str, NaiveDate), usize> = HashMap::new();
    for a in &result.assignments {
        *per_employee_day.entry((a.employee_id.as_str(), a.date)).or_insert(0) += 1;
    }
    assert!(
        per_employee_day.values().all(|&count| count <= 1),
        "no employee may hold two assignments on the same day"
    );

    // Availability: every assignment's weekday is in the employee's working_days.
    for a in &result.assignments {
        let employee = employee_by_id[a.employee_id.as_str()];
        assert!(
            employee.working_days.contains(&a.date.weekday()),
            "employee {} assigned on {} outside their working days",
            a.employee_id,
            a.date
        );
    }

    // Rest: no employee works two consecutive days whose shift pair
    // violates min_rest_hours.
    let mut by_employee: HashMap<&str, Vec<&ward_roster_core::Assignment>> = HashMap::new();
    for a in &result.assignments {
        by_employee.entry(a.employee_id.as_str()).or_default().push(a);
    }
    for assignments in by_employee.values() {
        for a in assignments.iter() {
            let next_day = a.date + chrono::Duration::days(1);
            if let Some(b) = assignments.iter().find(|b| b.date == next_day) {
                let s1 = shift_by_id[a.shift_type_id.as_str()];
                let s2 = shift_by_id[b.shift_type_id.as_str()];
                let gap = if s1.is_night {
                    (s2.start_hour - s1.end_hour).rem_euclid(24.0)
                } else {
                    (24.0 - s1.end_hour) + s2.start_hour
                };
                assert!(
                    gap >= normalized.config.min_rest_hours as f64,
                    "rest violation for {} between {} and {}",
                    a.employee_id,
                    a.date,
                    b.date
                );
            }
        }
    }

    // Weekly hours cap, per ISO-aligned 7-day window.
    let mut window_start = 0;
    while window_start < normalized.days.len() {
        let window_end = (window_start + 7).min(normalized.days.len());
        let window_dates: Vec<NaiveDate> = normalized.days[window_start..window_end]
            .iter()
            .map(|d| d.date)
            .collect();
        let mut deci_hours_by_employee: HashMap<&str, i64> = HashMap::new();
        for a in &result.assignments {
            if !window_dates.contains(&a.date) {
                continue;
            }
            let shift = shift_by_id[a.shift_type_id.as_str()];
            *deci_hours_by_employee.entry(a.employee_id.as_str()).or_insert(0) +=
                shift.duration_deci_hours();
        }
        for (employee_id, total) in deci_hours_by_employee {
            let employee = employee_by_id[employee_id];
            assert!(
                total <= employee.max_weekly_deci_hours(),
                "employee {} exceeds weekly hours cap in window starting at day {}",
                employee_id,
                window_start
            );
        }
        window_start += 7;
    }
}

/// Boundary scenario (spec.md §8): when a free-weekend window requires
/// every employee to be fully free across two consecutive weekends, but
/// coverage also demands weekend work from the same (only) employee, the
/// two hard constraints cannot both hold and the solve must yield `None`.
#[test]
fn weekend_coverage_conflicting_with_free_weekend_quota_is_infeasible() {
    let employees = vec![EmployeeInput {
        id: "emp-0".to_string(),
        role: "infirmier".to_string(),
        activity_rate: 100,
        working_days: vec![
            "lundi".to_string(),
            "mardi".to_string(),
            "mercredi".to_string(),
            "jeudi".to_string(),
            "vendredi".to_string(),
            "samedi".to_string(),
            "dimanche".to_string(),
        ],
        preferred_shifts: Vec::new(),
    }];

    // Two-week horizon containing exactly one free-weekend window (two
    // consecutive Sat/Sun pairs); coverage
    // requires this sole employee to work every Saturday and Sunday,
    // which makes `free_w[k] = 1` impossible for either window while
    // `min_free_weekends_per_2weeks = 1` still demands one.
    let request = SolveRequest {
        employees,
        shift_types: base_shift_types(),
        coverage: vec![
            CoverageRequirement {
                shift_type_id: "matin".to_string(),
                day_type: DayType::Saturday,
                min_infirmier: 1,
                min_assc: 0,
                min_aide_soignant: 0,
            },
            CoverageRequirement {
                shift_type_id: "matin".to_string(),
                day_type: DayType::Sunday,
                min_infirmier: 1,
                min_assc: 0,
                min_aide_soignant: 0,
            },
        ],
        absences: Vec::new(),
        constraint_rules: Vec::new(),
        period_start: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(),
        locked_assignments: Vec::new(),
        time_limit_seconds: 10,
    };

    let result = ward_roster_core::solve(request).expect("valid input");
    assert!(
        result.is_none(),
        "mandatory weekend coverage from the sole employee conflicts with the free-weekend quota"
    );
}

#[test]
fn unknown_role_is_a_normalization_error() {
    let mut request = one_week_request(1);
    request.employees[0].role = "surgeon".to_string();
    let err = ward_roster_core::solve(request).unwrap_err();
    assert!(matches!(err, InputError::UnknownRole { .. }));
}

#[test]
fn activity_rate_working_days_mismatch_is_rejected() {
    let mut request = one_week_request(1);
    request.employees[0].activity_rate = 40;
    // working_days still has 5 entries, but activity_rate=40 expects 2.
    let err = ward_roster_core::solve(request).unwrap_err();
    assert!(matches!(err, InputError::WorkingDaysMismatch { .. }));
}
