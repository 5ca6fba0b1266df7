//! Shared test fixtures: a tiny synthetic instance reused across
//! perturbator and task unit tests instead of each file re-deriving its
//! own axes.

#![cfg(test)]

use std::collections::HashMap;

use chrono::NaiveTime;
use chrono_tz::Europe::Berlin;
use nurseroster_core::domain::{Day, Employee, GeneralConstraints, Shift, Skill, WeekdayMask};
use nurseroster_core::time::{DailyInterval, Instant, Range};
use nurseroster_core::Axis;

pub fn fixture_axes(
    shift_count: usize,
    employee_count: usize,
    day_count: usize,
    skill_count: usize,
) -> (Axis<Shift>, Axis<Employee>, Axis<Day>, Axis<Skill>) {
    let shifts = (0..shift_count)
        .map(|x| Shift {
            index: x,
            name: format!("s{x}"),
            weekday_mask: WeekdayMask::new(0b0111_1111),
            interval: DailyInterval::new(
                NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
            ),
            default_slot_count: 1,
            slot_overrides: HashMap::new(),
            min_slots: 0,
            max_slots: employee_count.max(1) as u32,
            min_slot_overrides: HashMap::new(),
            rest_minutes_before: 0,
            rest_minutes_after: 0,
            consecutive_rest_minutes: 0,
            required_all_skills: HashMap::new(),
            required_one_skills: HashMap::new(),
            blocked_next_day_shifts: Vec::new(),
        })
        .collect();

    let employees = (0..employee_count)
        .map(|y| Employee {
            index: y,
            name: format!("e{y}"),
            skills: HashMap::new(),
            paid_unavailable: Default::default(),
            unpaid_unavailable: Default::default(),
            desired: Default::default(),
            general: GeneralConstraints {
                min_consecutive_shifts: 0,
                max_consecutive_shifts: u32::MAX,
                min_consecutive_days_off: 0,
                max_working_weekends: u32::MAX,
                max_cumulative_fatigue_minutes: u32::MAX,
            },
        })
        .collect();

    let days = (0..day_count)
        .map(|z| {
            let start = Instant::from_naive(
                Berlin,
                chrono::NaiveDate::from_ymd_opt(2026, 1, 5 + z as u32).unwrap(),
                NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            )
            .unwrap();
            let end = Instant::from_naive(
                Berlin,
                chrono::NaiveDate::from_ymd_opt(2026, 1, 6 + z as u32).unwrap(),
                NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
            )
            .unwrap();
            Day::new(z, Range::new(start, end))
        })
        .collect();

    let skills = (0..skill_count).map(|w| Skill::new(w, format!("sk{w}"))).collect();

    (Axis::new(shifts), Axis::new(employees), Axis::new(days), Axis::new(skills))
}
