//! Horizon-wide work-pattern limits per employee: consecutive-shift runs,
//! consecutive-days-off runs, and a cap on working weekends.
//!
//! The working-weekend counter accumulates across the whole horizon (not
//! reset per working block) — see the crate's design notes for why that of
//! the two source policies was kept.

use nurseroster_core::domain::{Day, Employee, Shift};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

use super::shift_geometry::DurationTable;

#[derive(Debug)]
pub struct EmployeeGeneralConstraint {
    weekends: Vec<bool>,
    durations: DurationTable,
}

impl EmployeeGeneralConstraint {
    pub fn new(shifts: &[Shift], days: &[Day]) -> Self {
        let weekends = days
            .iter()
            .map(|d| matches!(d.weekday, chrono::Weekday::Sat | chrono::Weekday::Sun))
            .collect();
        Self {
            weekends,
            durations: DurationTable::build(shifts, days),
        }
    }

    fn run_duration(&self, state: &State<'_>, y: usize, z_start: usize, z_end: usize, size_x: usize) -> i64 {
        let mut total = 0;
        for z in z_start..z_end {
            for x in 0..size_x {
                if state.get_xyz_any(x, y, z) {
                    total += self.durations.get(x, z);
                }
            }
        }
        total
    }

    fn close_shift_run(&self, score: &mut ConstraintScore, employee: &Employee, y: usize, start: usize, end: usize, state: &State<'_>, size_x: usize) {
        let run_len = (end - start) as u32;
        if run_len > employee.general.max_consecutive_shifts {
            let excess = run_len - employee.general.max_consecutive_shifts;
            let duration = self.run_duration(state, y, end.saturating_sub(excess as usize), end, size_x);
            score.violate(Violation::new(
                0,
                y,
                start,
                0,
                CoordinateFlags::Y | CoordinateFlags::Z,
                StrictHardSoftScore::of_hard(-duration.max(excess as i64)),
            ));
        } else if run_len < employee.general.min_consecutive_shifts && start > 0 {
            let deficit = employee.general.min_consecutive_shifts - run_len;
            score.violate(Violation::new(
                0,
                y,
                start,
                0,
                CoordinateFlags::Y | CoordinateFlags::Z,
                StrictHardSoftScore::of_hard(-(deficit as i64)),
            ));
        }
    }

    fn close_days_off_run(&self, score: &mut ConstraintScore, employee: &Employee, y: usize, start: usize, end: usize) {
        let run_len = (end - start) as u32;
        if run_len < employee.general.min_consecutive_days_off {
            let deficit = employee.general.min_consecutive_days_off - run_len;
            score.violate(Violation::new(
                0,
                y,
                start,
                0,
                CoordinateFlags::Y | CoordinateFlags::Z,
                StrictHardSoftScore::of_hard(-(deficit as i64)),
            ));
        }
    }
}

impl Constraint for EmployeeGeneralConstraint {
    fn name(&self) -> &str {
        "EmployeeGeneral"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();

        for y in 0..size.y {
            let employee: &Employee = &state.employees()[y];
            let works: Vec<bool> = (0..size.z)
                .map(|z| (0..size.x).any(|x| state.get_xyz_any(x, y, z)))
                .collect();

            let mut run_start: Option<usize> = None;
            let mut off_start: Option<usize> = None;
            let mut weekend_count = 0u32;
            let mut last_weekend_id: Option<usize> = None;

            for z in 0..size.z {
                if works[z] {
                    if let Some(start) = off_start.take() {
                        self.close_days_off_run(&mut score, employee, y, start, z);
                    }
                    if run_start.is_none() {
                        run_start = Some(z);
                    }
                    if self.weekends.get(z).copied().unwrap_or(false) {
                        // A Saturday/Sunday pair counts as one "working weekend";
                        // a lone Sunday with no preceding Saturday in range still
                        // starts its own weekend id.
                        let weekend_id = if z > 0 && self.weekends.get(z - 1).copied().unwrap_or(false) {
                            z - 1
                        } else {
                            z
                        };
                        if last_weekend_id != Some(weekend_id) {
                            weekend_count += 1;
                            last_weekend_id = Some(weekend_id);
                        }
                    }
                } else if let Some(start) = run_start.take() {
                    self.close_shift_run(&mut score, employee, y, start, z, state, size.x);
                    off_start.get_or_insert(z);
                } else {
                    off_start.get_or_insert(z);
                }
            }
            if let Some(start) = run_start {
                self.close_shift_run(&mut score, employee, y, start, size.z, state, size.x);
            }
            if let Some(start) = off_start {
                self.close_days_off_run(&mut score, employee, y, start, size.z);
            }
            if weekend_count > employee.general.max_working_weekends {
                score.violate(Violation::new(
                    0,
                    y,
                    0,
                    0,
                    CoordinateFlags::Y,
                    StrictHardSoftScore::of_hard(-((weekend_count - employee.general.max_working_weekends) as i64)),
                ));
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use chrono_tz::Europe::Berlin;
    use nurseroster_core::domain::{GeneralConstraints, WeekdayMask};
    use nurseroster_core::time::{DailyInterval, Instant, Range};
    use nurseroster_core::{Axis, Size};
    use std::collections::HashMap;

    fn make_shift() -> Shift {
        Shift {
            index: 0,
            name: "D".into(),
            weekday_mask: WeekdayMask::new(0b0111_1111),
            interval: DailyInterval::new(NaiveTime::from_hms_opt(8, 0, 0).unwrap(), NaiveTime::from_hms_opt(16, 0, 0).unwrap()),
            default_slot_count: 1,
            slot_overrides: HashMap::new(),
            min_slots: 0,
            max_slots: 1,
            min_slot_overrides: HashMap::new(),
            rest_minutes_before: 0,
            rest_minutes_after: 0,
            consecutive_rest_minutes: 0,
            required_all_skills: HashMap::new(),
            required_one_skills: HashMap::new(),
            blocked_next_day_shifts: Vec::new(),
        }
    }

    fn make_day(index: usize, weekday: chrono::Weekday) -> Day {
        let start = Instant::from_naive(Berlin, chrono::NaiveDate::from_ymd_opt(2026, 1, 5 + index as u32).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap()).unwrap();
        let end = Instant::from_naive(Berlin, chrono::NaiveDate::from_ymd_opt(2026, 1, 6 + index as u32).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap()).unwrap();
        Day {
            index,
            range: Range::new(start, end),
            weekday,
        }
    }

    fn make_employee(general: GeneralConstraints) -> Employee {
        Employee {
            index: 0,
            name: "E".into(),
            skills: HashMap::new(),
            paid_unavailable: Default::default(),
            unpaid_unavailable: Default::default(),
            desired: Default::default(),
            general,
        }
    }

    #[test]
    fn exceeding_max_consecutive_shifts_is_flagged_hard() {
        let shift = make_shift();
        let days: Vec<Day> = (0..3).map(|i| make_day(i, chrono::Weekday::Mon)).collect();
        let general = GeneralConstraints {
            min_consecutive_shifts: 0,
            max_consecutive_shifts: 2,
            min_consecutive_days_off: 0,
            max_working_weekends: u32::MAX,
            max_cumulative_fatigue_minutes: u32::MAX,
        };
        let employee = make_employee(general);

        let shift_axis = Axis::new(vec![shift]);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(days.clone());
        let skill_axis = Axis::new(vec![nurseroster_core::domain::Skill::new(0, "s")]);
        let size = Size::new(1, 1, 3, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);
        state.set(0, 0, 1, 0);
        state.set(0, 0, 2, 0);

        let constraint = EmployeeGeneralConstraint::new(shift_axis.as_slice(), &days);
        let result = constraint.evaluate(&state);
        assert!(result.score().hard() < 0);
    }

    #[test]
    fn short_days_off_run_is_flagged_hard() {
        let shift = make_shift();
        let days: Vec<Day> = (0..4).map(|i| make_day(i, chrono::Weekday::Mon)).collect();
        let general = GeneralConstraints {
            min_consecutive_shifts: 0,
            max_consecutive_shifts: u32::MAX,
            min_consecutive_days_off: 2,
            max_working_weekends: u32::MAX,
            max_cumulative_fatigue_minutes: u32::MAX,
        };
        let employee = make_employee(general);

        let shift_axis = Axis::new(vec![shift]);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(days.clone());
        let skill_axis = Axis::new(vec![nurseroster_core::domain::Skill::new(0, "s")]);
        let size = Size::new(1, 1, 4, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);
        // day 1 off
        state.set(0, 0, 2, 0);
        state.set(0, 0, 3, 0);

        let constraint = EmployeeGeneralConstraint::new(shift_axis.as_slice(), &days);
        let result = constraint.evaluate(&state);
        assert_eq!(result.score(), StrictHardSoftScore::of_hard(-1));
    }

    #[test]
    fn a_worked_weekend_counts_against_the_cap() {
        let shift = make_shift();
        let days = vec![make_day(0, chrono::Weekday::Sat), make_day(1, chrono::Weekday::Sun)];
        let general = GeneralConstraints {
            min_consecutive_shifts: 0,
            max_consecutive_shifts: u32::MAX,
            min_consecutive_days_off: 0,
            max_working_weekends: 0,
            max_cumulative_fatigue_minutes: u32::MAX,
        };
        let employee = make_employee(general);

        let shift_axis = Axis::new(vec![shift]);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(days.clone());
        let skill_axis = Axis::new(vec![nurseroster_core::domain::Skill::new(0, "s")]);
        let size = Size::new(1, 1, 2, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);
        state.set(0, 0, 1, 0);

        let constraint = EmployeeGeneralConstraint::new(shift_axis.as_slice(), &days);
        let result = constraint.evaluate(&state);
        assert_eq!(result.score(), StrictHardSoftScore::of_hard(-1));
    }
}
