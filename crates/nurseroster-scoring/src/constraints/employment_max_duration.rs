//! Per (employee, skill) workload caps: strategy-derived maximum minutes
//! plus a tolerated overtime allowance before the penalty escalates from
//! hard to strict.

use nurseroster_core::domain::{Day, Employee, Shift};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

use super::shift_geometry::DurationTable;

#[derive(Debug)]
pub struct EmploymentMaxDurationConstraint {
    durations: DurationTable,
}

impl EmploymentMaxDurationConstraint {
    pub fn new(shifts: &[Shift], days: &[Day]) -> Self {
        Self {
            durations: DurationTable::build(shifts, days),
        }
    }
}

impl Constraint for EmploymentMaxDurationConstraint {
    fn name(&self) -> &str {
        "EmploymentMaxDuration"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();
        for y in 0..size.y {
            let employee: &Employee = &state.employees()[y];
            for w in 0..size.w {
                let Some(assignment) = employee.skills.get(&w) else {
                    continue;
                };
                let mut total_minutes = 0i64;
                for x in 0..size.x {
                    for z in 0..size.z {
                        if state.get(x, y, z, w) {
                            total_minutes += self.durations.get(x, z);
                        }
                    }
                }
                let max_minutes = assignment.max_workload_minutes();
                if !max_minutes.is_finite() {
                    continue;
                }
                let max_minutes = max_minutes as i64;
                let overtime = assignment.overtime_allowance_minutes as i64;
                let over_by = total_minutes - max_minutes;
                if over_by > overtime {
                    score.violate(Violation::new(
                        0,
                        y,
                        0,
                        w,
                        CoordinateFlags::Y | CoordinateFlags::W,
                        StrictHardSoftScore::of_strict(-1),
                    ));
                } else if over_by > 0 {
                    score.violate(Violation::new(
                        0,
                        y,
                        0,
                        w,
                        CoordinateFlags::Y | CoordinateFlags::W,
                        StrictHardSoftScore::of_hard(-2 * over_by),
                    ));
                }
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
    use nurseroster_core::domain::{GeneralConstraints, SkillAssignment, SkillStrategy, WeekdayMask};
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

    fn make_day(index: usize) -> Day {
        let start = Instant::from_naive(Berlin, chrono::NaiveDate::from_ymd_opt(2026, 1, 5 + index as u32).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap()).unwrap();
        let end = Instant::from_naive(Berlin, chrono::NaiveDate::from_ymd_opt(2026, 1, 6 + index as u32).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap()).unwrap();
        Day::new(index, Range::new(start, end))
    }

    fn make_employee(overtime_allowance_minutes: u32, static_load_factor: f64) -> Employee {
        let mut skills = HashMap::new();
        skills.insert(
            0,
            SkillAssignment {
                weight: 1,
                strategy: SkillStrategy::Static,
                workload_change_event: None,
                static_load_factor,
                dynamic_load_hours: 0.0,
                overtime_allowance_minutes,
            },
        );
        Employee {
            index: 0,
            name: "E".into(),
            skills,
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
        }
    }

    fn run(employee: Employee, worked_days: usize) -> StrictHardSoftScore {
        let shift = make_shift();
        let days: Vec<Day> = (0..worked_days).map(make_day).collect();

        let shift_axis = Axis::new(vec![shift]);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(days.clone());
        let skill_axis = Axis::new(vec![nurseroster_core::domain::Skill::new(0, "s")]);
        let size = Size::new(1, 1, worked_days, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        for z in 0..worked_days {
            state.set(0, 0, z, 0);
        }

        let constraint = EmploymentMaxDurationConstraint::new(shift_axis.as_slice(), &days);
        constraint.evaluate(&state).score()
    }

    #[test]
    fn staying_within_the_cap_is_not_flagged() {
        // static_load_factor 1.0 allows 168h/week; one 8h shift is nowhere near it.
        let employee = make_employee(0, 1.0);
        assert_eq!(run(employee, 1), StrictHardSoftScore::ZERO);
    }

    #[test]
    fn exceeding_the_cap_within_the_allowance_is_hard_not_strict() {
        // static_load_factor near zero gives a tiny cap so a single 8h shift overshoots it.
        let employee = make_employee(600, 0.0001);
        let score = run(employee, 1);
        assert_eq!(score.strict(), 0);
        assert!(score.hard() < 0);
    }

    #[test]
    fn exceeding_the_cap_past_the_allowance_escalates_to_strict() {
        let employee = make_employee(0, 0.0001);
        let score = run(employee, 1);
        assert_eq!(score.strict(), -1);
    }
}
