//! Bounds the cumulative duration of an unbroken chain of shifts: a chain
//! continues across a break shorter than the shift's own
//! `consecutive_rest_minutes`.

use nurseroster_core::domain::{Day, Employee, Shift};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

use super::shift_geometry::{minute_span, DurationTable, MINUTES_PER_DAY};

/// Shift indices sorted by `(end_minute DESC, start_minute ASC)`: when
/// several shifts are assigned the same day, scanning in this order picks
/// the one that extends latest into the next day first, matching how a
/// chain is greedily extended forward.
#[derive(Debug)]
pub struct CumulativeFatigueConstraint {
    sorted_shift_order: Vec<usize>,
    durations: DurationTable,
}

impl CumulativeFatigueConstraint {
    pub fn new(shifts: &[Shift], days: &[Day]) -> Self {
        let mut sorted_shift_order: Vec<usize> = (0..shifts.len()).collect();
        sorted_shift_order.sort_by_key(|&x| {
            let (start, end) = minute_span(&shifts[x].interval);
            (std::cmp::Reverse(end), start)
        });
        Self {
            sorted_shift_order,
            durations: DurationTable::build(shifts, days),
        }
    }

    /// Finds the shift, among those assigned to `(y, z)`, that `sorted_shift_order`
    /// ranks first.
    fn pick_shift(&self, state: &State<'_>, y: usize, z: usize) -> Option<usize> {
        self.sorted_shift_order
            .iter()
            .copied()
            .find(|&x| state.get_xyz_any(x, y, z))
    }
}

impl Constraint for CumulativeFatigueConstraint {
    fn name(&self) -> &str {
        "CumulativeFatigue"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();

        for y in 0..size.y {
            let employee: &Employee = &state.employees()[y];
            let cap = employee.general.max_cumulative_fatigue_minutes;
            if cap == u32::MAX {
                continue;
            }
            let mut z = 0usize;
            while z < size.z {
                let Some(first_shift) = self.pick_shift(state, y, z) else {
                    z += 1;
                    continue;
                };
                let chain_start = z;
                let mut cumulative = self.durations.get(first_shift, z);
                let mut last_shift = first_shift;
                let mut last_day = z;
                let mut cursor = z + 1;
                while cursor < size.z {
                    let Some(next_shift) = self.pick_shift(state, y, cursor) else {
                        break;
                    };
                    let rest_threshold = state.shifts()[last_shift].consecutive_rest_minutes as i64;
                    let (_, last_end) = minute_span(&state.shifts()[last_shift].interval);
                    let (next_start, _) = minute_span(&state.shifts()[next_shift].interval);
                    let delta_z = (cursor - last_day) as i64;
                    let break_minutes = delta_z * MINUTES_PER_DAY + next_start - last_end;
                    if break_minutes >= rest_threshold && rest_threshold > 0 {
                        break;
                    }
                    cumulative += self.durations.get(next_shift, cursor);
                    last_shift = next_shift;
                    last_day = cursor;
                    cursor += 1;
                }
                if cumulative > cap as i64 {
                    score.violate(Violation::new(
                        0,
                        y,
                        chain_start,
                        0,
                        CoordinateFlags::Y | CoordinateFlags::Z,
                        StrictHardSoftScore::of_hard(-1),
                    ));
                }
                z = cursor.max(chain_start + 1);
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nurseroster_core::domain::WeekdayMask;
    use nurseroster_core::time::{DailyInterval, Instant, Range};
    use nurseroster_core::{Axis, Size};
    use chrono::NaiveTime;
    use chrono_tz::Europe::Berlin;
    use std::collections::HashMap;

    fn make_shift(index: usize, start_h: u32, end_h: u32, consecutive_rest_minutes: u32) -> Shift {
        Shift {
            index,
            name: format!("s{index}"),
            weekday_mask: WeekdayMask::new(0b0111_1111),
            interval: DailyInterval::new(
                NaiveTime::from_hms_opt(start_h, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(end_h, 0, 0).unwrap(),
            ),
            default_slot_count: 1,
            slot_overrides: HashMap::new(),
            min_slots: 0,
            max_slots: 1,
            min_slot_overrides: HashMap::new(),
            rest_minutes_before: 0,
            rest_minutes_after: 0,
            consecutive_rest_minutes,
            required_all_skills: HashMap::new(),
            required_one_skills: HashMap::new(),
            blocked_next_day_shifts: Vec::new(),
        }
    }

    fn make_day(index: usize) -> Day {
        let start = Instant::from_naive(
            Berlin,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5 + index as u32).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();
        let end = Instant::from_naive(
            Berlin,
            chrono::NaiveDate::from_ymd_opt(2026, 1, 6 + index as u32).unwrap(),
            NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap();
        Day::new(index, Range::new(start, end))
    }

    fn make_employee(cap: u32) -> Employee {
        let mut employee = Employee::new(0, "E");
        employee.general.max_cumulative_fatigue_minutes = cap;
        employee
    }

    #[test]
    fn short_real_rest_merges_the_chain_and_flags_it() {
        // Shift A ends at 22:00, shift B starts at 02:00 the next day: a
        // 4-hour gap, shorter than A's 10-hour rest requirement, so the
        // chain continues and their durations (8h + 8h = 16h) exceed the cap.
        let shifts = vec![make_shift(0, 14, 22, 600), make_shift(1, 2, 10, 600)];
        let days = vec![make_day(0), make_day(1)];
        let constraint = CumulativeFatigueConstraint::new(&shifts, &days);

        let employee = make_employee(900);
        let shift_axis = Axis::new(shifts);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(days);
        let skill_axis = Axis::new(vec![nurseroster_core::domain::Skill::new(0, "s")]);

        let size = Size::new(2, 1, 2, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);
        state.set(1, 0, 1, 0);

        let result = constraint.evaluate(&state);
        assert_eq!(result.violations().len(), 1);
    }

    #[test]
    fn ample_real_rest_breaks_the_chain() {
        // Two identical 8-hour shifts scheduled daily leave 16 hours of real
        // rest, well above the 4-hour threshold, so each day starts its own
        // chain and the cap is never hit.
        let shifts = vec![make_shift(0, 8, 16, 240)];
        let days = vec![make_day(0), make_day(1)];
        let constraint = CumulativeFatigueConstraint::new(&shifts, &days);

        let employee = make_employee(500);
        let shift_axis = Axis::new(shifts);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(days);
        let skill_axis = Axis::new(vec![nurseroster_core::domain::Skill::new(0, "s")]);

        let size = Size::new(1, 1, 2, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);
        state.set(0, 0, 1, 0);

        let result = constraint.evaluate(&state);
        assert_eq!(result.violations().len(), 0);
    }
}
