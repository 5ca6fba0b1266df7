//! Employees may only cover a shift with a skill they're qualified for.

use nurseroster_core::bits::BitMatrix3D;
use nurseroster_core::domain::{Employee, Shift};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

/// Precomputes `assignable(x, y, w)`: whether shift `x` may be covered by
/// employee `y` using skill `w`.
///
/// Skill-match rule: assignable iff the shift requires no skills at all, or
/// `y` holds `w`, satisfies every required-all-skill at its minimum weight,
/// and — if `required_one_skills` is non-empty — `w` is one of them. The
/// weight threshold on the required-one-skills branch is intentionally not
/// enforced (see the crate's design notes): once `w` is a member of that
/// set and held by the employee at all, that branch is satisfied.
#[derive(Debug)]
pub struct RequiredSkillConstraint {
    assignable: BitMatrix3D,
}

impl RequiredSkillConstraint {
    pub fn new(shifts: &[Shift], employees: &[Employee], skill_count: usize) -> Self {
        let mut assignable = BitMatrix3D::new(shifts.len(), employees.len(), skill_count);
        for (xi, shift) in shifts.iter().enumerate() {
            for (yi, employee) in employees.iter().enumerate() {
                for w in 0..skill_count {
                    if Self::is_assignable(shift, employee, w) {
                        assignable.set(xi, yi, w);
                    }
                }
            }
        }
        Self { assignable }
    }

    fn is_assignable(shift: &Shift, employee: &Employee, w: usize) -> bool {
        if shift.required_all_skills.is_empty() && shift.required_one_skills.is_empty() {
            return true;
        }
        if !employee.skills.contains_key(&w) {
            return false;
        }
        for (&skill, &min_weight) in &shift.required_all_skills {
            if !employee.has_skill_at_least(skill, min_weight) {
                return false;
            }
        }
        if !shift.required_one_skills.is_empty() {
            let satisfies_one = shift
                .required_one_skills
                .keys()
                .any(|&skill| skill == w && employee.skills.contains_key(&skill));
            if !satisfies_one {
                return false;
            }
        }
        true
    }
}

impl Constraint for RequiredSkillConstraint {
    fn name(&self) -> &str {
        "RequiredSkill"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();
        for x in 0..size.x {
            for y in 0..size.y {
                for w in 0..size.w {
                    if self.assignable.get(x, y, w) {
                        continue;
                    }
                    for z in 0..size.z {
                        if state.get(x, y, z, w) {
                            score.violate(Violation::new(
                                x,
                                y,
                                z,
                                w,
                                CoordinateFlags::X | CoordinateFlags::Y | CoordinateFlags::Z | CoordinateFlags::W,
                                StrictHardSoftScore::of_hard(-1),
                            ));
                        }
                    }
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
    use nurseroster_core::domain::{Day, GeneralConstraints, Skill, WeekdayMask};
    use nurseroster_core::time::{DailyInterval, Instant, Range};
    use nurseroster_core::{Axis, Size};
    use std::collections::HashMap;

    fn make_shift(required_all: HashMap<usize, u32>) -> Shift {
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
            required_all_skills: required_all,
            required_one_skills: HashMap::new(),
            blocked_next_day_shifts: Vec::new(),
        }
    }

    fn make_day() -> Day {
        let start = Instant::from_naive(Berlin, chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap()).unwrap();
        let end = Instant::from_naive(Berlin, chrono::NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap()).unwrap();
        Day::new(0, Range::new(start, end))
    }

    fn make_employee() -> Employee {
        Employee {
            index: 0,
            name: "E".into(),
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
        }
    }

    #[test]
    fn assigning_an_unqualified_employee_is_flagged() {
        let mut required = HashMap::new();
        required.insert(0, 2);
        let shift = make_shift(required);
        let employee = make_employee().with_skill(0, 1);

        let constraint = RequiredSkillConstraint::new(&[shift.clone()], &[employee.clone()], 1);

        let shift_axis = Axis::new(vec![shift]);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(vec![make_day()]);
        let skill_axis = Axis::new(vec![Skill::new(0, "s")]);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);

        let result = constraint.evaluate(&state);
        assert_eq!(result.score(), StrictHardSoftScore::of_hard(-1));
    }

    #[test]
    fn assigning_a_qualified_employee_is_not_flagged() {
        let mut required = HashMap::new();
        required.insert(0, 2);
        let shift = make_shift(required);
        let employee = make_employee().with_skill(0, 5);

        let constraint = RequiredSkillConstraint::new(&[shift.clone()], &[employee.clone()], 1);

        let shift_axis = Axis::new(vec![shift]);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(vec![make_day()]);
        let skill_axis = Axis::new(vec![Skill::new(0, "s")]);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);

        let result = constraint.evaluate(&state);
        assert_eq!(result.violations().len(), 0);
    }

    #[test]
    fn a_shift_with_no_skill_requirements_accepts_anyone() {
        let shift = make_shift(HashMap::new());
        let employee = make_employee();

        let constraint = RequiredSkillConstraint::new(&[shift.clone()], &[employee.clone()], 1);

        let shift_axis = Axis::new(vec![shift]);
        let employee_axis = Axis::new(vec![employee]);
        let day_axis = Axis::new(vec![make_day()]);
        let skill_axis = Axis::new(vec![Skill::new(0, "s")]);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shift_axis, &employee_axis, &day_axis, &skill_axis);
        state.set(0, 0, 0, 0);

        let result = constraint.evaluate(&state);
        assert_eq!(result.violations().len(), 0);
    }
}
