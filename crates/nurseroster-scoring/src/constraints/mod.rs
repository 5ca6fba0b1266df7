//! The nine rostering constraints, each pre-computing its own conflict
//! structure from the instance axes once at construction.

mod cumulative_fatigue;
mod employee_availability;
mod employee_general;
mod employment_max_duration;
mod no_overlap;
mod required_skill;
mod rest_between_shifts;
mod shift_coverage;
pub mod shift_geometry;
mod valid_shift_day;

pub use cumulative_fatigue::CumulativeFatigueConstraint;
pub use employee_availability::EmployeeAvailabilityConstraint;
pub use employee_general::EmployeeGeneralConstraint;
pub use employment_max_duration::EmploymentMaxDurationConstraint;
pub use no_overlap::NoOverlapConstraint;
pub use required_skill::RequiredSkillConstraint;
pub use rest_between_shifts::RestBetweenShiftsConstraint;
pub use shift_coverage::{ShiftCoverageConstraint, OVERSTAFFED, UNDERSTAFFED};
pub use valid_shift_day::ValidShiftDayConstraint;

use nurseroster_core::domain::{Day, Employee, Shift, Skill};

use crate::constraint::Constraint;

/// Builds all nine constraints from the instance's axes, ready to be handed
/// to a search task as a `Vec<Box<dyn Constraint>>`.
pub fn build_all(shifts: &[Shift], employees: &[Employee], days: &[Day], skills: &[Skill]) -> Vec<Box<dyn Constraint>> {
    vec![
        Box::new(NoOverlapConstraint::new(shifts)),
        Box::new(RestBetweenShiftsConstraint::new(shifts)),
        Box::new(RequiredSkillConstraint::new(shifts, employees, skills.len())),
        Box::new(ShiftCoverageConstraint::new(shifts, days)),
        Box::new(EmploymentMaxDurationConstraint::new(shifts, days)),
        Box::new(EmployeeAvailabilityConstraint::new(shifts, employees, days)),
        Box::new(EmployeeGeneralConstraint::new(shifts, days)),
        Box::new(ValidShiftDayConstraint::new(shifts, days)),
        Box::new(CumulativeFatigueConstraint::new(shifts, days)),
    ]
}
