//! Scores each assignment against the employee's unavailability and
//! desired-availability windows, plus any signed per-day/per-shift request.

use nurseroster_core::bits::BitMatrix3D;
use nurseroster_core::domain::{Day, Employee, Shift};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

/// `unavailable[x,y,z]`: employee `y` is paid- or unpaid-unavailable for the
/// whole of shift `x` on day `z`. `desired[x,y,z]`: the shift falls in the
/// employee's desired-availability ranges.
#[derive(Debug)]
pub struct EmployeeAvailabilityConstraint {
    unavailable: BitMatrix3D,
    desired: BitMatrix3D,
}

impl EmployeeAvailabilityConstraint {
    pub fn new(shifts: &[Shift], employees: &[Employee], days: &[Day]) -> Self {
        let (x, y, z) = (shifts.len(), employees.len(), days.len());
        let mut unavailable = BitMatrix3D::new(x, y, z);
        let mut desired = BitMatrix3D::new(x, y, z);

        for (xi, shift) in shifts.iter().enumerate() {
            for (yi, employee) in employees.iter().enumerate() {
                for (zi, day) in days.iter().enumerate() {
                    let tz = day.range.start.timezone();
                    let Ok(range) = shift.interval.to_range(tz, day.range.start.date()) else {
                        continue;
                    };
                    if employee.paid_unavailable.overlaps(&range) || employee.unpaid_unavailable.overlaps(&range) {
                        unavailable.set(xi, yi, zi);
                    }
                    if employee.desired.covers(&range) {
                        desired.set(xi, yi, zi);
                    }
                }
            }
        }

        Self { unavailable, desired }
    }
}

impl Constraint for EmployeeAvailabilityConstraint {
    fn name(&self) -> &str {
        "EmployeeAvailability"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();
        for x in 0..size.x {
            for y in 0..size.y {
                let employee = &state.employees()[y];
                for z in 0..size.z {
                    if !state.get_xyz_any(x, y, z) {
                        continue;
                    }
                    let flags = CoordinateFlags::X | CoordinateFlags::Y | CoordinateFlags::Z;
                    if self.unavailable.get(x, y, z) {
                        score.violate(Violation::new(x, y, z, 0, flags, StrictHardSoftScore::of_hard(-1)));
                    }
                    if self.desired.get(x, y, z) {
                        score.violate(Violation::new(x, y, z, 0, flags, StrictHardSoftScore::of_soft(1)));
                    }
                    let specific = employee.desired.specific_weight_for(z, x)
                        + employee.paid_unavailable.specific_weight_for(z, x)
                        + employee.unpaid_unavailable.specific_weight_for(z, x);
                    if specific != 0 {
                        score.violate(Violation::new(x, y, z, 0, flags, StrictHardSoftScore::of_soft(specific)));
                    }
                }
            }
        }
        score
    }
}
