//! A shift may only be worked on the days its weekday mask permits.

use nurseroster_core::bits::BitMatrix;
use nurseroster_core::domain::{Day, Shift};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

/// `invalid[x,z]` is set when `z`'s weekday is outside `x`'s weekday mask —
/// i.e. the shift must never be worked that day.
#[derive(Debug)]
pub struct ValidShiftDayConstraint {
    invalid: BitMatrix,
}

impl ValidShiftDayConstraint {
    pub fn new(shifts: &[Shift], days: &[Day]) -> Self {
        let mut invalid = BitMatrix::new(shifts.len(), days.len());
        for (xi, shift) in shifts.iter().enumerate() {
            for (zi, day) in days.iter().enumerate() {
                if !shift.is_scheduled_on(day.weekday, false) {
                    invalid.set(xi, zi);
                }
            }
        }
        Self { invalid }
    }
}

impl Constraint for ValidShiftDayConstraint {
    fn name(&self) -> &str {
        "ValidShiftDay"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();
        for x in 0..size.x {
            for z in 0..size.z {
                if !self.invalid.get(x, z) {
                    continue;
                }
                let any_assigned = (0..size.y).any(|y| state.get_xyz_any(x, y, z));
                if any_assigned {
                    score.violate(Violation::new(
                        x,
                        0,
                        z,
                        0,
                        CoordinateFlags::X | CoordinateFlags::Z,
                        StrictHardSoftScore::of_hard(-1),
                    ));
                }
            }
        }
        score
    }
}
