//! Each (shift, day) slot must be covered by the right number of employees.

use nurseroster_core::domain::{Day, Shift};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

use super::shift_geometry::DurationTable;

/// `Violation::info` value for an over-covered (too many employees) slot.
pub const OVERSTAFFED: u8 = 0;
/// `Violation::info` value for an under-covered (too few employees) slot —
/// the case `RankedIntersectionTogglePerturbator` looks for.
pub const UNDERSTAFFED: u8 = 1;

#[derive(Debug)]
pub struct ShiftCoverageConstraint {
    durations: DurationTable,
}

impl ShiftCoverageConstraint {
    pub fn new(shifts: &[Shift], days: &[Day]) -> Self {
        Self {
            durations: DurationTable::build(shifts, days),
        }
    }
}

impl Constraint for ShiftCoverageConstraint {
    fn name(&self) -> &str {
        "ShiftCoverage"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();
        for x in 0..size.x {
            let shift = &state.shifts()[x];
            for z in 0..size.z {
                let covered = (0..size.y).filter(|&y| state.get_xyz_any(x, y, z)).count() as i64;
                let slot_count = shift.slot_count_on(z) as i64;
                let duration = self.durations.get(x, z);
                if covered > slot_count {
                    score.violate(
                        Violation::new(
                            x,
                            0,
                            z,
                            0,
                            CoordinateFlags::X | CoordinateFlags::Z,
                            StrictHardSoftScore::of_hard(-(covered - slot_count) * duration),
                        )
                        .with_info(OVERSTAFFED),
                    );
                } else {
                    let min_slots = shift.min_slot_count_on(z) as i64;
                    if covered < min_slots {
                        score.violate(
                            Violation::new(
                                x,
                                0,
                                z,
                                0,
                                CoordinateFlags::X | CoordinateFlags::Z,
                                StrictHardSoftScore::of_hard(-(min_slots - covered) * duration),
                            )
                            .with_info(UNDERSTAFFED),
                        );
                    }
                }
            }
        }
        score
    }
}
