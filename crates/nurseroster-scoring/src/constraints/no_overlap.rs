//! The same employee cannot cover two shifts whose intervals overlap.

use nurseroster_core::bits::{BitSquareMatrix, BitSymmetricalMatrix};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

use super::shift_geometry::{cross_day_overlap, same_day_overlap};

/// Pre-computes which shift pairs conflict when scheduled the same day, and
/// which directed pairs conflict across a day boundary (an overnight shift
/// the day before spilling into a shift the next day).
#[derive(Debug)]
pub struct NoOverlapConstraint {
    same_day: BitSymmetricalMatrix,
    cross_day: BitSquareMatrix,
}

impl NoOverlapConstraint {
    pub fn new(shifts: &[nurseroster_core::domain::Shift]) -> Self {
        let n = shifts.len();
        let mut same_day = BitSymmetricalMatrix::new(n);
        let mut cross_day = BitSquareMatrix::new(n);
        for x1 in 0..n {
            for x2 in x1..n {
                if x1 != x2 && same_day_overlap(&shifts[x1], &shifts[x2]) {
                    same_day.set(x1, x2);
                }
            }
        }
        for x1 in 0..n {
            for x2 in 0..n {
                if cross_day_overlap(&shifts[x1], &shifts[x2]) {
                    cross_day.set(x1, x2);
                }
            }
        }
        Self { same_day, cross_day }
    }
}

impl Constraint for NoOverlapConstraint {
    fn name(&self) -> &str {
        "NoOverlap"
    }

    fn is_hard(&self) -> bool {
        true
    }

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore {
        let size = state.size();
        let mut score = ConstraintScore::new();
        for y in 0..size.y {
            for z in 0..size.z {
                for x1 in 0..size.x {
                    if !state.get_xyz_any(x1, y, z) {
                        continue;
                    }
                    for x2 in (x1 + 1)..size.x {
                        if self.same_day.get(x1, x2) && state.get_xyz_any(x2, y, z) {
                            score.violate(Violation::new(
                                x1,
                                y,
                                z,
                                0,
                                CoordinateFlags::X | CoordinateFlags::Y | CoordinateFlags::Z,
                                StrictHardSoftScore::of_hard(-1),
                            ));
                            score.violate(Violation::new(
                                x2,
                                y,
                                z,
                                0,
                                CoordinateFlags::X | CoordinateFlags::Y | CoordinateFlags::Z,
                                StrictHardSoftScore::of_hard(-1),
                            ));
                        }
                    }
                    if z + 1 < size.z {
                        for x2 in 0..size.x {
                            if self.cross_day.get(x1, x2) && state.get_xyz_any(x2, y, z + 1) {
                                score.violate(Violation::new(
                                    x1,
                                    y,
                                    z,
                                    0,
                                    CoordinateFlags::X | CoordinateFlags::Y | CoordinateFlags::Z,
                                    StrictHardSoftScore::of_hard(-1),
                                ));
                                score.violate(Violation::new(
                                    x2,
                                    y,
                                    z + 1,
                                    0,
                                    CoordinateFlags::X | CoordinateFlags::Y | CoordinateFlags::Z,
                                    StrictHardSoftScore::of_hard(-1),
                                ));
                            }
                        }
                    }
                }
            }
        }
        score
    }
}
