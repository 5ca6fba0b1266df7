//! Like `NoOverlap`, but the shift intervals are padded by each shift's
//! required rest-before/rest-after minutes, and cross-day checks extend to
//! every day-offset the padding could reach.

use nurseroster_core::bits::{BitSquareMatrix, BitSymmetricalMatrix};
use nurseroster_core::domain::Shift;
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;

use crate::constraint::Constraint;
use crate::constraint_score::ConstraintScore;
use crate::violation::{CoordinateFlags, Violation};

use super::shift_geometry::{cross_day_overlap_padded, max_pad_offset_days, same_day_overlap_padded};

#[derive(Debug)]
pub struct RestBetweenShiftsConstraint {
    same_day: BitSymmetricalMatrix,
    /// `cross_day[offset - 1]` is the directed conflict matrix for shifts
    /// `offset` days apart.
    cross_day: Vec<BitSquareMatrix>,
}

impl RestBetweenShiftsConstraint {
    pub fn new(shifts: &[Shift]) -> Self {
        let n = shifts.len();
        let mut same_day = BitSymmetricalMatrix::new(n);
        for x1 in 0..n {
            for x2 in x1..n {
                if x1 != x2 && same_day_overlap_padded(&shifts[x1], &shifts[x2]) {
                    same_day.set(x1, x2);
                }
            }
        }
        let max_offset = max_pad_offset_days(shifts);
        let mut cross_day = Vec::with_capacity(max_offset);
        for offset in 1..=max_offset {
            let mut matrix = BitSquareMatrix::new(n);
            for x1 in 0..n {
                for x2 in 0..n {
                    if cross_day_overlap_padded(&shifts[x1], &shifts[x2], offset as i64) {
                        matrix.set(x1, x2);
                    }
                }
            }
            cross_day.push(matrix);
        }
        Self { same_day, cross_day }
    }
}

impl Constraint for RestBetweenShiftsConstraint {
    fn name(&self) -> &str {
        "RestBetweenShifts"
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
                    for (offset_idx, matrix) in self.cross_day.iter().enumerate() {
                        let offset = offset_idx + 1;
                        if z + offset >= size.z {
                            break;
                        }
                        for x2 in 0..size.x {
                            if matrix.get(x1, x2) && state.get_xyz_any(x2, y, z + offset) {
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
                                    z + offset,
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
