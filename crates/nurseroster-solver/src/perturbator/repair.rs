//! Repair perturbators: configured directly from a `Violation`'s geometry,
//! clearing whatever range of bits that violation's `CoordinateFlags` says
//! is in play.

use nurseroster_core::State;
use nurseroster_scoring::{CoordinateFlags, Violation};

use super::change_log::BitChangeLog;
use super::Perturbator;

/// Returns `lo..hi` for one axis: `fixed..fixed+1` if the violation pinned
/// that coordinate, `0..bound` if it left the axis free.
fn axis_range(flags: CoordinateFlags, flag: CoordinateFlags, fixed: usize, bound: usize) -> std::ops::Range<usize> {
    if flags.contains(flag) {
        fixed..(fixed + 1)
    } else {
        0..bound
    }
}

/// Clears every bit inside a violation's geometry — the axes it pinned stay
/// fixed, the axes it left free range over their whole extent. Used for
/// violations whose fix is simply "there should be nothing assigned here".
#[derive(Debug, Default)]
pub struct UnassignRepairPerturbator {
    target: Option<(usize, usize, usize, usize, CoordinateFlags)>,
    log: BitChangeLog,
}

impl UnassignRepairPerturbator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Perturbator for UnassignRepairPerturbator {
    fn configure(&mut self, violation: Option<&Violation>, _state: &State<'_>) {
        self.target = violation.map(|v| (v.x, v.y, v.z, v.w, v.flags));
    }

    fn modify(&mut self, state: &mut State<'_>) {
        let Some((x, y, z, w, flags)) = self.target else { return };
        let size = state.size();
        for x in axis_range(flags, CoordinateFlags::X, x, size.x) {
            for y in axis_range(flags, CoordinateFlags::Y, y, size.y) {
                for z in axis_range(flags, CoordinateFlags::Z, z, size.z) {
                    for w in axis_range(flags, CoordinateFlags::W, w, size.w) {
                        if state.get(x, y, z, w) {
                            self.log.set(state, x, y, z, w, false);
                        }
                    }
                }
            }
        }
    }

    fn revert(&mut self, state: &mut State<'_>) {
        self.log.revert(state);
    }

    fn is_identity(&self) -> bool {
        self.target.is_none()
    }
}

/// Clears the whole (x, z) slab across every employee and skill — the
/// repair for a shift assigned on a day it can never legally run.
#[derive(Debug, Default)]
pub struct ValidShiftDayRepairPerturbator {
    target: Option<(usize, usize)>,
    log: BitChangeLog,
}

impl ValidShiftDayRepairPerturbator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Perturbator for ValidShiftDayRepairPerturbator {
    fn configure(&mut self, violation: Option<&Violation>, _state: &State<'_>) {
        self.target = violation.map(|v| (v.x, v.z));
    }

    fn modify(&mut self, state: &mut State<'_>) {
        let Some((x, z)) = self.target else { return };
        let size = state.size();
        for y in 0..size.y {
            for w in 0..size.w {
                if state.get(x, y, z, w) {
                    self.log.set(state, x, y, z, w, false);
                }
            }
        }
    }

    fn revert(&mut self, state: &mut State<'_>) {
        self.log.revert(state);
    }

    fn is_identity(&self) -> bool {
        self.target.is_none()
    }
}
