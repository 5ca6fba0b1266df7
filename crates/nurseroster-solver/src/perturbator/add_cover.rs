//! Targeted assignment move for understaffed shift-days: picks an employee
//! with the right skill and no existing assignment that day, and assigns
//! them to the violation's shift.

use nurseroster_core::State;
use nurseroster_scoring::constraints::UNDERSTAFFED;
use nurseroster_scoring::{ConstraintScore, Violation};
use rand::Rng;

use super::change_log::BitChangeLog;
use super::Perturbator;

#[derive(Debug, Default)]
pub struct AddCoverShiftsPerturbator {
    plan: Option<(usize, usize, usize, usize)>,
    log: BitChangeLog,
}

impl AddCoverShiftsPerturbator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Perturbator for AddCoverShiftsPerturbator {
    fn configure(&mut self, violation: Option<&Violation>, state: &State<'_>) {
        let Some(violation) = violation else {
            self.plan = None;
            return;
        };
        let (x, z) = (violation.x, violation.z);
        let size = state.size();
        let shift = &state.shifts()[x];

        let mut rng = rand::rng();
        let mut candidates: Vec<usize> = (0..size.y).filter(|&y| !state.get_xyz_any(x, y, z)).collect();
        if candidates.is_empty() {
            self.plan = None;
            return;
        }
        let y = candidates.swap_remove(rng.random_range(0..candidates.len()));

        let w = if !shift.required_all_skills.is_empty() {
            *shift.required_all_skills.keys().next().unwrap()
        } else if !shift.required_one_skills.is_empty() {
            *shift.required_one_skills.keys().next().unwrap()
        } else {
            rng.random_range(0..size.w)
        };

        self.plan = Some((x, y, z, w));
    }

    fn modify(&mut self, state: &mut State<'_>) {
        let Some((x, y, z, w)) = self.plan else { return };
        self.log.set(state, x, y, z, w, true);
    }

    fn revert(&mut self, state: &mut State<'_>) {
        self.log.revert(state);
    }

    fn is_identity(&self) -> bool {
        self.plan.is_none()
    }

    fn configure_if_applicable(&mut self, scores: &[(&str, ConstraintScore)], state: &State<'_>) -> bool {
        let understaffed: Vec<&Violation> = scores
            .iter()
            .find(|(name, _)| *name == "ShiftCoverage")
            .map(|(_, s)| s.violations().iter().filter(|v| v.info == UNDERSTAFFED).collect())
            .unwrap_or_default();
        if understaffed.is_empty() {
            self.plan = None;
            return false;
        }
        let violation = understaffed[rand::rng().random_range(0..understaffed.len())];
        self.configure(Some(violation), state);
        !self.is_identity()
    }
}
