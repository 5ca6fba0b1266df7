//! A move that consults two constraints jointly: a shift-day with spare
//! coverage demand from `ShiftCoverage`, and an employee that isn't already
//! flagged by `EmploymentMaxDuration` for exceeding their workload cap.

use std::collections::HashSet;

use nurseroster_core::State;
use nurseroster_scoring::constraints::UNDERSTAFFED;
use nurseroster_scoring::{ConstraintScore, Violation};
use rand::Rng;

use super::change_log::BitChangeLog;
use super::Perturbator;

#[derive(Debug, Default)]
pub struct RankedIntersectionTogglePerturbator {
    plan: Option<(usize, usize, usize, usize)>,
    extend: bool,
    log: BitChangeLog,
}

impl RankedIntersectionTogglePerturbator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Perturbator for RankedIntersectionTogglePerturbator {
    fn configure(&mut self, _violation: Option<&Violation>, _state: &State<'_>) {}

    fn modify(&mut self, state: &mut State<'_>) {
        let Some((x, y, z, w)) = self.plan else { return };
        let current = state.get(x, y, z, w);
        self.log.set(state, x, y, z, w, !current);
        let size = state.size();
        if self.extend && z + 1 < size.z {
            let next = state.get(x, y, z + 1, w);
            self.log.set(state, x, y, z + 1, w, !next);
        }
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

        let saturated: HashSet<usize> = scores
            .iter()
            .find(|(name, _)| *name == "EmploymentMaxDuration")
            .map(|(_, s)| s.violations().iter().map(|v| v.y).collect())
            .unwrap_or_default();

        let size = state.size();
        let mut rng = rand::rng();
        let cover = understaffed[rng.random_range(0..understaffed.len())];

        let mut y = rng.random_range(0..size.y);
        for _ in 0..size.y {
            if !saturated.contains(&y) {
                break;
            }
            y = (y + 1) % size.y;
        }

        let w = rng.random_range(0..size.w);
        self.extend = rng.random_bool(0.3);
        self.plan = Some((cover.x, y, cover.z, w));
        true
    }
}
