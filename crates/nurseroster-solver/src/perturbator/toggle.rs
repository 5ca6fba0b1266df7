//! Unprompted random single-bit moves, the diversification workhorse of the
//! autonomous move pool.

use nurseroster_core::State;
use nurseroster_scoring::{ConstraintScore, Violation};
use rand::Rng;

use super::change_log::BitChangeLog;
use super::Perturbator;

/// Flips a uniformly random bit, optionally also flipping the bit one day
/// later for the same (shift, employee, skill) — a cheap way to occasionally
/// propose a two-day block rather than a single isolated day.
#[derive(Debug)]
pub struct RandomAssignmentTogglePerturbator {
    window: bool,
    plan: Option<(usize, usize, usize, usize)>,
    extend: bool,
    log: BitChangeLog,
}

impl RandomAssignmentTogglePerturbator {
    /// `window` enables the occasional two-day extension.
    pub fn new(window: bool) -> Self {
        Self {
            window,
            plan: None,
            extend: false,
            log: BitChangeLog::new(),
        }
    }
}

impl Perturbator for RandomAssignmentTogglePerturbator {
    fn configure(&mut self, _violation: Option<&Violation>, state: &State<'_>) {
        let size = state.size();
        let mut rng = rand::rng();
        let x = rng.random_range(0..size.x);
        let y = rng.random_range(0..size.y);
        let z = rng.random_range(0..size.z);
        let w = rng.random_range(0..size.w);
        self.extend = self.window && rng.random_bool(0.2);
        self.plan = Some((x, y, z, w));
    }

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

    fn configure_if_applicable(&mut self, _scores: &[(&str, ConstraintScore)], state: &State<'_>) -> bool {
        self.configure(None, state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::fixture_axes;
    use nurseroster_core::Size;

    #[test]
    fn toggle_round_trips() {
        let (shifts, employees, days, skills) = fixture_axes(2, 2, 2, 2);
        let size = Size::new(2, 2, 2, 2).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        let mut p = RandomAssignmentTogglePerturbator::new(false);
        p.configure(None, &state);
        assert!(!p.is_identity());
        let snapshot = state.clone();
        p.modify(&mut state);
        assert_eq!(state.count(), 1);
        p.revert(&mut state);
        assert_eq!(state.count(), snapshot.count());
    }
}
