//! The two primitive single-bit moves every compound perturbator is built
//! from.

use nurseroster_core::State;
use nurseroster_scoring::Violation;

use super::Perturbator;

/// Sets one bit. Reverts by clearing it back to whatever it was before —
/// which, since a repair perturbator only targets a bit it knows is set
/// wrong, is usually its complement, but `revert` restores the observed
/// prior value regardless.
#[derive(Debug, Default)]
pub struct AssignPerturbator {
    coord: Option<(usize, usize, usize, usize)>,
    prior: bool,
}

impl AssignPerturbator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an already-configured instance targeting `coord`, for tests
    /// and for callers that already know what they want assigned.
    pub fn at(coord: (usize, usize, usize, usize)) -> Self {
        Self {
            coord: Some(coord),
            prior: false,
        }
    }
}

impl Perturbator for AssignPerturbator {
    fn configure(&mut self, violation: Option<&Violation>, _state: &State<'_>) {
        self.coord = violation.map(|v| (v.x, v.y, v.z, v.w));
    }

    fn modify(&mut self, state: &mut State<'_>) {
        let Some((x, y, z, w)) = self.coord else { return };
        self.prior = state.get(x, y, z, w);
        state.set(x, y, z, w);
    }

    fn revert(&mut self, state: &mut State<'_>) {
        let Some((x, y, z, w)) = self.coord else { return };
        state.assign(x, y, z, w, self.prior);
    }

    fn is_identity(&self) -> bool {
        self.coord.is_none()
    }
}

/// Clears one bit. The repair counterpart of `AssignPerturbator`.
#[derive(Debug, Default)]
pub struct UnassignPerturbator {
    coord: Option<(usize, usize, usize, usize)>,
    prior: bool,
}

impl UnassignPerturbator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(coord: (usize, usize, usize, usize)) -> Self {
        Self {
            coord: Some(coord),
            prior: false,
        }
    }
}

impl Perturbator for UnassignPerturbator {
    fn configure(&mut self, violation: Option<&Violation>, _state: &State<'_>) {
        self.coord = violation.map(|v| (v.x, v.y, v.z, v.w));
    }

    fn modify(&mut self, state: &mut State<'_>) {
        let Some((x, y, z, w)) = self.coord else { return };
        self.prior = state.get(x, y, z, w);
        state.clear(x, y, z, w);
    }

    fn revert(&mut self, state: &mut State<'_>) {
        let Some((x, y, z, w)) = self.coord else { return };
        state.assign(x, y, z, w, self.prior);
    }

    fn is_identity(&self) -> bool {
        self.coord.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::fixture_axes;
    use nurseroster_core::Size;

    #[test]
    fn assign_sets_then_reverts() {
        let (shifts, employees, days, skills) = fixture_axes(1, 1, 1, 1);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        let mut p = AssignPerturbator::at((0, 0, 0, 0));
        p.modify(&mut state);
        assert!(state.get(0, 0, 0, 0));
        p.revert(&mut state);
        assert!(!state.get(0, 0, 0, 0));
    }

    #[test]
    fn unassign_clears_then_reverts() {
        let (shifts, employees, days, skills) = fixture_axes(1, 1, 1, 1);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        state.set(0, 0, 0, 0);
        let mut p = UnassignPerturbator::at((0, 0, 0, 0));
        p.modify(&mut state);
        assert!(!state.get(0, 0, 0, 0));
        p.revert(&mut state);
        assert!(state.get(0, 0, 0, 0));
    }

    #[test]
    fn unconfigured_is_identity() {
        let mut p = AssignPerturbator::new();
        assert!(p.is_identity());
        let (shifts, employees, days, skills) = fixture_axes(1, 1, 1, 1);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        p.modify(&mut state);
        assert_eq!(state.count(), 0);
    }
}
