//! Bit-exact undo for perturbators that flip an arbitrary number of bits.

use nurseroster_core::State;

/// Records `(x, y, z, w, prior)` before each write so `revert` can restore
/// every touched bit to its value before `modify` ran, in reverse order.
#[derive(Debug, Default)]
pub struct BitChangeLog {
    entries: Vec<(usize, usize, usize, usize, bool)>,
}

impl BitChangeLog {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Sets `(x, y, z, w)` to `value` in `state`, remembering its prior
    /// value for `revert`.
    pub fn set(&mut self, state: &mut State<'_>, x: usize, y: usize, z: usize, w: usize, value: bool) {
        let prior = state.get(x, y, z, w);
        self.entries.push((x, y, z, w, prior));
        state.assign(x, y, z, w, value);
    }

    /// Restores every logged bit to its prior value, most recent first, and
    /// clears the log.
    pub fn revert(&mut self, state: &mut State<'_>) {
        for &(x, y, z, w, prior) in self.entries.iter().rev() {
            state.assign(x, y, z, w, prior);
        }
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::fixture_axes;
    use nurseroster_core::Size;

    #[test]
    fn revert_restores_prior_values_in_reverse_order() {
        let (shifts, employees, days, skills) = fixture_axes(1, 1, 2, 1);
        let size = Size::new(1, 1, 2, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        state.set(0, 0, 1, 0);

        let mut log = BitChangeLog::new();
        log.set(&mut state, 0, 0, 0, 0, true);
        log.set(&mut state, 0, 0, 1, 0, false);
        assert!(state.get(0, 0, 0, 0));
        assert!(!state.get(0, 0, 1, 0));

        log.revert(&mut state);
        assert!(!state.get(0, 0, 0, 0));
        assert!(state.get(0, 0, 1, 0));
        assert!(log.is_empty());
    }
}
