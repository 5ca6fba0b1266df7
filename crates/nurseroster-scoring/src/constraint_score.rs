//! Accumulated score plus the violations that produced it.

use nurseroster_core::score::{Score, StrictHardSoftScore};

use crate::violation::Violation;

/// Running total for one constraint's evaluation pass: an aggregated score
/// and the list of violations that were summed into it.
#[derive(Debug, Clone, Default)]
pub struct ConstraintScore {
    score: StrictHardSoftScore,
    violations: Vec<Violation>,
}

impl ConstraintScore {
    pub fn new() -> Self {
        Self {
            score: StrictHardSoftScore::zero(),
            violations: Vec::new(),
        }
    }

    pub fn score(&self) -> StrictHardSoftScore {
        self.score
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Appends `violation` and folds its delta into the running score.
    pub fn violate(&mut self, violation: Violation) {
        self.score = self.score + violation.delta;
        self.violations.push(violation);
    }

    /// Folds `delta` into the running score without recording a violation.
    pub fn add_score(&mut self, delta: StrictHardSoftScore) {
        self.score = self.score + delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::CoordinateFlags;

    #[test]
    fn violate_accumulates_score_and_record() {
        let mut cs = ConstraintScore::new();
        cs.violate(Violation::new(
            0,
            0,
            0,
            0,
            CoordinateFlags::X,
            StrictHardSoftScore::of(0, -1, 0),
        ));
        cs.violate(Violation::new(
            1,
            0,
            0,
            0,
            CoordinateFlags::X,
            StrictHardSoftScore::of(0, -1, 0),
        ));
        assert_eq!(cs.score(), StrictHardSoftScore::of(0, -2, 0));
        assert_eq!(cs.violations().len(), 2);
    }

    #[test]
    fn add_score_does_not_record_violation() {
        let mut cs = ConstraintScore::new();
        cs.add_score(StrictHardSoftScore::of(0, 0, -5));
        assert_eq!(cs.score(), StrictHardSoftScore::of(0, 0, -5));
        assert!(cs.violations().is_empty());
    }
}
