//! Constraint engine: the `Constraint` trait, violation/score accumulation
//! types, and the nine concrete rostering constraints.

pub mod constraint;
pub mod constraint_score;
pub mod constraints;
pub mod violation;

pub use constraint::Constraint;
pub use constraint_score::ConstraintScore;
pub use violation::{CoordinateFlags, Violation};

use nurseroster_core::score::{Score, StrictHardSoftScore};
use nurseroster_core::State;

/// Evaluates every constraint and sums their scores into one total.
pub fn evaluate_all(constraints: &[Box<dyn Constraint>], state: &State<'_>) -> StrictHardSoftScore {
    constraints
        .iter()
        .map(|c| c.evaluate(state).score())
        .fold(StrictHardSoftScore::zero(), |acc, s| acc + s)
}

/// Evaluates every constraint, returning each constraint's name alongside
/// its full `ConstraintScore` (score plus violations) — used by statistics
/// reporting and by the heuristic provider to source repair candidates.
pub fn evaluate_all_detailed<'a>(constraints: &'a [Box<dyn Constraint>], state: &State<'_>) -> Vec<(&'a str, ConstraintScore)> {
    constraints.iter().map(|c| (c.name(), c.evaluate(state))).collect()
}
