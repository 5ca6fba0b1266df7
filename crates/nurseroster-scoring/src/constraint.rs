//! The `Constraint` trait every rostering rule implements.

use nurseroster_core::State;

use crate::constraint_score::ConstraintScore;

/// A rule that scans a [`State`] and reports how well it's satisfied.
///
/// Evaluation is pure: a constraint never mutates the state it scores, and
/// it cannot fail — only produce a worse score. Each constraint
/// pre-computes whatever dense conflict structure it needs once, at
/// construction time, from the instance's axes; `evaluate` then becomes a
/// scan of the state against that structure.
///
/// Repair is not a method on this trait: a constraint only reports
/// violations, and the heuristic provider (in `nurseroster-solver`) is the
/// one that turns a violation into a corrective move. Keeping constraints
/// move-agnostic avoids a dependency cycle between the scoring and solver
/// crates and matches the read-only, evaluate-only contract above.
pub trait Constraint: Send + Sync {
    /// Stable identifier, used in statistics output and violation reports.
    fn name(&self) -> &str;

    /// True for constraints whose negative score blocks feasibility
    /// (strict or hard); false for soft-only constraints.
    fn is_hard(&self) -> bool;

    fn evaluate(&self, state: &State<'_>) -> ConstraintScore;
}
