//! The move/perturbator layer: stateful, revertible transformers over
//! `State` that the heuristic provider composes into chains.

mod add_cover;
mod change_log;
mod exchange;
mod primitive;
mod ranked_intersection;
mod repair;
mod shift_by_z;
mod toggle;

pub use add_cover::AddCoverShiftsPerturbator;
pub use exchange::{HorizontalExchangePerturbator, VerticalExchangePerturbator};
pub use primitive::{AssignPerturbator, UnassignPerturbator};
pub use ranked_intersection::RankedIntersectionTogglePerturbator;
pub use repair::{UnassignRepairPerturbator, ValidShiftDayRepairPerturbator};
pub use shift_by_z::ShiftByZPerturbator;
pub use toggle::RandomAssignmentTogglePerturbator;

use std::fmt::Debug;

use nurseroster_core::State;
use nurseroster_scoring::{ConstraintScore, Violation};

/// A stateful, revertible transformation over a `State`.
///
/// `configure` prepares the perturbator — for repair perturbators, from a
/// `Violation`; for autonomous perturbators, `violation` is `None` and the
/// perturbator picks its own target, typically via a thread-local RNG.
/// `modify` applies the change and remembers enough to `revert` it
/// bit-exactly. A perturbator is owned by one search thread at a time.
pub trait Perturbator: Debug + Send {
    fn configure(&mut self, violation: Option<&Violation>, state: &State<'_>);
    fn modify(&mut self, state: &mut State<'_>);
    fn revert(&mut self, state: &mut State<'_>);

    /// True iff `modify` would be a no-op — `configure` found nothing
    /// applicable. The heuristic provider skips identity perturbators
    /// rather than wasting a search step on them.
    fn is_identity(&self) -> bool {
        false
    }

    /// Lets an autonomous move inspect the current per-constraint scores and
    /// decide whether it has anything useful to do, configuring itself if
    /// so. Repair perturbators (configured from a single `Violation` via
    /// `configure`) leave this at its default, which always declines.
    fn configure_if_applicable(&mut self, _scores: &[(&str, ConstraintScore)], _state: &State<'_>) -> bool {
        false
    }
}

/// The no-op perturbator: `modify`/`revert` do nothing and `is_identity` is
/// always true. Returned when the heuristic provider finds nothing
/// applicable for a search step.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityPerturbator;

impl Perturbator for IdentityPerturbator {
    fn configure(&mut self, _violation: Option<&Violation>, _state: &State<'_>) {}
    fn modify(&mut self, _state: &mut State<'_>) {}
    fn revert(&mut self, _state: &mut State<'_>) {}

    fn is_identity(&self) -> bool {
        true
    }
}

/// An ordered sequence of perturbators applied together as one search step.
///
/// `modify` runs forward; `revert` undoes in reverse order, the way nested
/// edits unwind off a stack.
#[derive(Debug, Default)]
pub struct PerturbatorChain {
    perturbators: Vec<Box<dyn Perturbator>>,
}

impl PerturbatorChain {
    pub fn new() -> Self {
        Self { perturbators: Vec::new() }
    }

    pub fn push(&mut self, perturbator: Box<dyn Perturbator>) {
        self.perturbators.push(perturbator);
    }

    pub fn is_empty(&self) -> bool {
        self.perturbators.is_empty()
    }

    pub fn len(&self) -> usize {
        self.perturbators.len()
    }

    /// Concatenates `other`'s perturbators onto the end of this chain.
    pub fn append(&mut self, mut other: PerturbatorChain) {
        self.perturbators.append(&mut other.perturbators);
    }

    pub fn modify(&mut self, state: &mut State<'_>) {
        for perturbator in &mut self.perturbators {
            tracing::trace!(perturbator = ?perturbator, "modify");
            perturbator.modify(state);
        }
    }

    pub fn revert(&mut self, state: &mut State<'_>) {
        for perturbator in self.perturbators.iter_mut().rev() {
            tracing::trace!(perturbator = ?perturbator, "revert");
            perturbator.revert(state);
        }
    }
}
