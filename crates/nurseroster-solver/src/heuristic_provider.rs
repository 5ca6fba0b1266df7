//! Turns a constraint evaluation into a [`PerturbatorChain`]: the bridge
//! between "here's what's wrong with the state" and "here's what to try
//! next", reused by every search task family.

use nurseroster_core::State;
use nurseroster_scoring::constraints::{OVERSTAFFED, UNDERSTAFFED};
use nurseroster_scoring::{evaluate_all_detailed, Constraint, Violation};

use crate::perturbator::{
    AddCoverShiftsPerturbator, HorizontalExchangePerturbator, Perturbator, PerturbatorChain,
    RandomAssignmentTogglePerturbator, RankedIntersectionTogglePerturbator, ShiftByZPerturbator,
    UnassignRepairPerturbator, ValidShiftDayRepairPerturbator, VerticalExchangePerturbator,
};

/// A factory for one autonomous move kind, invoked fresh for every attempt
/// so the pool never has to implement `Clone` for trait objects.
type AutonomousFactory = Box<dyn Fn() -> Box<dyn Perturbator> + Send>;

/// Holds the pool of autonomous search moves and knows which repair moves
/// each constraint maps to. Stateless apart from the round-robin cursor
/// into the autonomous pool, so its output is deterministic given the RNG
/// seed driving the perturbators themselves.
pub struct HeuristicProvider {
    autonomous: Vec<AutonomousFactory>,
    cursor: usize,
}

impl std::fmt::Debug for HeuristicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicProvider")
            .field("autonomous_pool_size", &self.autonomous.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl HeuristicProvider {
    /// The default autonomous pool: every move kind that can propose a
    /// target without being handed a `Violation`.
    pub fn new() -> Self {
        let autonomous: Vec<AutonomousFactory> = vec![
            Box::new(|| Box::new(RandomAssignmentTogglePerturbator::new(true)) as Box<dyn Perturbator>),
            Box::new(|| Box::new(HorizontalExchangePerturbator::new()) as Box<dyn Perturbator>),
            Box::new(|| Box::new(VerticalExchangePerturbator::new()) as Box<dyn Perturbator>),
            Box::new(|| Box::new(ShiftByZPerturbator::new()) as Box<dyn Perturbator>),
            Box::new(|| Box::new(RankedIntersectionTogglePerturbator::new()) as Box<dyn Perturbator>),
            Box::new(|| Box::new(AddCoverShiftsPerturbator::new()) as Box<dyn Perturbator>),
        ];
        Self { autonomous, cursor: 0 }
    }

    /// Builds one or more configured repair perturbators for a single
    /// violation, selecting templates by the constraint that raised it.
    /// Returns an empty vec if the constraint has no applicable repair for
    /// this particular violation (e.g. an already-overstaffed shift has
    /// nothing for `AddCoverShiftsPerturbator` to do).
    fn repair_candidates(name: &str, violation: &Violation, state: &State<'_>) -> Vec<Box<dyn Perturbator>> {
        let mut candidates: Vec<Box<dyn Perturbator>> = Vec::new();
        match name {
            "ShiftCoverage" => {
                if violation.info == UNDERSTAFFED {
                    let mut p = AddCoverShiftsPerturbator::new();
                    p.configure(Some(violation), state);
                    if !p.is_identity() {
                        candidates.push(Box::new(p));
                    }
                } else if violation.info == OVERSTAFFED {
                    let mut p = UnassignRepairPerturbator::new();
                    p.configure(Some(violation), state);
                    if !p.is_identity() {
                        candidates.push(Box::new(p));
                    }
                }
            }
            "ValidShiftDay" => {
                let mut p = ValidShiftDayRepairPerturbator::new();
                p.configure(Some(violation), state);
                if !p.is_identity() {
                    candidates.push(Box::new(p));
                }
            }
            // EmployeeAvailability, NoOverlap, RequiredSkill, RestBetweenShifts,
            // EmploymentMaxDuration, CumulativeFatigue, EmployeeGeneral: every
            // one of these is "this assignment shouldn't exist" — the same
            // geometry-driven unassign repair applies to all of them.
            _ => {
                let mut p = UnassignRepairPerturbator::new();
                p.configure(Some(violation), state);
                if !p.is_identity() {
                    candidates.push(Box::new(p));
                }
            }
        }
        candidates
    }

    /// Tries the autonomous pool in round-robin order starting from the
    /// cursor, returning the first perturbator willing to configure itself
    /// against the current scores. Advances the cursor regardless of
    /// outcome so repeated empty violations don't starve later entries.
    fn next_autonomous_move(&mut self, scores: &[(&str, nurseroster_scoring::ConstraintScore)], state: &State<'_>) -> Option<Box<dyn Perturbator>> {
        if self.autonomous.is_empty() {
            return None;
        }
        let start = self.cursor;
        let len = self.autonomous.len();
        let mut found = None;
        for offset in 0..len {
            let index = (start + offset) % len;
            let mut candidate = (self.autonomous[index])();
            if candidate.configure_if_applicable(scores, state) {
                found = Some(candidate);
                self.cursor = (index + 1) % len;
                break;
            }
        }
        if found.is_none() {
            self.cursor = (start + 1) % len;
        }
        found
    }

    /// Step 1: for every constraint with at least one violation, build a
    /// repair perturbator per violation and append it to the chain. Step 2:
    /// if nothing was applicable, fall back to one round-robin autonomous
    /// move. Step 3 (`configure_if_applicable`) is folded into that
    /// fallback via `next_autonomous_move`.
    pub fn generate_search_perturbators(&mut self, constraints: &[Box<dyn Constraint>], state: &State<'_>) -> PerturbatorChain {
        let detailed = evaluate_all_detailed(constraints, state);
        let mut chain = PerturbatorChain::new();

        for (name, score) in &detailed {
            for violation in score.violations() {
                for repair in Self::repair_candidates(name, violation, state) {
                    chain.push(repair);
                }
            }
        }

        if chain.is_empty() {
            if let Some(autonomous) = self.next_autonomous_move(&detailed, state) {
                chain.push(autonomous);
            }
        }

        chain
    }
}

impl Default for HeuristicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::fixture_axes;
    use nurseroster_core::score::StrictHardSoftScore;
    use nurseroster_core::Size;
    use nurseroster_scoring::constraints::ShiftCoverageConstraint;
    use nurseroster_scoring::CoordinateFlags;

    struct AlwaysHardViolation;

    impl Constraint for AlwaysHardViolation {
        fn name(&self) -> &str {
            "NoOverlap"
        }

        fn is_hard(&self) -> bool {
            true
        }

        fn evaluate(&self, _state: &State<'_>) -> nurseroster_scoring::ConstraintScore {
            let mut cs = nurseroster_scoring::ConstraintScore::new();
            cs.violate(Violation::new(
                0,
                0,
                0,
                0,
                CoordinateFlags::X | CoordinateFlags::Y | CoordinateFlags::Z | CoordinateFlags::W,
                StrictHardSoftScore::of_hard(-1),
            ));
            cs
        }
    }

    #[test]
    fn violated_constraint_yields_an_unassign_repair() {
        let (shifts, employees, days, skills) = fixture_axes(1, 1, 1, 1);
        let size = Size::new(1, 1, 1, 1).unwrap();
        let mut state = State::new(size, &shifts, &employees, &days, &skills);
        state.set(0, 0, 0, 0);

        let constraints: Vec<Box<dyn Constraint>> = vec![Box::new(AlwaysHardViolation)];
        let mut provider = HeuristicProvider::new();
        let mut chain = provider.generate_search_perturbators(&constraints, &state);
        assert_eq!(chain.len(), 1);
        chain.modify(&mut state);
        assert!(!state.get(0, 0, 0, 0));
    }

    #[test]
    fn no_violations_falls_back_to_an_autonomous_move() {
        let (shifts, employees, days, skills) = fixture_axes(2, 2, 2, 2);
        let size = Size::new(2, 2, 2, 2).unwrap();
        let state = State::new(size, &shifts, &employees, &days, &skills);

        let constraints: Vec<Box<dyn Constraint>> = Vec::new();
        let mut provider = HeuristicProvider::new();
        let chain = provider.generate_search_perturbators(&constraints, &state);
        // Some autonomous move is always applicable over a state this large.
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn round_robin_cursor_advances_across_calls() {
        let (shifts, employees, days, skills) = fixture_axes(2, 2, 2, 2);
        let size = Size::new(2, 2, 2, 2).unwrap();
        let state = State::new(size, &shifts, &employees, &days, &skills);
        let constraints: Vec<Box<dyn Constraint>> = Vec::new();

        let mut provider = HeuristicProvider::new();
        let cursor_before = provider.cursor;
        provider.generate_search_perturbators(&constraints, &state);
        assert_ne!(provider.cursor, cursor_before);
    }

    #[test]
    fn shift_coverage_understaffed_adds_an_employee() {
        let (shifts, employees, days, skills) = fixture_axes(1, 2, 1, 1);
        let size = Size::new(1, 2, 1, 1).unwrap();
        let state = State::new(size, &shifts, &employees, &days, &skills);
        let constraint = ShiftCoverageConstraint::new(shifts.as_slice(), days.as_slice());
        let constraints: Vec<Box<dyn Constraint>> = vec![Box::new(constraint)];

        let mut provider = HeuristicProvider::new();
        let chain = provider.generate_search_perturbators(&constraints, &state);
        assert!(chain.len() >= 1);
    }
}
