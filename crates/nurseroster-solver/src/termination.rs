//! Shared idle-iteration termination logic, reused by every search task
//! family regardless of its acceptance rule.
//!
//! Outside feasibility the gate is a flat idle-step budget. Once the output
//! becomes feasible the budget tightens, and tightens again if the output
//! reaches a perfect (all-levels-non-negative) score.

use nurseroster_core::score::{Score, StrictHardSoftScore};

/// Tracks idle iterations against a three-tier budget.
#[derive(Debug, Clone)]
pub struct Termination {
    max_idle_iterations: usize,
    max_feasible_idle_iterations: usize,
    iter_at_feasible_threshold: usize,
    idle_iterations: usize,
    iterations: usize,
    feasible_since: Option<usize>,
}

impl Termination {
    pub fn new(max_idle_iterations: usize, max_feasible_idle_iterations: usize, iter_at_feasible_threshold: usize) -> Self {
        Self {
            max_idle_iterations,
            max_feasible_idle_iterations,
            iter_at_feasible_threshold,
            idle_iterations: 0,
            iterations: 0,
            feasible_since: None,
        }
    }

    pub fn reset(&mut self) {
        self.idle_iterations = 0;
        self.iterations = 0;
        self.feasible_since = None;
    }

    /// Records the outcome of one search step: whether it strictly improved
    /// the *current* (not necessarily output) score.
    pub fn record_step(&mut self, improved: bool) {
        self.iterations += 1;
        if improved {
            self.idle_iterations = 0;
        } else {
            self.idle_iterations += 1;
        }
    }

    /// True once the idle budget implied by `output_score`'s feasibility has
    /// been exhausted.
    pub fn is_terminated(&mut self, output_score: StrictHardSoftScore) -> bool {
        if output_score.is_feasible() {
            let since = *self.feasible_since.get_or_insert(self.iterations);
            let steps_since_feasible = self.iterations.saturating_sub(since);
            if steps_since_feasible >= self.iter_at_feasible_threshold {
                let cap = if output_score.is_zero_or_better() {
                    (self.max_feasible_idle_iterations / 2).max(1)
                } else {
                    self.max_feasible_idle_iterations
                };
                return self.idle_iterations >= cap;
            }
        } else {
            self.feasible_since = None;
        }
        self.idle_iterations >= self.max_idle_iterations
    }
}

impl Default for Termination {
    fn default() -> Self {
        Self::new(1_000, 200, 50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_after_flat_idle_budget_when_infeasible() {
        let mut term = Termination::new(3, 200, 50);
        let infeasible = StrictHardSoftScore::of(0, -1, 0);
        for _ in 0..2 {
            term.record_step(false);
            assert!(!term.is_terminated(infeasible));
        }
        term.record_step(false);
        assert!(term.is_terminated(infeasible));
    }

    #[test]
    fn improvement_resets_idle_counter() {
        let mut term = Termination::new(3, 200, 50);
        let infeasible = StrictHardSoftScore::of(0, -1, 0);
        term.record_step(false);
        term.record_step(false);
        term.record_step(true);
        assert!(!term.is_terminated(infeasible));
    }

    #[test]
    fn tightens_once_feasible_and_past_the_threshold() {
        let mut term = Termination::new(1_000, 5, 2);
        let feasible = StrictHardSoftScore::of(0, 0, -10);
        // First two idle steps after reaching feasibility are within the
        // threshold window, so the wide cap (1000) still applies.
        term.record_step(false);
        assert!(!term.is_terminated(feasible));
        term.record_step(false);
        assert!(!term.is_terminated(feasible));
        // The third idle step crosses `iter_at_feasible_threshold`, so the
        // tighter `max_feasible_idle_iterations` cap (5) now governs; idle
        // count is 3, one below the cap.
        term.record_step(false);
        assert!(!term.is_terminated(feasible));
        term.record_step(false);
        assert!(!term.is_terminated(feasible));
        term.record_step(false);
        assert!(term.is_terminated(feasible));
    }

    #[test]
    fn halves_the_feasible_cap_once_output_is_zero_or_better() {
        let mut term = Termination::new(1_000, 10, 0);
        let perfect = StrictHardSoftScore::ZERO;
        for _ in 0..4 {
            term.record_step(false);
            assert!(!term.is_terminated(perfect));
        }
        term.record_step(false);
        assert!(term.is_terminated(perfect));
    }

    #[test]
    fn falling_back_to_infeasible_resets_the_feasible_clock() {
        let mut term = Termination::new(1_000, 5, 2);
        let feasible = StrictHardSoftScore::of(0, 0, -10);
        let infeasible = StrictHardSoftScore::of(0, -1, 0);
        term.record_step(false);
        term.record_step(false);
        assert!(!term.is_terminated(infeasible));
        // Re-entering feasibility restarts the threshold window.
        term.record_step(false);
        assert!(!term.is_terminated(feasible));
    }
}
