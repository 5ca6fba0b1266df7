//! Diversified late acceptance search: tracks the minimum of the whole
//! history (`phi_min`) and how many slots currently hold it (`N`), which
//! lets acceptance loosen automatically on plateaus.

use nurseroster_core::score::StrictHardSoftScore;

use super::{Acceptor, AcceptanceContext};

#[derive(Debug)]
pub struct DiversifiedLateAcceptanceAcceptor {
    history: Vec<StrictHardSoftScore>,
    index: usize,
    iterations: usize,
    phi_min: StrictHardSoftScore,
    count_at_min: usize,
    previous_current: StrictHardSoftScore,
}

impl DiversifiedLateAcceptanceAcceptor {
    pub fn new(size: usize) -> Self {
        let size = size.clamp(1, 256);
        Self {
            history: vec![StrictHardSoftScore::ZERO; size],
            index: 0,
            iterations: 0,
            phi_min: StrictHardSoftScore::ZERO,
            count_at_min: size,
            previous_current: StrictHardSoftScore::ZERO,
        }
    }

    fn recompute_min(&mut self) {
        self.phi_min = *self.history.iter().min().expect("history is never empty");
        self.count_at_min = self.history.iter().filter(|&&s| s == self.phi_min).count();
    }
}

impl Default for DiversifiedLateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(25)
    }
}

impl Acceptor for DiversifiedLateAcceptanceAcceptor {
    fn is_accepted(&mut self, ctx: &AcceptanceContext) -> bool {
        self.index = self.iterations % self.history.len();
        ctx.candidate_score == ctx.last_step_score || ctx.candidate_score > self.phi_min
    }

    fn phase_started(&mut self, initial_score: StrictHardSoftScore) {
        for slot in &mut self.history {
            *slot = initial_score;
        }
        self.index = 0;
        self.iterations = 0;
        self.phi_min = initial_score;
        self.count_at_min = self.history.len();
        self.previous_current = initial_score;
    }

    fn step_ended(&mut self, ctx: &AcceptanceContext) {
        let v = self.index;
        let overwritten = self.history[v];
        if ctx.candidate_score < overwritten {
            self.history[v] = ctx.candidate_score;
        } else if ctx.candidate_score > overwritten && ctx.candidate_score > self.previous_current {
            self.history[v] = ctx.candidate_score;
        }

        if self.history[v] != overwritten {
            if overwritten == self.phi_min {
                self.count_at_min -= 1;
            }
            if self.history[v] < self.phi_min {
                self.phi_min = self.history[v];
                self.count_at_min = 1;
            } else if self.history[v] == self.phi_min {
                self.count_at_min += 1;
            }
            if self.count_at_min == 0 {
                self.recompute_min();
            }
        }

        if ctx.accepted {
            self.previous_current = ctx.candidate_score;
        }
        self.iterations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(last: i64, candidate: i64) -> AcceptanceContext {
        AcceptanceContext {
            last_step_score: StrictHardSoftScore::of_soft(last),
            candidate_score: StrictHardSoftScore::of_soft(candidate),
            output_score: StrictHardSoftScore::of_soft(last),
            state_hash: 0,
            move_hash: 0,
            accepted: true,
        }
    }

    #[test]
    fn accepts_equal_to_current() {
        let mut acceptor = DiversifiedLateAcceptanceAcceptor::new(3);
        acceptor.phase_started(StrictHardSoftScore::of_soft(-100));
        assert!(acceptor.is_accepted(&ctx(-100, -100)));
    }

    #[test]
    fn accepts_above_phi_min() {
        let mut acceptor = DiversifiedLateAcceptanceAcceptor::new(3);
        acceptor.phase_started(StrictHardSoftScore::of_soft(-100));
        assert!(acceptor.is_accepted(&ctx(-50, -90)));
    }

    #[test]
    fn rejects_at_or_below_phi_min_and_not_equal_current() {
        let mut acceptor = DiversifiedLateAcceptanceAcceptor::new(3);
        acceptor.phase_started(StrictHardSoftScore::of_soft(-100));
        assert!(!acceptor.is_accepted(&ctx(-50, -150)));
    }

    #[test]
    fn phi_min_tracks_history_minimum_after_updates() {
        let mut acceptor = DiversifiedLateAcceptanceAcceptor::new(2);
        acceptor.phase_started(StrictHardSoftScore::of_soft(-100));
        // Both slots start at -100, count_at_min = 2.
        acceptor.step_ended(&ctx(-100, -40));
        assert_eq!(acceptor.phi_min, StrictHardSoftScore::of_soft(-100));
        assert_eq!(acceptor.count_at_min, 1);

        acceptor.step_ended(&ctx(-40, -40));
        // Second slot now also -40 (improves on previous_current -40? equal, not >)
        // previous_current after first step_ended is -40; candidate -40 is not > -40, so no overwrite.
        assert_eq!(acceptor.phi_min, StrictHardSoftScore::of_soft(-100));
    }

    #[test]
    fn rejected_candidates_do_not_move_previous_current() {
        let mut acceptor = DiversifiedLateAcceptanceAcceptor::new(3);
        acceptor.phase_started(StrictHardSoftScore::of_soft(-100));

        let mut rejected = ctx(-100, -40);
        rejected.accepted = false;
        acceptor.step_ended(&rejected);
        assert_eq!(acceptor.previous_current, StrictHardSoftScore::of_soft(-100));

        let mut accepted = ctx(-100, -30);
        accepted.accepted = true;
        acceptor.step_ended(&accepted);
        assert_eq!(acceptor.previous_current, StrictHardSoftScore::of_soft(-30));
    }
}
