//! Tabu search over whole-state fingerprints: forbids returning to a
//! recently-visited state unless the candidate would be a new best
//! (aspiration).

use std::collections::VecDeque;

use nurseroster_core::score::StrictHardSoftScore;

use super::{Acceptor, AcceptanceContext};

#[derive(Debug)]
pub struct TabuStateAcceptor {
    tenure: usize,
    recent: VecDeque<u64>,
}

impl TabuStateAcceptor {
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure: tenure.max(1),
            recent: VecDeque::with_capacity(tenure.max(1)),
        }
    }

    fn is_tabu(&self, hash: u64) -> bool {
        self.recent.contains(&hash)
    }

    fn record(&mut self, hash: u64) {
        if self.recent.len() >= self.tenure {
            self.recent.pop_front();
        }
        self.recent.push_back(hash);
    }
}

impl Default for TabuStateAcceptor {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Acceptor for TabuStateAcceptor {
    fn is_accepted(&mut self, ctx: &AcceptanceContext) -> bool {
        let aspiration = ctx.candidate_score > ctx.output_score;
        if aspiration {
            return true;
        }
        !self.is_tabu(ctx.state_hash) && ctx.candidate_score >= ctx.last_step_score
    }

    fn phase_started(&mut self, _initial_score: StrictHardSoftScore) {
        self.recent.clear();
    }

    fn step_ended(&mut self, ctx: &AcceptanceContext) {
        if ctx.accepted {
            self.record(ctx.state_hash);
        }
    }
}
