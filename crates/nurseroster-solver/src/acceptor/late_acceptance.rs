//! Late acceptance hill climbing: accept if the candidate beats a score
//! from L steps ago, or is at least as good as the current one.

use nurseroster_core::score::StrictHardSoftScore;

use super::{Acceptor, AcceptanceContext};

/// `L` defaults to 25 and is clamped into `[1, 256]` — matching the
/// documented LAHC history-size bounds.
const MIN_HISTORY: usize = 1;
const MAX_HISTORY: usize = 256;
const DEFAULT_HISTORY: usize = 25;

#[derive(Debug)]
pub struct LateAcceptanceAcceptor {
    history: Vec<StrictHardSoftScore>,
    index: usize,
    iterations: usize,
}

impl LateAcceptanceAcceptor {
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_HISTORY, MAX_HISTORY);
        Self {
            history: vec![StrictHardSoftScore::ZERO; size],
            index: 0,
            iterations: 0,
        }
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(&mut self, ctx: &AcceptanceContext) -> bool {
        let v = self.iterations % self.history.len();
        self.index = v;
        ctx.candidate_score > self.history[v] || ctx.candidate_score >= ctx.last_step_score
    }

    fn phase_started(&mut self, initial_score: StrictHardSoftScore) {
        for slot in &mut self.history {
            *slot = initial_score;
        }
        self.index = 0;
        self.iterations = 0;
    }

    fn step_ended(&mut self, ctx: &AcceptanceContext) {
        if ctx.candidate_score > self.history[self.index] {
            self.history[self.index] = ctx.candidate_score;
        }
        self.iterations += 1;
    }
}
