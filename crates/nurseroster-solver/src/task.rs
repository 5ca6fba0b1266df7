//! The local-search task: the loop that ties the heuristic provider, an
//! acceptor, and shared termination logic into the single-step skeleton
//! every search-task family (LAHC, DLAS, SA, Tabu-state, Tabu-move) runs.
//!
//! The five families differ only in their [`Acceptor`](crate::acceptor::Acceptor)
//! implementation, so rather than five near-identical task structs this
//! crate has one task generic over `Box<dyn Acceptor>`.

use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;
use nurseroster_scoring::{evaluate_all, Constraint};

use crate::acceptor::{Acceptor, AcceptanceContext};
use crate::heuristic_provider::HeuristicProvider;
use crate::statistics::ScoreStatistics;
use crate::termination::Termination;

/// Common contract every search-task family exposes to its caller.
pub trait LocalSearchTask<'a> {
    /// Re-seeds the task with a starting state, resetting all bookkeeping.
    fn reset(&mut self, input_state: State<'a>);

    /// Runs one acceptance iteration.
    fn step(&mut self, heuristic_provider: &mut HeuristicProvider);

    /// Termination gate: false once the task is done.
    fn should_step(&mut self) -> bool;

    /// Set by the most recently run `step`.
    fn new_best_found(&self) -> bool;

    fn get_output_state(&self) -> &State<'a>;
    fn get_output_score(&self) -> StrictHardSoftScore;
    fn get_initial_score(&self) -> StrictHardSoftScore;
}

/// A local-search task parameterized by its acceptance rule.
pub struct AcceptanceLocalSearchTask<'a> {
    constraints: &'a [Box<dyn Constraint>],
    acceptor: Box<dyn Acceptor>,
    termination: Termination,
    statistics: ScoreStatistics,

    current: State<'a>,
    current_score: StrictHardSoftScore,
    output: State<'a>,
    output_score: StrictHardSoftScore,
    initial_score: StrictHardSoftScore,

    new_best_found: bool,
    iterations: usize,
}

impl<'a> AcceptanceLocalSearchTask<'a> {
    pub fn new(constraints: &'a [Box<dyn Constraint>], acceptor: Box<dyn Acceptor>, termination: Termination, input_state: State<'a>) -> Self {
        let mut task = Self {
            constraints,
            acceptor,
            termination,
            statistics: ScoreStatistics::new(),
            current_score: StrictHardSoftScore::ZERO,
            output_score: StrictHardSoftScore::ZERO,
            initial_score: StrictHardSoftScore::ZERO,
            output: input_state.clone(),
            current: input_state.clone(),
            new_best_found: false,
            iterations: 0,
        };
        task.reset(input_state);
        task
    }

    pub fn statistics(&self) -> &ScoreStatistics {
        &self.statistics
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

impl<'a> LocalSearchTask<'a> for AcceptanceLocalSearchTask<'a> {
    fn reset(&mut self, input_state: State<'a>) {
        let score = evaluate_all(self.constraints, &input_state);
        let size = input_state.size();
        self.current = input_state.clone();
        self.current_score = score;
        self.output = input_state;
        self.output_score = score;
        self.initial_score = score;
        self.new_best_found = false;
        self.iterations = 0;
        self.termination.reset();
        self.statistics = ScoreStatistics::new();
        self.acceptor.phase_started(score);

        tracing::info!(
            message = "Solving started",
            entity_count = (size.x * size.y * size.z * size.w) as u64,
            variable_count = size.y as u64,
            value_count = size.x as u64,
        );
    }

    fn step(&mut self, heuristic_provider: &mut HeuristicProvider) {
        self.new_best_found = false;
        self.acceptor.step_started();

        let last_step_score = self.current_score;
        let before_bits = self.current.bits().clone();

        let mut chain = heuristic_provider.generate_search_perturbators(self.constraints, &self.current);
        chain.modify(&mut self.current);
        let candidate_score = evaluate_all(self.constraints, &self.current);

        let state_hash = self.current.bits().fnv1a_hash();
        let move_hash = before_bits.xor_delta_hash(self.current.bits());

        let mut ctx = AcceptanceContext {
            last_step_score,
            candidate_score,
            output_score: self.output_score,
            state_hash,
            move_hash,
            accepted: false,
        };

        let accepted = self.acceptor.is_accepted(&ctx);
        ctx.accepted = accepted;
        if accepted {
            self.current_score = candidate_score;
            if candidate_score > self.output_score {
                self.output = self.current.clone();
                self.output_score = candidate_score;
                self.new_best_found = true;
                self.statistics.record(candidate_score);
                tracing::debug!(
                    message = "New best solution",
                    step = self.iterations as u64,
                    score = format!("{candidate_score}"),
                );
            }
        } else {
            chain.revert(&mut self.current);
        }

        self.acceptor.step_ended(&ctx);
        self.termination.record_step(candidate_score > last_step_score);
        self.iterations += 1;
    }

    fn should_step(&mut self) -> bool {
        !self.termination.is_terminated(self.output_score)
    }

    fn new_best_found(&self) -> bool {
        self.new_best_found
    }

    fn get_output_state(&self) -> &State<'a> {
        &self.output
    }

    fn get_output_score(&self) -> StrictHardSoftScore {
        self.output_score
    }

    fn get_initial_score(&self) -> StrictHardSoftScore {
        self.initial_score
    }
}
