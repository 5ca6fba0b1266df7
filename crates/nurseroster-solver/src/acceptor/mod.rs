//! Move-acceptance strategies for local search: the policy that decides
//! whether a candidate score replaces the current one for the next step.

mod diversified_late_acceptance;
mod late_acceptance;
mod simulated_annealing;
mod tabu_move;
mod tabu_state;

pub use diversified_late_acceptance::DiversifiedLateAcceptanceAcceptor;
pub use late_acceptance::LateAcceptanceAcceptor;
pub use simulated_annealing::SimulatedAnnealingAcceptor;
pub use tabu_move::TabuMoveAcceptor;
pub use tabu_state::TabuStateAcceptor;

use std::fmt::Debug;

use nurseroster_core::score::StrictHardSoftScore;

/// Everything an acceptor needs to judge one step, gathered by the search
/// task so acceptors stay decoupled from `State` itself.
#[derive(Debug, Clone, Copy)]
pub struct AcceptanceContext {
    pub last_step_score: StrictHardSoftScore,
    pub candidate_score: StrictHardSoftScore,
    pub output_score: StrictHardSoftScore,
    /// FNV-1a fingerprint of the candidate state's whole bit-vector.
    pub state_hash: u64,
    /// FNV-1a fingerprint of this step's XOR-delta against the state before
    /// `modify` ran, mixed with the net population-count change.
    pub move_hash: u64,
    /// Whether `is_accepted` returned true for this candidate — acceptors
    /// that only want to remember moves the search actually took (the tabu
    /// acceptors) gate their `step_ended` bookkeeping on this.
    pub accepted: bool,
}

/// Decides whether a local-search step's candidate score becomes the new
/// current score.
pub trait Acceptor: Debug + Send {
    fn is_accepted(&mut self, ctx: &AcceptanceContext) -> bool;

    fn phase_started(&mut self, _initial_score: StrictHardSoftScore) {}
    fn phase_ended(&mut self) {}
    fn step_started(&mut self) {}
    /// Called once a step's candidate has been committed as the new
    /// current score, so the acceptor can update any running state.
    fn step_ended(&mut self, _ctx: &AcceptanceContext) {}
}
