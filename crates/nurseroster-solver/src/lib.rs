//! Move/perturbator layer and local-search task family: the part of the
//! solver that actually walks the state space, built on top of
//! `nurseroster-core`'s tensor and `nurseroster-scoring`'s constraints.

pub mod acceptor;
pub mod channel;
pub mod heuristic_provider;
pub mod perturbator;
pub mod statistics;
pub mod task;
pub mod termination;

#[cfg(test)]
mod test_fixtures;

pub use acceptor::{Acceptor, AcceptanceContext};
pub use channel::{channel, ObserverHandle, Update, WorkerHandle};
pub use heuristic_provider::HeuristicProvider;
pub use perturbator::{IdentityPerturbator, Perturbator, PerturbatorChain};
pub use statistics::{ScorePoint, ScoreStatistics};
pub use task::{AcceptanceLocalSearchTask, LocalSearchTask};
pub use termination::Termination;
