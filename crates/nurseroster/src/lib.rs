//! Facade crate for the NurseRoster solver.
//!
//! Wires the domain model (`nurseroster-core`), constraints
//! (`nurseroster-scoring`), the local-search engine (`nurseroster-solver`),
//! instance/roster IO (`nurseroster-io`), and configuration
//! (`nurseroster-config`) into a single entry point: hand it a built
//! instance and a [`SolverConfig`](nurseroster_config::SolverConfig), get
//! back the best state found before termination.

pub mod prelude {
    pub use nurseroster_config::{
        AcceptorConfig, DiversifiedLateAcceptanceConfig, LateAcceptanceConfig, SimulatedAnnealingConfig, SolverConfig, TabuConfig, TerminationConfig,
    };
    pub use nurseroster_core::score::{Score, StrictHardSoftScore};
    pub use nurseroster_core::{Axis, Size, State};
    pub use nurseroster_io::{parse, BuiltInstance, IoFormatError, ParsedInstance};
    pub use nurseroster_scoring::constraints::build_all;
    pub use nurseroster_scoring::Constraint;
    pub use nurseroster_solver::acceptor::{
        Acceptor, DiversifiedLateAcceptanceAcceptor, LateAcceptanceAcceptor, SimulatedAnnealingAcceptor, TabuMoveAcceptor, TabuStateAcceptor,
    };
    pub use nurseroster_solver::{channel, AcceptanceLocalSearchTask, HeuristicProvider, LocalSearchTask, ObserverHandle, Termination, Update, WorkerHandle};

    pub use crate::{SolveResult, SolverContext};
}

use std::time::Instant;

use nurseroster_config::{AcceptorConfig, SolverConfig};
use nurseroster_core::score::StrictHardSoftScore;
use nurseroster_core::State;
use nurseroster_scoring::Constraint;
use nurseroster_solver::acceptor::{Acceptor, DiversifiedLateAcceptanceAcceptor, LateAcceptanceAcceptor, SimulatedAnnealingAcceptor, TabuMoveAcceptor, TabuStateAcceptor};
use nurseroster_solver::channel::{Update, WorkerHandle};
use nurseroster_solver::{AcceptanceLocalSearchTask, HeuristicProvider, LocalSearchTask, ScoreStatistics, Termination};

/// The outcome of a solve run: the best state found and its score, alongside
/// the initial score for comparison.
pub struct SolveResult<'a> {
    pub state: State<'a>,
    pub initial_score: StrictHardSoftScore,
    pub final_score: StrictHardSoftScore,
    pub iterations: usize,
    pub statistics: ScoreStatistics,
}

fn build_acceptor(config: &AcceptorConfig) -> Box<dyn Acceptor> {
    match config {
        AcceptorConfig::LateAcceptance(c) => Box::new(LateAcceptanceAcceptor::new(c.history_size)),
        AcceptorConfig::DiversifiedLateAcceptance(c) => Box::new(DiversifiedLateAcceptanceAcceptor::new(c.history_size)),
        AcceptorConfig::SimulatedAnnealing(c) => Box::new(SimulatedAnnealingAcceptor::new(c.starting_soft_temperature, c.cooling_rate, 1)),
        AcceptorConfig::TabuState(c) => Box::new(TabuStateAcceptor::new(c.tenure)),
        AcceptorConfig::TabuMove(c) => Box::new(TabuMoveAcceptor::new(c.tenure)),
    }
}

/// Binds a built instance's constraints, a config, and a starting state into
/// a runnable search. Owns nothing the caller doesn't hand it; `run` and
/// `run_observed` are the only ways to actually drive the search.
pub struct SolverContext<'a> {
    constraints: &'a [Box<dyn Constraint>],
    config: SolverConfig,
    input_state: State<'a>,
}

impl<'a> SolverContext<'a> {
    pub fn new(constraints: &'a [Box<dyn Constraint>], config: SolverConfig, input_state: State<'a>) -> Self {
        Self {
            constraints,
            config,
            input_state,
        }
    }

    fn build_task(self) -> AcceptanceLocalSearchTask<'a> {
        let acceptor = build_acceptor(&self.config.acceptor);
        let termination = Termination::new(
            self.config.termination.max_idle_iterations,
            self.config.termination.max_feasible_idle_iterations,
            self.config.termination.iter_at_feasible_threshold,
        );
        AcceptanceLocalSearchTask::new(self.constraints, acceptor, termination, self.input_state)
    }

    /// Runs local search to completion on the calling thread. Emits a
    /// "Solving ended" lifecycle event on exit, matching the "Solving
    /// started" and "New best solution" events the task loop itself emits.
    pub fn run(self) -> SolveResult<'a> {
        let mut task = self.build_task();
        let mut heuristic_provider = HeuristicProvider::new();
        let started = Instant::now();

        while task.should_step() {
            task.step(&mut heuristic_provider);
        }

        tracing::info!(
            message = "Solving ended",
            duration_ms = started.elapsed().as_millis() as u64,
            final_score = format!("{}", task.get_output_score()),
        );

        SolveResult {
            initial_score: task.get_initial_score(),
            final_score: task.get_output_score(),
            iterations: task.iterations(),
            statistics: task.statistics().clone(),
            state: task.get_output_state().clone(),
        }
    }

    /// Runs like [`run`](Self::run), but publishes an [`Update`] through
    /// `worker` on every new best and once more, marked `done`, on exit, and
    /// stops early if the paired `ObserverHandle` requests it. The caller
    /// decides whether to run this on a spawned thread; this method itself
    /// never spawns one.
    pub fn run_observed(self, worker: &WorkerHandle<'a>) -> SolveResult<'a> {
        let mut task = self.build_task();
        let mut heuristic_provider = HeuristicProvider::new();
        let started = Instant::now();

        while task.should_step() && !worker.stop_requested() {
            task.step(&mut heuristic_provider);
            if task.new_best_found() {
                worker.publish(Update {
                    state: task.get_output_state().clone(),
                    score: task.get_output_score(),
                    statistics: task.statistics().clone(),
                    done: false,
                });
            }
        }

        tracing::info!(
            message = "Solving ended",
            duration_ms = started.elapsed().as_millis() as u64,
            final_score = format!("{}", task.get_output_score()),
        );

        worker.publish(Update {
            state: task.get_output_state().clone(),
            score: task.get_output_score(),
            statistics: task.statistics().clone(),
            done: true,
        });

        SolveResult {
            initial_score: task.get_initial_score(),
            final_score: task.get_output_score(),
            iterations: task.iterations(),
            statistics: task.statistics().clone(),
            state: task.get_output_state().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nurseroster_config::{AcceptorConfig, LateAcceptanceConfig, TerminationConfig};
    use nurseroster_core::domain::{Day, Employee, Shift, WeekdayMask};
    use nurseroster_core::time::{DailyInterval, Instant as DomainInstant, Range};
    use nurseroster_core::{Axis, Size};
    use nurseroster_scoring::constraints::build_all;
    use std::collections::HashMap;

    fn fixture() -> (Size, Axis<Shift>, Axis<Employee>, Axis<Day>, Axis<nurseroster_core::domain::Skill>) {
        let tz = chrono_tz::UTC;
        let day_start = DomainInstant::from_naive(tz, chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), chrono::NaiveTime::from_hms_opt(0, 0, 0).unwrap()).unwrap();
        let day_end = day_start.plus(chrono::Duration::hours(24));
        let day = Day::new(0, Range::new(day_start, day_end));

        let shift = Shift {
            index: 0,
            name: "Day".to_string(),
            weekday_mask: WeekdayMask::new(0b0111_1111),
            interval: DailyInterval::new(chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(), chrono::NaiveTime::from_hms_opt(16, 0, 0).unwrap()),
            default_slot_count: 1,
            slot_overrides: HashMap::new(),
            min_slots: 1,
            max_slots: 1,
            min_slot_overrides: HashMap::new(),
            rest_minutes_before: 0,
            rest_minutes_after: 0,
            consecutive_rest_minutes: 480,
            required_all_skills: HashMap::new(),
            required_one_skills: HashMap::new(),
            blocked_next_day_shifts: Vec::new(),
        };

        let employee = Employee::new(0, "Alice");

        let size = Size::new(1, 1, 1, 0).unwrap();
        (size, Axis::new(vec![shift]), Axis::new(vec![employee]), Axis::new(vec![day]), Axis::new(vec![]))
    }

    #[test]
    fn solve_runs_to_termination_and_reports_iterations() {
        let (size, shifts, employees, days, skills) = fixture();
        let state = State::new(size, &shifts, &employees, &days, &skills);
        let constraints = build_all(shifts.as_slice(), employees.as_slice(), days.as_slice(), skills.as_slice());

        let config = SolverConfig::new()
            .with_termination(TerminationConfig {
                max_idle_iterations: 20,
                max_feasible_idle_iterations: 10,
                iter_at_feasible_threshold: 5,
            })
            .with_acceptor(AcceptorConfig::LateAcceptance(LateAcceptanceConfig { history_size: 3 }));

        let result = SolverContext::new(&constraints, config, state).run();
        assert!(result.iterations > 0);
        assert!(result.final_score >= result.initial_score);
    }

    #[test]
    fn run_observed_publishes_a_final_done_update() {
        let (size, shifts, employees, days, skills) = fixture();
        let state = State::new(size, &shifts, &employees, &days, &skills);
        let constraints = build_all(shifts.as_slice(), employees.as_slice(), days.as_slice(), skills.as_slice());

        let config = SolverConfig::new().with_termination(TerminationConfig {
            max_idle_iterations: 10,
            max_feasible_idle_iterations: 5,
            iter_at_feasible_threshold: 3,
        });

        let (worker, observer) = nurseroster_solver::channel::channel();
        let result = SolverContext::new(&constraints, config, state).run_observed(&worker);
        assert!(result.iterations > 0);

        let mut saw_done = false;
        while let Some(update) = observer.poll() {
            saw_done = saw_done || update.done;
        }
        assert!(saw_done, "run_observed should publish a final done update");
    }
}
