//! Simulated annealing with a lexicographic, per-level temperature: each
//! score level cools at its own rate so the solver stays willing to
//! gamble on soft-score regressions long after it has stopped gambling on
//! hard ones.

use nurseroster_core::score::StrictHardSoftScore;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Acceptor, AcceptanceContext};

#[derive(Debug)]
pub struct SimulatedAnnealingAcceptor {
    starting_temperature: f64,
    current_temperature: f64,
    decay_rate: f64,
    min_temperature: f64,
    steps_per_temperature: usize,
    steps_at_temperature: usize,
    /// Temperature multipliers for the strict and hard levels; the soft
    /// level always uses the raw temperature.
    m_strict: f64,
    m_hard: f64,
    /// Above this temperature, acceptance switches from lexicographic
    /// per-level comparison to a single energy-weighted sum.
    energy_temp_threshold: f64,
    w_strict: f64,
    w_hard: f64,
    w_soft: f64,
    /// Acceptance probability floor, scaled by `T / T0`.
    floor: f64,
    reheat_factor: f64,
    reheat_idle_threshold: usize,
    idle_iterations: usize,
    rng: StdRng,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(starting_temperature: f64, decay_rate: f64, steps_per_temperature: usize) -> Self {
        Self {
            starting_temperature,
            current_temperature: starting_temperature,
            decay_rate,
            min_temperature: starting_temperature * 1e-4,
            steps_per_temperature: steps_per_temperature.max(1),
            steps_at_temperature: 0,
            m_strict: 1e-6,
            m_hard: 1e-3,
            energy_temp_threshold: starting_temperature * 0.5,
            w_strict: 1_000_000.0,
            w_hard: 1_000.0,
            w_soft: 1.0,
            floor: 0.0,
            reheat_factor: 2.0,
            reheat_idle_threshold: 500,
            idle_iterations: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(starting_temperature: f64, decay_rate: f64, steps_per_temperature: usize, seed: u64) -> Self {
        let mut acceptor = Self::new(starting_temperature, decay_rate, steps_per_temperature);
        acceptor.rng = StdRng::seed_from_u64(seed);
        acceptor
    }

    /// Sets starting temperature to 2% of the initial score's weighted
    /// magnitude, the same calibration used for the unweighted scalar SA
    /// acceptor this one generalizes.
    pub fn auto_calibrate(decay_rate: f64, steps_per_temperature: usize) -> Self {
        let mut acceptor = Self::new(0.0, decay_rate, steps_per_temperature);
        acceptor.energy_temp_threshold = 0.0; // recomputed in phase_started once T0 is known
        acceptor
    }

    fn weighted_energy(&self, score: StrictHardSoftScore) -> f64 {
        score.strict() as f64 * self.w_strict + score.hard() as f64 * self.w_hard + score.soft() as f64 * self.w_soft
    }

    fn acceptance_floor(&self) -> f64 {
        self.floor * (self.current_temperature / self.starting_temperature.max(f64::MIN_POSITIVE))
    }
}

impl Default for SimulatedAnnealingAcceptor {
    fn default() -> Self {
        Self::auto_calibrate(0.999_985, 1)
    }
}

impl Acceptor for SimulatedAnnealingAcceptor {
    fn is_accepted(&mut self, ctx: &AcceptanceContext) -> bool {
        if self.current_temperature <= 0.0 {
            return ctx.candidate_score >= ctx.last_step_score;
        }

        if self.current_temperature > self.energy_temp_threshold {
            let delta = self.weighted_energy(ctx.candidate_score) - self.weighted_energy(ctx.last_step_score);
            if delta >= 0.0 {
                return true;
            }
            let probability = (delta / self.current_temperature).exp().max(self.acceptance_floor());
            return self.rng.random::<f64>() < probability;
        }

        let t_strict = self.current_temperature * self.m_strict;
        let t_hard = self.current_temperature * self.m_hard;
        let t_soft = self.current_temperature;

        let levels = [
            (ctx.candidate_score.strict() - ctx.last_step_score.strict(), t_strict),
            (ctx.candidate_score.hard() - ctx.last_step_score.hard(), t_hard),
            (ctx.candidate_score.soft() - ctx.last_step_score.soft(), t_soft),
        ];

        for (delta, t_c) in levels {
            if delta > 0 {
                return true;
            }
            if delta < 0 {
                let probability = ((delta as f64) / t_c).exp().max(self.acceptance_floor());
                return self.rng.random::<f64>() < probability;
            }
        }
        true
    }

    fn phase_started(&mut self, initial_score: StrictHardSoftScore) {
        if self.starting_temperature == 0.0 {
            let magnitude = self.weighted_energy(initial_score).abs();
            self.starting_temperature = if magnitude > 0.0 { magnitude * 0.02 } else { 1.0 };
            self.energy_temp_threshold = self.starting_temperature * 0.5;
            self.min_temperature = self.starting_temperature * 1e-4;
        }
        self.current_temperature = self.starting_temperature;
        self.steps_at_temperature = 0;
        self.idle_iterations = 0;
    }

    fn step_ended(&mut self, ctx: &AcceptanceContext) {
        if ctx.candidate_score <= ctx.last_step_score {
            self.idle_iterations += 1;
        } else {
            self.idle_iterations = 0;
        }

        self.steps_at_temperature += 1;
        if self.steps_at_temperature >= self.steps_per_temperature {
            self.current_temperature = (self.current_temperature * self.decay_rate).max(self.min_temperature);
            self.steps_at_temperature = 0;
        }

        if self.idle_iterations >= self.reheat_idle_threshold {
            self.current_temperature = (self.current_temperature * self.reheat_factor).min(self.starting_temperature);
            self.idle_iterations = 0;
        }
    }
}
