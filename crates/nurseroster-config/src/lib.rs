//! Configuration system for the NurseRoster solver.
//!
//! Load solver configuration from TOML or YAML to pick a search-task
//! family, its acceptor, and its termination budget without recompiling —
//! the acceptor choice is explicitly a solver parameter, not a compile-time
//! decision.
//!
//! # Examples
//!
//! ```
//! use nurseroster_config::SolverConfig;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 42
//!
//!     [termination]
//!     max_idle_iterations = 2000
//!     max_feasible_idle_iterations = 200
//!     iter_at_feasible_threshold = 50
//!
//!     [acceptor]
//!     type = "late_acceptance"
//!     history_size = 400
//! "#).unwrap();
//!
//! assert_eq!(config.random_seed, Some(42));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Top-level solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Seed for the perturbators' RNG; `None` seeds from OS entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(default)]
    pub termination: TerminationConfig,

    #[serde(default)]
    pub acceptor: AcceptorConfig,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_file(path)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_acceptor(mut self, acceptor: AcceptorConfig) -> Self {
        self.acceptor = acceptor;
        self
    }
}

/// Mirrors `nurseroster_solver::Termination`'s three-tier idle budget.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    pub max_idle_iterations: usize,
    pub max_feasible_idle_iterations: usize,
    pub iter_at_feasible_threshold: usize,
}

impl Default for TerminationConfig {
    fn default() -> Self {
        Self {
            max_idle_iterations: 1_000,
            max_feasible_idle_iterations: 200,
            iter_at_feasible_threshold: 50,
        }
    }
}

/// Selects one of the five acceptor families and its parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AcceptorConfig {
    LateAcceptance(LateAcceptanceConfig),
    DiversifiedLateAcceptance(DiversifiedLateAcceptanceConfig),
    SimulatedAnnealing(SimulatedAnnealingConfig),
    TabuState(TabuConfig),
    TabuMove(TabuConfig),
}

impl Default for AcceptorConfig {
    fn default() -> Self {
        Self::LateAcceptance(LateAcceptanceConfig::default())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LateAcceptanceConfig {
    pub history_size: usize,
}

impl Default for LateAcceptanceConfig {
    fn default() -> Self {
        Self { history_size: 25 }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DiversifiedLateAcceptanceConfig {
    pub history_size: usize,
    pub diversity_margin: i64,
}

impl Default for DiversifiedLateAcceptanceConfig {
    fn default() -> Self {
        Self {
            history_size: 25,
            diversity_margin: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SimulatedAnnealingConfig {
    pub starting_soft_temperature: f64,
    pub cooling_rate: f64,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            starting_soft_temperature: 100.0,
            cooling_rate: 0.0002,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TabuConfig {
    pub tenure: usize,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self { tenure: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pick_late_acceptance() {
        let config = SolverConfig::default();
        assert!(matches!(config.acceptor, AcceptorConfig::LateAcceptance(_)));
        assert_eq!(config.termination.max_idle_iterations, 1_000);
    }

    #[test]
    fn round_trips_through_toml() {
        let toml = r#"
            random_seed = 7

            [termination]
            max_idle_iterations = 500
            max_feasible_idle_iterations = 50
            iter_at_feasible_threshold = 10

            [acceptor]
            type = "tabu_state"
            tenure = 20
        "#;
        let config = SolverConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.termination.max_idle_iterations, 500);
        match config.acceptor {
            AcceptorConfig::TabuState(t) => assert_eq!(t.tenure, 20),
            other => panic!("expected tabu_state, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_through_yaml() {
        let yaml = "random_seed: 3\nacceptor:\n  type: simulated_annealing\n  starting_soft_temperature: 50.0\n  cooling_rate: 0.001\n";
        let config = SolverConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.random_seed, Some(3));
        match config.acceptor {
            AcceptorConfig::SimulatedAnnealing(sa) => assert_eq!(sa.cooling_rate, 0.001),
            other => panic!("expected simulated_annealing, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_surfaces_an_io_error() {
        let err = SolverConfig::load("/nonexistent/path/solver.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
