//! Configuration options for the UCT optimizer
//!
//! This module defines the parameters that control how the interval tree is
//! grown and how long the search runs.

use crate::{Result, TuneError};

/// Configuration for the UCT optimizer
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use interval_uct::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_iterations(500)
///     .with_exploration_constant(0.5)
///     .with_branching_factor(4)
///     .with_horizon(12)
///     .with_seed(42);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerConfig {
    /// Number of select/expand/evaluate/backpropagate iterations to run
    ///
    /// The search always runs exactly this many iterations.
    pub iterations: usize,

    /// Exploration constant for UCT
    ///
    /// Higher values favor chunks that have been sampled less often.
    pub exploration_constant: f64,

    /// Number of equal-width chunks every interval is split into
    pub branching_factor: usize,

    /// Maximum depth of the interval tree
    ///
    /// `None` leaves the depth unbounded. With `Some(depth)`, nodes at that depth
    /// are never split and are sampled directly instead.
    pub horizon: Option<usize>,

    /// Seed for the random number generator
    ///
    /// `None` seeds from system entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            iterations: 100,
            exploration_constant: 0.3,
            branching_factor: 10,
            horizon: None,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    /// Sets the number of iterations
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the branching factor
    pub fn with_branching_factor(mut self, branching_factor: usize) -> Self {
        self.branching_factor = branching_factor;
        self
    }

    /// Caps the depth of the interval tree
    pub fn with_horizon(mut self, depth: usize) -> Self {
        self.horizon = Some(depth);
        self
    }

    /// Makes runs reproducible by seeding the random number generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks that the configuration can drive a search
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(TuneError::InvalidConfiguration(
                "iteration count must be positive".to_string(),
            ));
        }

        if self.branching_factor == 0 {
            return Err(TuneError::InvalidConfiguration(
                "branching factor must be positive".to_string(),
            ));
        }

        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(TuneError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }

        if self.horizon == Some(0) {
            return Err(TuneError::InvalidConfiguration(
                "horizon must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
