//! # interval-uct
//!
//! Black-box tuning of a single continuous parameter with a Monte Carlo Tree Search
//! variant driven by the UCT (Upper Confidence bound for Trees) rule.
//!
//! The parameter's domain is split into a fixed number of equal-width chunks, and each
//! chunk is split again whenever the search decides to look closer. Chunks whose samples
//! come back as wins get refined further, while the exploration bonus keeps every chunk
//! in play.
//!
//! ## Basic Usage
//!
//! ```
//! use interval_uct::{FnEvaluator, OptimizerConfig, Outcome, ParameterRange, UctOptimizer};
//!
//! fn main() -> Result<(), interval_uct::TuneError> {
//!     // Anything between 300 and 400 is a win, everything else a loss
//!     let evaluator = FnEvaluator::new(|_name: &str, value: f64| {
//!         if (300.0..400.0).contains(&value) {
//!             Outcome::Win
//!         } else {
//!             Outcome::Loss
//!         }
//!     });
//!
//!     let config = OptimizerConfig::default()
//!         .with_iterations(200)
//!         .with_exploration_constant(0.3)
//!         .with_branching_factor(10)
//!         .with_seed(7);
//!
//!     let mut optimizer = UctOptimizer::new(config, evaluator);
//!     let best = optimizer.tune_params(&[ParameterRange::new("k", 0.0, 1000.0)])?;
//!
//!     assert!(best.low >= 300.0 && best.high <= 400.0);
//!     println!("{}", optimizer.get_statistics().summary());
//!     Ok(())
//! }
//! ```
//!
//! ## How It Works
//!
//! Every iteration walks the same four phases as a game-tree MCTS:
//!
//! 1. **Selection**: starting from the root, descend into the child with the highest UCT
//!    value for as long as every child slot of the current node has been sampled.
//! 2. **Expansion**: at the first node with an empty slot, materialize one empty slot,
//!    chosen uniformly at random.
//! 3. **Evaluation**: draw a value uniformly from the new node's interval and hand it to
//!    the [`Evaluator`], which answers win, loss or draw.
//! 4. **Backpropagation**: add one visit (and one win, for a win) to the new node and
//!    each of its ancestors.
//!
//! Once the iteration budget is spent, the answer is found by following the most visited
//! child from the root down to a leaf and reporting that leaf's interval.
//!
//! ## External evaluators
//!
//! [`CommandEvaluator`] runs an external program once per sample, passing the parameter
//! name and value as trailing arguments and reading `W`, `L` or `D` from its output.

pub mod config;
pub mod evaluator;
pub mod optimizer;
pub mod outcome;
pub mod stats;
pub mod tree;
pub mod utils;

pub use config::OptimizerConfig;
pub use evaluator::{CommandEvaluator, Evaluator, FnEvaluator};
pub use optimizer::UctOptimizer;
pub use outcome::{Interval, Outcome, ParameterRange, SampleRecord};
pub use stats::SearchStatistics;
pub use tree::{IntervalNode, IntervalTree, NodeId};

/// Error types for interval tuning
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TuneError {
    /// The optimizer was configured with values it cannot search with
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The select/expand/backpropagate protocol was violated
    #[error("Tree consistency error: {0}")]
    TreeConsistency(String),

    /// An evaluator reported something that is not a win, loss or draw
    #[error("Unknown outcome: {0:?}")]
    UnknownOutcome(String),
}

/// Result type for tuning operations
pub type Result<T> = std::result::Result<T, TuneError>;
