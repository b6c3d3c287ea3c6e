//! Statistics collection for tuning runs
//!
//! This module provides structures for collecting and reporting statistics
//! about a single optimizer run.

use std::time::Duration;

use crate::outcome::Outcome;

/// Statistics collected during a tuning run
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Number of iterations performed
    pub iterations: usize,

    /// Total time spent searching, evaluator calls included
    pub total_time: Duration,

    /// Total number of nodes in the tree
    pub tree_size: usize,

    /// Maximum depth reached in the tree
    pub max_depth: usize,

    /// Samples reported as wins
    pub wins: usize,

    /// Samples reported as losses
    pub losses: usize,

    /// Samples reported as draws
    pub draws: usize,

    /// Evaluations that failed and were recovered from
    pub evaluator_failures: usize,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            evaluator_failures: 0,
        }
    }

    /// Counts one evaluated sample
    pub fn record_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    /// Total number of evaluated samples
    pub fn samples(&self) -> usize {
        self.wins + self.losses + self.draws
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "UCT Tuning Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Outcomes: {} wins, {} losses, {} draws\n\
             - Evaluator failures: {}\n\
             - Avg time per iteration: {:.3} µs",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.wins,
            self.losses,
            self.draws,
            self.evaluator_failures,
            self.avg_time_per_iteration_us()
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
