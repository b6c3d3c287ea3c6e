//! Search driver for UCT interval tuning
//!
//! This module runs the select, expand, evaluate and backpropagate loop over an
//! [`IntervalTree`] and extracts the final interval once the budget is spent.

use std::collections::BTreeMap;
use std::time::Instant;

use log::{debug, info, warn};
use rand::{prelude::IteratorRandom, rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::OptimizerConfig,
    evaluator::Evaluator,
    outcome::{Interval, Outcome, ParameterRange, SampleRecord},
    stats::SearchStatistics,
    tree::{IntervalNode, IntervalTree, NodeId},
    Result, TuneError,
};

/// Draws a value uniformly from `[low, high)` of `interval`
///
/// Never panics, even once an interval has been refined below float resolution.
fn sample_uniform<R: Rng>(interval: Interval, rng: &mut R) -> f64 {
    let value = interval.low + rng.gen::<f64>() * interval.width();
    value.min(interval.high)
}

/// UCT optimizer for a single continuous parameter
///
/// Each call to [`tune_params`](UctOptimizer::tune_params) builds a fresh tree,
/// runs exactly the configured number of iterations, and keeps the tree around
/// for inspection until the next call.
pub struct UctOptimizer<E: Evaluator> {
    /// Configuration for the search
    config: OptimizerConfig,

    /// Scores every sampled value
    evaluator: E,

    /// Statistics gathered during the last run
    statistics: SearchStatistics,

    /// Tree built by the last run
    tree: Option<IntervalTree>,
}

impl<E: Evaluator> UctOptimizer<E> {
    /// Creates a new optimizer with the given configuration and evaluator
    pub fn new(config: OptimizerConfig, evaluator: E) -> Self {
        UctOptimizer {
            config,
            evaluator,
            statistics: SearchStatistics::new(),
            tree: None,
        }
    }

    /// Returns the configuration
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Returns the evaluator
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Consumes the optimizer, returning its evaluator
    pub fn into_evaluator(self) -> E {
        self.evaluator
    }

    /// Tunes the first of `params` and returns its best-found sub-range
    ///
    /// Only the first parameter is searched; any others are ignored with a
    /// warning. Configuration problems are reported before any sample is taken.
    pub fn tune_params(&mut self, params: &[ParameterRange]) -> Result<ParameterRange> {
        self.config.validate()?;

        let param = params.first().ok_or_else(|| {
            TuneError::InvalidConfiguration("no parameters to tune".to_string())
        })?;
        param.validate()?;

        if params.len() > 1 {
            warn!(
                "only {:?} is tuned, ignoring {} other parameter(s)",
                param.name,
                params.len() - 1
            );
        }

        let mut tree = IntervalTree::new(
            param.interval(),
            self.config.exploration_constant,
            self.config.branching_factor,
        )?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        // Reset statistics
        self.statistics = SearchStatistics::new();
        let failures_before = self.evaluator.failures();

        info!(
            "tuning {:?} over {} for {} iterations",
            param.name,
            param.interval(),
            self.config.iterations
        );

        let start_time = Instant::now();
        let run = self.run_iterations(&mut tree, &mut rng, &param.name);

        // Bookkeeping holds for aborted runs too
        self.statistics.total_time = start_time.elapsed();
        self.statistics.evaluator_failures =
            self.evaluator.failures().saturating_sub(failures_before);

        let best = tree.find_best_interval();
        self.tree = Some(tree);
        run?;

        info!("best interval for {:?}: {}", param.name, best);
        Ok(ParameterRange::new(param.name.clone(), best.low, best.high))
    }

    /// Main search loop
    fn run_iterations<R: Rng>(
        &mut self,
        tree: &mut IntervalTree,
        rng: &mut R,
        parameter: &str,
    ) -> Result<()> {
        for i in 0..self.config.iterations {
            debug!("iteration {}", i);
            self.execute_iteration(tree, rng, parameter)?;
            self.statistics.iterations = i + 1;
        }

        Ok(())
    }

    /// Execute a single select, expand, evaluate, backpropagate iteration
    fn execute_iteration<R: Rng>(
        &mut self,
        tree: &mut IntervalTree,
        rng: &mut R,
        parameter: &str,
    ) -> Result<()> {
        // 1. Selection phase
        let expansion_point = self.selection(tree)?;

        // 2. Expansion phase
        let leaf = self.expansion(tree, expansion_point, rng)?;

        // 3. Evaluation phase
        let value = sample_uniform(tree.node(leaf).interval(), rng);
        let outcome = self.evaluator.evaluate(parameter, value);
        debug!(
            "sampled {} = {:.5} in {} -> {}",
            parameter,
            value,
            tree.node(leaf).interval(),
            outcome
        );
        self.statistics.record_outcome(outcome);

        // 4. Backpropagation phase
        tree.propagate_result(leaf, SampleRecord::new(parameter, value, outcome));

        self.statistics.tree_size = tree.len();
        self.statistics.max_depth = self.statistics.max_depth.max(tree.node(leaf).depth());

        Ok(())
    }

    /// Returns true if `node` sits at the configured depth cap
    fn at_horizon(&self, node: &IntervalNode) -> bool {
        self.config
            .horizon
            .map_or(false, |horizon| node.depth() >= horizon)
    }

    /// Selection phase: descend by UCT until a node still has an empty slot
    fn selection(&self, tree: &IntervalTree) -> Result<NodeId> {
        let mut current = tree.root();

        loop {
            if self.at_horizon(tree.node(current)) {
                return Ok(current);
            }

            match tree.select_best_child(current)? {
                Some(child) => current = child,
                None => return Ok(current),
            }
        }
    }

    /// Expansion phase: materialize a random empty slot of `node`
    ///
    /// A node at the depth cap is sampled in place instead.
    fn expansion<R: Rng>(
        &self,
        tree: &mut IntervalTree,
        node: NodeId,
        rng: &mut R,
    ) -> Result<NodeId> {
        if self.at_horizon(tree.node(node)) {
            return Ok(node);
        }

        let slot = tree
            .node(node)
            .empty_slots()
            .choose(rng)
            .ok_or_else(|| {
                TuneError::TreeConsistency(format!(
                    "expansion point {} has no empty slot",
                    node
                ))
            })?;

        tree.expand_child(node, slot)
    }

    /// Returns the search statistics
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Returns the tree built by the last run
    pub fn tree(&self) -> Option<&IntervalTree> {
        self.tree.as_ref()
    }

    /// Returns a visualization of the last run's tree
    pub fn visualize_tree(&self) -> String {
        self.tree.as_ref().map(IntervalTree::render).unwrap_or_default()
    }

    /// All values sampled in the last run, grouped by outcome in sampling order
    pub fn samples_by_outcome(&self) -> BTreeMap<Outcome, Vec<f64>> {
        let mut groups: BTreeMap<Outcome, Vec<f64>> = BTreeMap::new();

        if let Some(tree) = &self.tree {
            for sample in tree.node(tree.root()).samples() {
                groups.entry(sample.outcome).or_default().push(sample.value);
            }
        }

        groups
    }

    /// Renders every sampled value as an `<outcome> <value>` line, grouped by outcome
    ///
    /// The format is meant for feeding external plotting tools.
    pub fn render_samples(&self) -> String {
        let mut output = String::new();

        for (outcome, values) in self.samples_by_outcome() {
            for value in values {
                output.push_str(&format!("{} {:.5}\n", outcome, value));
            }
        }

        output
    }
}
