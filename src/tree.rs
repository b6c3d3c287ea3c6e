//! Interval tree for UCT search
//!
//! Each node covers an absolute sub-range of the tuned parameter's domain and
//! owns a fixed number of child slots, one per equal-width chunk of that range.
//! Children are materialized lazily, the first time the search expands them.
//!
//! Nodes live in an arena owned by [`IntervalTree`] and refer to each other
//! through [`NodeId`]s, so parent links are plain indices and every traversal
//! (selection, backpropagation, rendering) is a loop rather than a recursion.

use std::fmt;

use crate::{
    outcome::{Interval, SampleRecord},
    utils, Result, TuneError,
};

/// Handle to a node inside an [`IntervalTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its tree's arena
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the interval tree
///
/// Statistics only ever grow: `visits` and `wins` are bumped together by
/// [`IntervalTree::propagate_result`], which keeps `wins <= visits`.
#[derive(Debug, Clone)]
pub struct IntervalNode {
    interval: Interval,
    children: Vec<Option<NodeId>>,
    visits: u64,
    wins: u64,
    samples: Vec<SampleRecord>,
    parent: Option<NodeId>,
    exploration_constant: f64,
    depth: usize,
}

impl IntervalNode {
    /// Creates a detached node with every child slot empty and no statistics
    pub fn new(interval: Interval, exploration_constant: f64, branching_factor: usize) -> Self {
        IntervalNode {
            interval,
            children: vec![None; branching_factor],
            visits: 0,
            wins: 0,
            samples: Vec::new(),
            parent: None,
            exploration_constant,
            depth: 0,
        }
    }

    /// The absolute range this node covers
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Number of samples propagated through this node
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Number of those samples that were wins
    pub fn wins(&self) -> u64 {
        self.wins
    }

    /// Observed win rate, 0.0 before the first visit
    pub fn win_rate(&self) -> f64 {
        utils::win_rate(self.wins, self.visits)
    }

    /// Every sample propagated through this node, oldest first
    pub fn samples(&self) -> &[SampleRecord] {
        &self.samples
    }

    /// The parent node, `None` for the root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns true if this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Distance from the root (root = 0)
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// UCT bias coefficient shared by the whole tree
    pub fn exploration_constant(&self) -> f64 {
        self.exploration_constant
    }

    /// Number of child slots
    pub fn branching_factor(&self) -> usize {
        self.children.len()
    }

    /// Child slots in chunk order
    pub fn children(&self) -> &[Option<NodeId>] {
        &self.children
    }

    /// The child in slot `index`, if it has been materialized
    pub fn child(&self, index: usize) -> Option<NodeId> {
        self.children.get(index).copied().flatten()
    }

    /// Width of each child's interval
    pub fn chunk_width(&self) -> f64 {
        self.interval.chunk_width(self.branching_factor())
    }

    /// Interval covered by child slot `index`
    pub fn child_interval(&self, index: usize) -> Interval {
        self.interval.sub_interval(index, self.branching_factor())
    }

    /// Indices of the child slots that are still empty
    pub fn empty_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.children
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index)
    }

    /// Returns true if every child slot has been materialized
    pub fn is_fully_expanded(&self) -> bool {
        self.children.iter().all(Option::is_some)
    }

    /// Returns true if no child slot has been materialized
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }
}

/// Arena-backed tree partitioning one parameter's domain
#[derive(Debug, Clone)]
pub struct IntervalTree {
    nodes: Vec<IntervalNode>,
}

impl IntervalTree {
    /// Creates a tree holding only a root covering `interval`
    pub fn new(
        interval: Interval,
        exploration_constant: f64,
        branching_factor: usize,
    ) -> Result<Self> {
        if branching_factor == 0 {
            return Err(TuneError::InvalidConfiguration(
                "branching factor must be positive".to_string(),
            ));
        }
        if !interval.is_proper() {
            return Err(TuneError::InvalidConfiguration(format!(
                "domain {} is empty, inverted or not finite",
                interval
            )));
        }

        let root = IntervalNode::new(interval, exploration_constant, branching_factor);
        Ok(IntervalTree { nodes: vec![root] })
    }

    /// The root node's handle
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node behind `id`
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    pub fn node(&self, id: NodeId) -> &IntervalNode {
        &self.nodes[id.0]
    }

    /// Returns the node behind `id`, or `None` if it belongs to another tree
    pub fn get(&self, id: NodeId) -> Option<&IntervalNode> {
        self.nodes.get(id.0)
    }

    /// Number of materialized nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth of the deepest materialized node
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(IntervalNode::depth).max().unwrap_or(0)
    }

    /// All nodes in creation order, paired with their handles
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &IntervalNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Returns true if `id` is the root
    pub fn is_root(&self, id: NodeId) -> bool {
        self.node(id).is_root()
    }

    /// Materializes child slot `index` of `id`, returning the child
    ///
    /// Expanding a slot that already holds a child returns that child without
    /// creating another one.
    pub fn expand_child(&mut self, id: NodeId, index: usize) -> Result<NodeId> {
        let parent = self.node(id);
        if index >= parent.branching_factor() {
            return Err(TuneError::TreeConsistency(format!(
                "slot {} is out of range for node {} with {} slots",
                index,
                id,
                parent.branching_factor()
            )));
        }
        if let Some(existing) = parent.child(index) {
            return Ok(existing);
        }

        let mut child = IntervalNode::new(
            parent.child_interval(index),
            parent.exploration_constant,
            parent.branching_factor(),
        );
        child.parent = Some(id);
        child.depth = parent.depth + 1;

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(child);
        self.nodes[id.0].children[index] = Some(child_id);

        Ok(child_id)
    }

    /// UCT value of a non-root node
    ///
    /// Fails on the root, which has no parent to compare against, and on a node
    /// that has never been visited.
    pub fn uct_value(&self, id: NodeId) -> Result<f64> {
        let node = self.node(id);
        let parent = node.parent.ok_or_else(|| {
            TuneError::TreeConsistency("uct value is undefined for the root".to_string())
        })?;
        if node.visits == 0 {
            return Err(TuneError::TreeConsistency(format!(
                "uct value requested for unvisited node {}",
                id
            )));
        }

        Ok(utils::uct_value(
            node.wins,
            node.visits,
            self.node(parent).visits,
            node.exploration_constant,
        ))
    }

    /// Picks the child of `id` to descend into
    ///
    /// Returns `Ok(None)` while any child slot is empty, telling the caller that
    /// `id` is the expansion point. Otherwise returns the child with the highest
    /// UCT value. Ties go to the child created first, so a flat objective keeps
    /// refining the branch that was sampled first.
    pub fn select_best_child(&self, id: NodeId) -> Result<Option<NodeId>> {
        let node = self.node(id);
        if !node.is_fully_expanded() {
            return Ok(None);
        }

        let mut best: Option<NodeId> = None;
        let mut best_value = f64::NEG_INFINITY;

        for &child in node.children.iter().flatten() {
            let value = self.uct_value(child)?;
            let better = match best {
                None => true,
                Some(best_child) => {
                    value > best_value || (value == best_value && child < best_child)
                }
            };
            if better {
                best_value = value;
                best = Some(child);
            }
        }

        Ok(best)
    }

    /// The materialized child of `id` with the most visits, the oldest on ties
    ///
    /// Ignores the exploration bonus; this is the pure-exploitation pick used
    /// to extract the final answer.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, u64)> = None;

        for &child in self.node(id).children.iter().flatten() {
            let visits = self.node(child).visits;
            let better = match best {
                None => true,
                Some((best_child, best_visits)) => {
                    visits > best_visits || (visits == best_visits && child < best_child)
                }
            };
            if better {
                best = Some((child, visits));
            }
        }

        best.map(|(child, _)| child)
    }

    /// Follows the most visited child from `id` down to a node without children
    pub fn best_leaf_from(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(child) = self.most_visited_child(current) {
            current = child;
        }
        current
    }

    /// Interval of the leaf reached by following the most visited child from `id`
    pub fn find_best_interval_from(&self, id: NodeId) -> Interval {
        self.node(self.best_leaf_from(id)).interval
    }

    /// Interval of the leaf reached by following the most visited child from the root
    pub fn find_best_interval(&self) -> Interval {
        self.find_best_interval_from(self.root())
    }

    /// Records a sample on `id` and every ancestor up to the root
    ///
    /// Each node on the way gains one visit, one win if the outcome is a win,
    /// and a copy of the record.
    pub fn propagate_result(&mut self, id: NodeId, record: SampleRecord) {
        let win = record.outcome.win_value();
        let mut current = Some(id);

        while let Some(node_id) = current {
            let node = &mut self.nodes[node_id.0];
            node.visits += 1;
            node.wins += win;
            node.samples.push(record.clone());
            current = node.parent;
        }
    }

    /// Renders the tree as indented text, one line per materialized node
    pub fn render(&self) -> String {
        let mut output = String::new();
        let mut stack = vec![(self.root(), None::<usize>)];

        while let Some((id, slot)) = stack.pop() {
            let node = self.node(id);
            let indent = "  ".repeat(node.depth);
            let label = match slot {
                Some(slot) => format!("{}:", slot),
                None => "Root".to_string(),
            };

            output.push_str(&format!(
                "{}{} {} (wins: {}, visits: {})\n",
                indent, label, node.interval, node.wins, node.visits
            ));

            // Reverse so children pop in slot order
            for (slot, child) in node.children.iter().enumerate().rev() {
                if let Some(child) = child {
                    stack.push((*child, Some(slot)));
                }
            }
        }

        output
    }
}

impl fmt::Display for IntervalTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
