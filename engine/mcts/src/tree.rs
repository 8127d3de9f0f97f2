//! Statistics store owned by one planner.
//!
//! Every table is keyed by the canonical state key. Entries are created once
//! and never removed for the lifetime of the tree; advancing the root does
//! not prune branches that became unreachable.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use engine_core::LegalMask;

use crate::node::StateNode;

/// Search statistics keyed by state.
#[derive(Debug, Default)]
pub struct SearchTree {
    /// Expanded states: `N(s)`, `P(s)`, `V(s)` and their edges.
    nodes: HashMap<String, StateNode>,

    /// Memoized terminal flags `E(s)`.
    terminal: HashMap<String, bool>,

    /// Memoized terminal rewards `R(s)`, only for terminal states.
    rewards: HashMap<String, f32>,
}

impl SearchTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` has been expanded.
    #[inline]
    pub fn is_expanded(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    #[inline]
    pub fn node(&self, key: &str) -> Option<&StateNode> {
        self.nodes.get(key)
    }

    #[inline]
    pub fn node_mut(&mut self, key: &str) -> Option<&mut StateNode> {
        self.nodes.get_mut(key)
    }

    /// Create the statistics of a newly expanded state with `N(s) = 0`.
    ///
    /// Returns false and leaves the stored entry untouched if `key` is
    /// already expanded.
    pub fn insert_expanded(&mut self, key: String, prior: Vec<f32>, legal: LegalMask) -> bool {
        match self.nodes.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(StateNode::new(prior, legal));
                true
            }
        }
    }

    /// Cached terminal flag for `key`, if computed.
    #[inline]
    pub fn cached_terminal(&self, key: &str) -> Option<bool> {
        self.terminal.get(key).copied()
    }

    pub fn cache_terminal(&mut self, key: String, terminal: bool) {
        self.terminal.insert(key, terminal);
    }

    /// Cached terminal reward for `key`, if computed.
    #[inline]
    pub fn cached_reward(&self, key: &str) -> Option<f32> {
        self.rewards.get(key).copied()
    }

    pub fn cache_reward(&mut self, key: String, reward: f32) {
        self.rewards.insert(key, reward);
    }

    /// Back up `value` through edge `(key, action)`. Returns false if `key`
    /// is not expanded.
    pub fn record(&mut self, key: &str, action: usize, value: f32) -> bool {
        match self.nodes.get_mut(key) {
            Some(node) => {
                node.record(action, value);
                true
            }
            None => false,
        }
    }

    /// `N(s)`, or 0 if unexpanded.
    pub fn state_visits(&self, key: &str) -> u32 {
        self.nodes.get(key).map_or(0, |n| n.visits)
    }

    /// `N(s,a)`, or 0 if the edge was never taken.
    pub fn edge_visits(&self, key: &str, action: usize) -> u32 {
        self.nodes
            .get(key)
            .and_then(|n| n.edges.get(&action))
            .map_or(0, |e| e.visits)
    }

    /// `Q(s,a)`, if the edge was taken.
    pub fn edge_q(&self, key: &str, action: usize) -> Option<f32> {
        self.nodes
            .get(key)
            .and_then(|n| n.edges.get(&action))
            .map(|e| e.q)
    }

    /// `P(s)`, if expanded.
    pub fn prior(&self, key: &str) -> Option<&[f32]> {
        self.nodes.get(key).map(|n| n.prior.as_slice())
    }

    /// `V(s)`, if expanded.
    pub fn legal(&self, key: &str) -> Option<&[bool]> {
        self.nodes.get(key).map(|n| n.legal.as_slice())
    }

    /// `N(s,a)` for every action; all zeros if unexpanded.
    pub fn edge_counts(&self, key: &str, num_actions: usize) -> Vec<u32> {
        self.nodes
            .get(key)
            .map_or_else(|| vec![0; num_actions], |n| n.visit_counts(num_actions))
    }

    /// Iterate over all expanded states.
    pub fn states(&self) -> impl Iterator<Item = (&str, &StateNode)> {
        self.nodes.iter().map(|(k, n)| (k.as_str(), n))
    }

    /// Number of expanded states.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get statistics about the tree.
    pub fn stats(&self) -> TreeStats {
        TreeStats {
            expanded_states: self.nodes.len(),
            edges: self.nodes.values().map(|n| n.edges.len()).sum(),
            cached_terminals: self.terminal.values().filter(|&&t| t).count(),
        }
    }
}

/// Statistics about the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub expanded_states: usize,
    pub edges: usize,
    pub cached_terminals: usize,
}
