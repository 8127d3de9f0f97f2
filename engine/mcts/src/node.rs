//! Per-state and per-edge search statistics.
//!
//! A [`StateNode`] is created the first time a state is expanded and holds
//! the state's visit count `N(s)`, its masked prior `P(s)` and its legal
//! mask `V(s)`. Edge statistics `N(s,a)` and `Q(s,a)` live in the node and
//! are created on the first traversal of the edge.

use std::collections::HashMap;

use engine_core::LegalMask;

/// Visit count and running mean value of one `(state, action)` edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeStats {
    /// Number of simulations that took this edge.
    pub visits: u32,

    /// Mean of the values backed up through this edge, from the point of view
    /// of the player choosing the action.
    pub q: f32,
}

impl EdgeStats {
    /// Fold one backed-up value into the running mean.
    ///
    /// The mean uses the pre-increment count, then the count is incremented.
    #[inline]
    pub fn update(&mut self, value: f32) {
        let n = self.visits as f32;
        self.q = (n * self.q + value) / (n + 1.0);
        self.visits += 1;
    }
}

/// Statistics of an expanded state.
#[derive(Debug, Clone)]
pub struct StateNode {
    /// Simulations that passed through this state.
    pub visits: u32,

    /// Prior over the full action space, masked and normalized at expansion.
    /// Only root noise mutates it afterwards.
    pub prior: Vec<f32>,

    /// Legal moves cached at expansion time.
    pub legal: LegalMask,

    /// Edge statistics for actions taken at least once.
    pub edges: HashMap<usize, EdgeStats>,
}

impl StateNode {
    pub fn new(prior: Vec<f32>, legal: LegalMask) -> Self {
        Self {
            visits: 0,
            prior,
            legal,
            edges: HashMap::new(),
        }
    }

    /// PUCT score of `action`.
    ///
    /// Visited edges: `Q + c * P * sqrt(N) / (1 + N(s,a))`.
    /// Unvisited edges: `c * P * sqrt(N + 1e-7)`, which keeps unvisited
    /// scores ordered by prior even before the state's first visit.
    #[inline]
    pub fn puct_score(&self, action: usize, c_puct: f32) -> f32 {
        let prior = self.prior[action];
        match self.edges.get(&action) {
            Some(edge) => {
                edge.q + c_puct * prior * (self.visits as f32).sqrt() / (1.0 + edge.visits as f32)
            }
            None => c_puct * prior * (self.visits as f32 + UNVISITED_EPS).sqrt(),
        }
    }

    /// Legal action with the strictly highest PUCT score, first in index
    /// order on ties. `None` if no action is legal.
    pub fn select_action(&self, c_puct: f32) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;

        for action in (0..self.legal.len()).filter(|&a| self.legal[a]) {
            let score = self.puct_score(action, c_puct);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                // A NaN score never replaces a candidate but still lets the
                // first legal action be picked.
                Some((_, _)) if score.is_nan() => {}
                _ => best = Some((action, score)),
            }
        }

        best.map(|(action, _)| action)
    }

    /// Record one backed-up value through `action`.
    pub fn record(&mut self, action: usize, value: f32) {
        self.visits += 1;
        self.edges.entry(action).or_default().update(value);
    }

    /// Visit count per action over an action space of `num_actions`.
    pub fn visit_counts(&self, num_actions: usize) -> Vec<u32> {
        let mut counts = vec![0; num_actions];
        for (&action, edge) in &self.edges {
            if action < num_actions {
                counts[action] = edge.visits;
            }
        }
        counts
    }
}

const UNVISITED_EPS: f32 = 1e-7;
