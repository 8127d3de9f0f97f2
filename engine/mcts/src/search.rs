//! PUCT planner.
//!
//! Each simulation descends from a state to a leaf by the PUCT rule, expands
//! the leaf with one evaluator call, and backs the value up the path with a
//! sign flip per ply:
//! 1. Terminal states return their cached reward without touching any table
//! 2. Expanded states pick the best legal action and recurse into the child
//! 3. Unexpanded states are expanded and return the evaluator's value
//! 4. On the way back `N(s)` and the edge's running mean are updated
//!
//! Recursion depth is bounded by the length of a game.

use std::time::Instant;

use engine_core::GameState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::tree::SearchTree;

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("No visits recorded at the queried state; run the search first")]
    NoVisits,

    #[error("Invalid temperature {0}: must be finite and non-negative")]
    InvalidTemperature(f32),

    #[error("Invalid Dirichlet alpha {0}: must be positive")]
    InvalidDirichletAlpha(f32),

    #[error("Evaluator returned {actual} policy entries, expected {expected}")]
    PolicyLength { expected: usize, actual: usize },

    #[error("No legal moves available")]
    NoLegalMoves,
}

/// Counters accumulated over the planner's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Completed simulations from the root.
    pub simulations: u64,

    /// Evaluator calls made by expansions.
    pub evaluator_calls: u64,

    /// Simulations that ended on a terminal state.
    pub terminal_hits: u64,

    /// Wall time spent in root searches.
    pub elapsed_us: u64,
}

impl SearchStats {
    /// Average simulations per second, 0 if nothing was timed.
    pub fn simulations_per_sec(&self) -> f64 {
        if self.elapsed_us == 0 {
            0.0
        } else {
            self.simulations as f64 * 1_000_000.0 / self.elapsed_us as f64
        }
    }
}

/// MCTS planner anchored at the live game state.
///
/// Owns its statistics for the duration of one game; create a new planner
/// per game.
pub struct Planner<'a, S: GameState, E: Evaluator<S>> {
    tree: SearchTree,
    evaluator: &'a E,
    config: MctsConfig,
    root: S,
    rng: ChaCha20Rng,
    stats: SearchStats,
}

impl<'a, S: GameState, E: Evaluator<S>> Planner<'a, S, E> {
    /// Create a planner seeded from OS entropy.
    pub fn new(root: S, evaluator: &'a E, config: MctsConfig) -> Self {
        Self::with_rng(root, evaluator, config, ChaCha20Rng::from_entropy())
    }

    /// Create a deterministic planner.
    pub fn with_seed(root: S, evaluator: &'a E, config: MctsConfig, seed: u64) -> Self {
        Self::with_rng(root, evaluator, config, ChaCha20Rng::seed_from_u64(seed))
    }

    pub fn with_rng(root: S, evaluator: &'a E, config: MctsConfig, rng: ChaCha20Rng) -> Self {
        Self {
            tree: SearchTree::new(),
            evaluator,
            config,
            root,
            rng,
            stats: SearchStats::default(),
        }
    }

    /// Current root state.
    pub fn root(&self) -> &S {
        &self.root
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Run one simulation from `state`, returning its value for the player
    /// to move in `state`.
    pub fn search(&mut self, state: &S) -> Result<f32, SearchError> {
        let key = state.key();

        let terminal = match self.tree.cached_terminal(&key) {
            Some(terminal) => terminal,
            None => {
                let terminal = state.is_terminal();
                self.tree.cache_terminal(key.clone(), terminal);
                terminal
            }
        };

        if terminal {
            self.stats.terminal_hits += 1;
            let reward = match self.tree.cached_reward(&key) {
                Some(reward) => reward,
                None => {
                    let reward = state.reward();
                    self.tree.cache_reward(key, reward);
                    reward
                }
            };
            return Ok(reward);
        }

        let action = match self.tree.node(&key) {
            None => return self.expand(state),
            Some(node) => node
                .select_action(self.config.c_puct)
                .ok_or(SearchError::NoLegalMoves)?,
        };

        let child = state.apply(action);
        let value = -self.search(&child)?;
        let recorded = self.tree.record(&key, action, value);
        debug_assert!(recorded, "backed up through unexpanded state {key}");

        Ok(value)
    }

    /// Evaluate `state` and store its masked, normalized prior and legal mask
    /// with `N(s) = 0`. Returns the evaluator's value unchanged.
    ///
    /// An already expanded state keeps its stored prior, so noise mixed in
    /// by [`Planner::add_noise`] survives; only the value is returned.
    pub fn expand(&mut self, state: &S) -> Result<f32, SearchError> {
        let legal = state.legal_moves();
        let eval = self.evaluator.evaluate(state)?;
        self.stats.evaluator_calls += 1;

        if eval.policy.len() != S::NUM_ACTIONS {
            return Err(SearchError::PolicyLength {
                expected: S::NUM_ACTIONS,
                actual: eval.policy.len(),
            });
        }

        let mut prior: Vec<f32> = eval
            .policy
            .iter()
            .zip(&legal)
            .map(|(&p, &l)| if l { p } else { 0.0 })
            .collect();
        let sum: f32 = prior.iter().sum();

        if sum > 0.0 {
            for p in &mut prior {
                *p /= sum;
            }
        } else {
            let num_legal = legal.iter().filter(|&&l| l).count();
            if num_legal == 0 {
                return Err(SearchError::NoLegalMoves);
            }
            warn!(
                key = %state.key(),
                num_legal,
                "Evaluator gave no mass to legal moves, using uniform prior"
            );
            let uniform = 1.0 / num_legal as f32;
            for (p, &l) in prior.iter_mut().zip(&legal) {
                *p = if l { uniform } else { 0.0 };
            }
        }

        if !self.tree.insert_expanded(state.key(), prior, legal) {
            debug!(key = %state.key(), "State already expanded, keeping stored prior");
        }
        Ok(eval.value)
    }

    /// Move distribution at `state` from edge visit counts.
    ///
    /// `tau == 0` returns a one-hot vector on a most-visited action, ties
    /// broken at random. `tau > 0` returns counts raised to `1 / tau`,
    /// normalized.
    pub fn get_pi(&mut self, state: &S, tau: f32) -> Result<Vec<f32>, SearchError> {
        if !tau.is_finite() || tau < 0.0 {
            return Err(SearchError::InvalidTemperature(tau));
        }

        let counts = self.tree.edge_counts(&state.key(), S::NUM_ACTIONS);
        let max = counts.iter().copied().max().unwrap_or(0);
        if max == 0 {
            return Err(SearchError::NoVisits);
        }

        if tau == 0.0 {
            let best: Vec<usize> = counts
                .iter()
                .enumerate()
                .filter_map(|(a, &c)| (c == max).then_some(a))
                .collect();
            let pick = best[self.rng.gen_range(0..best.len())];
            let mut pi = vec![0.0; S::NUM_ACTIONS];
            pi[pick] = 1.0;
            return Ok(pi);
        }

        // Scale by the max count first so small tau cannot overflow
        let exponent = 1.0 / tau as f64;
        let weights: Vec<f64> = counts
            .iter()
            .map(|&c| (c as f64 / max as f64).powf(exponent))
            .collect();
        let total: f64 = weights.iter().sum();

        Ok(weights.iter().map(|&w| (w / total) as f32).collect())
    }

    /// Advance the root by `action` and refresh exploration noise at the new
    /// root. A terminal new root gets no noise.
    pub fn progress(&mut self, action: usize) -> Result<(), SearchError> {
        self.root = self.root.apply(action);

        if self.root.is_terminal() {
            debug!(action, "Root advanced to a terminal state");
            return Ok(());
        }

        let root = self.root.clone();
        self.add_noise(&root, self.config.noise_level)
    }

    /// Mix Dirichlet noise into the prior of `state`, expanding it first if
    /// needed: `P = level * Dir(alpha) + (1 - level) * P`.
    ///
    /// The noise covers the whole action space and is not re-masked, so
    /// illegal actions may end up with prior mass. Selection never reads
    /// them.
    pub fn add_noise(&mut self, state: &S, noise_level: f32) -> Result<(), SearchError> {
        let key = state.key();
        if !self.tree.is_expanded(&key) {
            warn!(key = %key, "Adding noise to an unexpanded state, expanding first");
            self.expand(state)?;
        }

        if noise_level <= 0.0 {
            return Ok(());
        }

        let noise = dirichlet_noise(S::NUM_ACTIONS, self.config.dirichlet_alpha, &mut self.rng)?;
        if let Some(node) = self.tree.node_mut(&key) {
            for (p, n) in node.prior.iter_mut().zip(noise) {
                *p = noise_level * n + (1.0 - noise_level) * *p;
            }
        }

        Ok(())
    }

    /// Run `count` simulations from the root.
    ///
    /// An unexpanded root is expanded first; that expansion does not count
    /// as a simulation.
    pub fn search_from_root(&mut self, count: u32) -> Result<(), SearchError> {
        let start = Instant::now();
        let root = self.prepare_root()?;

        for _ in 0..count {
            self.simulate(&root)?;
        }

        self.stats.elapsed_us += start.elapsed().as_micros() as u64;
        Ok(())
    }

    /// Run simulations from the root until `deadline`. Returns the number
    /// of simulations completed.
    pub fn search_until(&mut self, deadline: Instant) -> Result<u32, SearchError> {
        let start = Instant::now();
        let root = self.prepare_root()?;

        let mut done = 0;
        while Instant::now() < deadline {
            self.simulate(&root)?;
            done += 1;
        }

        self.stats.elapsed_us += start.elapsed().as_micros() as u64;
        Ok(done)
    }

    /// `get_pi` at the root plus a move sampled from it.
    pub fn pi_and_move(&mut self, tau: f32) -> Result<(Vec<f32>, usize), SearchError> {
        let root = self.root.clone();
        let pi = self.get_pi(&root, tau)?;
        let action = sample_action(&pi, &mut self.rng)?;
        Ok((pi, action))
    }

    fn prepare_root(&mut self) -> Result<S, SearchError> {
        let root = self.root.clone();
        if !root.is_terminal() && !self.tree.is_expanded(&root.key()) {
            self.expand(&root)?;
        }
        Ok(root)
    }

    fn simulate(&mut self, root: &S) -> Result<(), SearchError> {
        let value = self.search(root)?;
        self.stats.simulations += 1;

        trace!(
            simulation = self.stats.simulations,
            value,
            tree_size = self.tree.len(),
            "MCTS simulation complete"
        );

        Ok(())
    }
}

/// Sample an action from a probability distribution.
pub fn sample_action<R: Rng + ?Sized>(policy: &[f32], rng: &mut R) -> Result<usize, SearchError> {
    let r: f32 = rng.gen();
    let mut cumsum = 0.0;

    for (i, &p) in policy.iter().enumerate() {
        cumsum += p;
        if r < cumsum {
            return Ok(i);
        }
    }

    // Fallback to last non-zero action (handles floating point issues)
    for (i, &p) in policy.iter().enumerate().rev() {
        if p > 0.0 {
            return Ok(i);
        }
    }

    Err(SearchError::NoLegalMoves)
}

/// Generate Dirichlet-distributed noise using Gamma variates.
pub fn dirichlet_noise<R: Rng + ?Sized>(
    n: usize,
    alpha: f32,
    rng: &mut R,
) -> Result<Vec<f32>, SearchError> {
    use rand_distr::{Distribution, Gamma};

    let gamma =
        Gamma::new(alpha as f64, 1.0).map_err(|_| SearchError::InvalidDirichletAlpha(alpha))?;
    let mut samples: Vec<f32> = (0..n).map(|_| gamma.sample(rng) as f32).collect();

    // Normalize
    let sum: f32 = samples.iter().sum();
    if sum > 0.0 {
        for s in &mut samples {
            *s /= sum;
        }
    }

    Ok(samples)
}
