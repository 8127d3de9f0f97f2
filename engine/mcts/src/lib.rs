//! Monte Carlo Tree Search (MCTS) with the PUCT selection rule for
//! AlphaZero-style self-play.
//!
//! The planner is generic over any game implementing
//! [`engine_core::GameState`] and any policy-value predictor implementing
//! [`Evaluator`].
//!
//! # Overview
//!
//! Statistics are stored per canonical state key rather than per tree node,
//! so transpositions share their visit counts and values:
//!
//! - `N(s)`: simulations through state `s`
//! - `N(s,a)`, `Q(s,a)`: visit count and running mean value of each edge
//! - `P(s)`, `V(s)`: masked prior and legal mask cached at expansion
//! - `E(s)`, `R(s)`: memoized terminal flag and reward
//!
//! Each simulation consists of four phases:
//!
//! 1. **Selection**: descend using `Q + c_puct * P * sqrt(N) / (1 + N(s,a))`
//! 2. **Expansion**: the first visit of a state queries the evaluator once
//! 3. **Evaluation**: the evaluator's value, or the cached terminal reward
//! 4. **Backpropagation**: negate per ply and fold into the edge means
//!
//! # Usage
//!
//! ```rust
//! use mcts::{MctsConfig, Planner, UniformEvaluator};
//! use games_gomoku::Gomoku;
//!
//! let evaluator = UniformEvaluator::new();
//! let config = MctsConfig::for_testing();
//! let mut planner = Planner::with_seed(Gomoku::new(), &evaluator, config, 42);
//!
//! planner.search_from_root(32).unwrap();
//! let (pi, action) = planner.pi_and_move(1.0).unwrap();
//! assert!(pi[action] > 0.0);
//!
//! // Advance the root; fresh exploration noise is mixed into its prior
//! planner.progress(action).unwrap();
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `num_simulations`: Number of simulations per move (default: 200)
//! - `c_puct`: Exploration constant for PUCT (default: 1.0)
//! - `noise_level`: Root noise mixing weight on every advance (default: 0.3)
//! - `temp_threshold`: Plies sampled at temperature 1 before going greedy (default: 6)

pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;
pub mod tree;

#[cfg(test)]
mod testing;

// Re-export main types
pub use config::MctsConfig;
pub use evaluator::{EvalResult, Evaluator, EvaluatorError, UniformEvaluator};
pub use node::{EdgeStats, StateNode};
pub use search::{dirichlet_noise, sample_action, Planner, SearchError, SearchStats};
pub use tree::{SearchTree, TreeStats};
