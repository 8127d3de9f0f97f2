//! Self-play episode generation.
//!
//! One episode drives a fresh [`Planner`] from the initial position to the
//! end of the game. After each search the move distribution at the root is
//! recorded under every board symmetry, a move is sampled from it, and the
//! root advances. When the game ends each recorded move is labelled with the
//! final outcome from the point of view of the player who made it.

use std::fmt;

use engine_core::{GameState, Observation};
use mcts::{Evaluator, MctsConfig, Planner, SearchError, SearchStats};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Errors that abort an episode.
#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("Search failed at ply {ply}: {source}")]
    Search {
        ply: usize,
        #[source]
        source: SearchError,
    },

    #[error("Episode exceeded {limit} plies without terminating")]
    TooLong { limit: usize },
}

/// One labelled training tuple.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    /// Network input (one symmetry variant).
    pub input: Observation,
    /// Move distribution target, transformed with the same symmetry.
    pub policy: Vec<f32>,
    /// Final outcome for the player to move in `input`.
    pub value: f32,
}

/// A finished self-play game.
#[derive(Debug, Clone)]
pub struct Episode {
    /// Training examples in play order, one symmetry group per move.
    pub examples: Vec<TrainingExample>,
    /// Actions played, in order.
    pub moves: Vec<usize>,
    /// Reward at the terminal state for the player to move there.
    pub final_reward: f32,
    /// Number of moves played.
    pub plies: usize,
    /// Moves that were played without any recorded visit.
    pub zero_visit_moves: u32,
    /// Planner counters for the whole game.
    pub stats: SearchStats,
}

impl Episode {
    /// Outcome for the player who made the last move: 1 win, 0 draw.
    pub fn last_mover_reward(&self) -> f32 {
        -self.final_reward
    }

    /// Which side won, from the reward and the parity of the last move.
    pub fn outcome(&self) -> Outcome {
        let reward = self.last_mover_reward();
        if reward == 0.0 {
            return Outcome::Draw;
        }
        // Odd ply counts mean the first player moved last
        let first_moved_last = self.plies % 2 == 1;
        if (reward > 0.0) == first_moved_last {
            Outcome::FirstPlayerWin
        } else {
            Outcome::SecondPlayerWin
        }
    }
}

/// Result of a finished two-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    FirstPlayerWin,
    SecondPlayerWin,
    Draw,
}

impl Outcome {
    /// Index of the winning player (0 moves first), `None` for a draw.
    pub fn winner_index(self) -> Option<usize> {
        match self {
            Outcome::FirstPlayerWin => Some(0),
            Outcome::SecondPlayerWin => Some(1),
            Outcome::Draw => None,
        }
    }
}

/// Play one game from `initial` with `evaluator` and return the labelled
/// examples.
pub fn generate_episode<S, E>(
    initial: S,
    evaluator: &E,
    config: &MctsConfig,
    rng_seed: u64,
) -> Result<Episode, EpisodeError>
where
    S: GameState + fmt::Display,
    E: Evaluator<S>,
{
    let mut planner = Planner::with_seed(initial, evaluator, config.clone(), rng_seed);
    let mut groups: Vec<Vec<(Observation, Vec<f32>)>> = Vec::new();
    let mut moves = Vec::new();
    let mut zero_visit_moves = 0;

    while !planner.root().is_terminal() {
        let ply = moves.len();
        if ply >= S::NUM_ACTIONS {
            return Err(EpisodeError::TooLong {
                limit: S::NUM_ACTIONS,
            });
        }
        let search_err = |source| EpisodeError::Search { ply, source };

        planner
            .search_from_root(config.num_simulations)
            .map_err(search_err)?;

        let tau = config.temperature_for_ply(ply as u32);
        let (pi, action) = planner.pi_and_move(tau).map_err(search_err)?;

        let root_key = planner.root().key();
        if planner.tree().edge_visits(&root_key, action) == 0 {
            warn!(
                ply,
                action,
                counts = ?planner.tree().edge_counts(&root_key, S::NUM_ACTIONS),
                "Selected a move with zero visits"
            );
            zero_visit_moves += 1;
        }

        let obs = planner.root().encode();
        groups.push(S::symmetries(&obs, &pi));

        debug!(ply, action, tau, prob = pi[action], "Move selected");
        planner.progress(action).map_err(search_err)?;
        moves.push(action);
        trace!(ply, board = %planner.root(), "Board after move");
    }

    let final_reward = planner.root().reward();
    debug!(
        plies = moves.len(),
        final_reward,
        last_move = ?moves.last(),
        board = %planner.root(),
        "Episode ended"
    );
    let examples = label_examples(groups, final_reward);

    Ok(Episode {
        examples,
        plies: moves.len(),
        moves,
        final_reward,
        zero_visit_moves,
        stats: planner.stats(),
    })
}

/// Attach value labels walking backwards from the last move.
///
/// The last mover gets `-final_reward`; the sign flips once per earlier ply.
/// Output is in play order.
fn label_examples(
    groups: Vec<Vec<(Observation, Vec<f32>)>>,
    final_reward: f32,
) -> Vec<TrainingExample> {
    let mut values = vec![0.0; groups.len()];
    let mut r = -final_reward;
    for value in values.iter_mut().rev() {
        *value = r;
        r = -r;
    }

    groups
        .into_iter()
        .zip(values)
        .flat_map(|(group, value)| {
            group
                .into_iter()
                .map(move |(input, policy)| TrainingExample {
                    input,
                    policy,
                    value,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_gomoku::Gomoku;
    use mcts::UniformEvaluator;

    fn fast_config() -> MctsConfig {
        MctsConfig::for_testing().with_simulations(8)
    }

    fn group(n: usize) -> Vec<(Observation, Vec<f32>)> {
        (0..n)
            .map(|_| (Observation::zeros(1, 1, 1), vec![1.0]))
            .collect()
    }

    #[test]
    fn test_labels_alternate_from_last_mover() {
        // Terminal reward -1: the last mover won
        let examples = label_examples(vec![group(2), group(2), group(2)], -1.0);
        let values: Vec<f32> = examples.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_labels_for_draw_are_zero() {
        let examples = label_examples(vec![group(1), group(1)], 0.0);
        assert!(examples.iter().all(|e| e.value == 0.0));
    }

    #[test]
    fn test_gomoku_episode_shape() {
        let evaluator = UniformEvaluator::new();
        let episode = generate_episode(Gomoku::new(), &evaluator, &fast_config(), 7).unwrap();

        assert!(episode.plies >= 9, "a five needs at least nine plies");
        assert_eq!(episode.moves.len(), episode.plies);
        assert_eq!(episode.examples.len(), 8 * episode.plies);
        assert!(episode.stats.simulations >= 8 * episode.plies as u64);

        // Replaying the moves reaches the same terminal state
        let end = episode
            .moves
            .iter()
            .fold(Gomoku::new(), |s, &a| s.apply(a));
        assert!(end.is_terminal());
        assert_eq!(end.reward(), episode.final_reward);
    }

    #[test]
    fn test_gomoku_episode_labels_alternate() {
        let evaluator = UniformEvaluator::new();
        let episode = generate_episode(Gomoku::new(), &evaluator, &fast_config(), 11).unwrap();

        let per_move: Vec<f32> = episode.examples.chunks(8).map(|g| g[0].value).collect();
        for g in episode.examples.chunks(8) {
            assert!(g.iter().all(|e| e.value == g[0].value));
        }

        assert_eq!(*per_move.last().unwrap(), episode.last_mover_reward());
        if episode.final_reward != 0.0 {
            for pair in per_move.windows(2) {
                assert_eq!(pair[0], -pair[1]);
            }
        }
    }

    #[test]
    fn test_policies_are_distributions() {
        let evaluator = UniformEvaluator::new();
        let episode = generate_episode(Gomoku::new(), &evaluator, &fast_config(), 3).unwrap();

        for example in &episode.examples {
            assert_eq!(example.policy.len(), 225);
            let sum: f32 = example.policy.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4);
            assert_eq!(example.input.shape(), [3, 15, 15]);
        }
    }

    #[test]
    fn test_greedy_after_threshold() {
        let evaluator = UniformEvaluator::new();
        let config = fast_config().with_temp_threshold(0);
        let episode = generate_episode(Gomoku::new(), &evaluator, &config, 5).unwrap();

        // Identity variants are one-hot once play is greedy
        for g in episode.examples.chunks(8) {
            let hot = g[0].policy.iter().filter(|&&p| p == 1.0).count();
            assert_eq!(hot, 1);
        }
    }

    #[test]
    fn test_outcome_matches_replayed_winner() {
        let evaluator = UniformEvaluator::new();
        let episode = generate_episode(Gomoku::new(), &evaluator, &fast_config(), 21).unwrap();

        let end = episode
            .moves
            .iter()
            .fold(Gomoku::new(), |s, &a| s.apply(a));
        let expected = match end.winner() {
            1 => Outcome::FirstPlayerWin,
            2 => Outcome::SecondPlayerWin,
            _ => Outcome::Draw,
        };
        assert_eq!(episode.outcome(), expected);
    }

    #[test]
    fn test_outcome_from_reward_and_parity() {
        let mut episode = Episode {
            examples: Vec::new(),
            moves: Vec::new(),
            final_reward: -1.0,
            plies: 9,
            zero_visit_moves: 0,
            stats: SearchStats::default(),
        };
        assert_eq!(episode.outcome(), Outcome::FirstPlayerWin);
        assert_eq!(episode.outcome().winner_index(), Some(0));

        episode.plies = 10;
        assert_eq!(episode.outcome(), Outcome::SecondPlayerWin);

        episode.final_reward = 0.0;
        assert_eq!(episode.outcome(), Outcome::Draw);
        assert_eq!(episode.outcome().winner_index(), None);
    }

    #[test]
    fn test_same_seed_same_episode() {
        let evaluator = UniformEvaluator::new();
        let a = generate_episode(Gomoku::new(), &evaluator, &fast_config(), 99).unwrap();
        let b = generate_episode(Gomoku::new(), &evaluator, &fast_config(), 99).unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.final_reward, b.final_reward);
    }

    #[test]
    fn test_terminal_start_yields_empty_episode() {
        let evaluator = UniformEvaluator::new();
        let finished = [0, 15, 1, 16, 2, 17, 3, 18, 4]
            .iter()
            .fold(Gomoku::new(), |s, &a| s.apply(a));
        assert!(finished.is_terminal());

        let episode = generate_episode(finished, &evaluator, &fast_config(), 0).unwrap();
        assert_eq!(episode.plies, 0);
        assert!(episode.examples.is_empty());
        assert_eq!(episode.final_reward, -1.0);
    }
}
