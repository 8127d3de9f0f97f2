//! Evaluator trait for position evaluation.
//!
//! The evaluator provides a policy (action probabilities) and a value
//! estimate for a game state. In AlphaZero this is a neural network; the
//! planner only relies on the contract below, so any predictor can be
//! substituted. For testing and for running without a model, a uniform
//! evaluator is provided.

use engine_core::GameState;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),
}

/// Result of evaluating a game state.
#[derive(Debug, Clone)]
pub struct EvalResult {
    /// Unnormalized action weights, one per action index. Need not be masked
    /// to legal moves; the planner masks and renormalizes at expansion.
    pub policy: Vec<f32>,

    /// Value estimate for the player to move.
    /// Range: -1.0 (certain loss) to +1.0 (certain win).
    pub value: f32,
}

/// Trait for position evaluators.
///
/// Implementations could be:
/// - UniformEvaluator: Returns uniform policy (for testing)
/// - A neural network wrapper for training/play
pub trait Evaluator<S: GameState>: Send + Sync {
    /// Evaluate a single game state.
    fn evaluate(&self, state: &S) -> Result<EvalResult, EvaluatorError>;

    /// Batch evaluate multiple states (optional optimization).
    /// Default implementation calls evaluate() in a loop.
    fn evaluate_batch(&self, states: &[&S]) -> Result<Vec<EvalResult>, EvaluatorError> {
        states.iter().map(|state| self.evaluate(state)).collect()
    }
}

/// Uniform evaluator that assigns equal probability to all legal moves.
/// Value is always 0.0 (neutral). Useful for testing MCTS without a model.
#[derive(Debug, Clone, Default)]
pub struct UniformEvaluator;

impl UniformEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl<S: GameState> Evaluator<S> for UniformEvaluator {
    fn evaluate(&self, state: &S) -> Result<EvalResult, EvaluatorError> {
        let legal = state.legal_moves();
        let num_legal = legal.iter().filter(|&&l| l).count();

        if num_legal == 0 {
            // Terminal state
            return Ok(EvalResult {
                policy: vec![0.0; S::NUM_ACTIONS],
                value: 0.0,
            });
        }

        let prob = 1.0 / num_legal as f32;
        let policy = legal
            .iter()
            .map(|&l| if l { prob } else { 0.0 })
            .collect();

        Ok(EvalResult { policy, value: 0.0 })
    }
}
