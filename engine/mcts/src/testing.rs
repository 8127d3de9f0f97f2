//! Toy games and evaluators shared by the unit tests.

use engine_core::{GameMetadata, GameState, LegalMask, Observation};

use crate::evaluator::{EvalResult, Evaluator, EvaluatorError};

/// Take-away game: remove one or two stones, taking the last stone wins.
///
/// Action 0 takes one stone, action 1 takes two. Piles that are a multiple
/// of three are lost for the player to move.
#[derive(Debug, Clone, PartialEq)]
pub struct Nim {
    pub pile: u8,
    pub player: u8,
}

impl Nim {
    pub fn new(pile: u8) -> Self {
        Self { pile, player: 1 }
    }
}

impl GameState for Nim {
    const NUM_ACTIONS: usize = 2;

    fn apply(&self, action: usize) -> Self {
        Self {
            pile: self.pile.saturating_sub(action as u8 + 1),
            player: 3 - self.player,
        }
    }

    fn is_terminal(&self) -> bool {
        self.pile == 0
    }

    fn reward(&self) -> f32 {
        if self.is_terminal() {
            -1.0
        } else {
            0.0
        }
    }

    fn legal_moves(&self) -> LegalMask {
        vec![self.pile >= 1, self.pile >= 2]
    }

    fn key(&self) -> String {
        format!("{}:{}", self.pile, self.player)
    }

    fn encode(&self) -> Observation {
        let mut obs = Observation::zeros(1, 1, 1);
        obs.data[0] = self.pile as f32;
        obs
    }

    fn symmetries(obs: &Observation, policy: &[f32]) -> Vec<(Observation, Vec<f32>)> {
        vec![(obs.clone(), policy.to_vec())]
    }

    fn metadata() -> GameMetadata {
        GameMetadata::new("nim", "Nim").with_actions(2)
    }
}

/// Three actions of which only action 1 is legal; playing it ends the game
/// with a win for the player who played it.
#[derive(Debug, Clone, PartialEq)]
pub struct OneMoveWin {
    pub done: bool,
}

impl GameState for OneMoveWin {
    const NUM_ACTIONS: usize = 3;

    fn apply(&self, _action: usize) -> Self {
        Self { done: true }
    }

    fn is_terminal(&self) -> bool {
        self.done
    }

    fn reward(&self) -> f32 {
        if self.done {
            -1.0
        } else {
            0.0
        }
    }

    fn legal_moves(&self) -> LegalMask {
        vec![false, !self.done, false]
    }

    fn key(&self) -> String {
        if self.done { "won" } else { "start" }.to_string()
    }

    fn encode(&self) -> Observation {
        Observation::zeros(1, 1, 3)
    }

    fn symmetries(obs: &Observation, policy: &[f32]) -> Vec<(Observation, Vec<f32>)> {
        vec![(obs.clone(), policy.to_vec())]
    }

    fn metadata() -> GameMetadata {
        GameMetadata::new("one-move-win", "One Move Win").with_actions(3)
    }
}

/// Puts all of its mass on illegal actions.
#[derive(Debug, Default)]
pub struct IllegalMassEvaluator;

impl<S: GameState> Evaluator<S> for IllegalMassEvaluator {
    fn evaluate(&self, state: &S) -> Result<EvalResult, EvaluatorError> {
        let policy = state
            .legal_moves()
            .iter()
            .map(|&l| if l { 0.0 } else { 1.0 })
            .collect();
        Ok(EvalResult { policy, value: 0.0 })
    }
}

/// Returns the same unnormalized weight for every action and a fixed value.
#[derive(Debug)]
pub struct ConstantEvaluator {
    pub weight: f32,
    pub value: f32,
}

impl<S: GameState> Evaluator<S> for ConstantEvaluator {
    fn evaluate(&self, _state: &S) -> Result<EvalResult, EvaluatorError> {
        Ok(EvalResult {
            policy: vec![self.weight; S::NUM_ACTIONS],
            value: self.value,
        })
    }
}

/// Returns a policy of the wrong length.
#[derive(Debug, Default)]
pub struct ShortPolicyEvaluator;

impl<S: GameState> Evaluator<S> for ShortPolicyEvaluator {
    fn evaluate(&self, _state: &S) -> Result<EvalResult, EvaluatorError> {
        Ok(EvalResult {
            policy: vec![1.0],
            value: 0.0,
        })
    }
}

/// Always fails, as a predictor backend that is down would.
#[derive(Debug, Default)]
pub struct FailingEvaluator;

impl<S: GameState> Evaluator<S> for FailingEvaluator {
    fn evaluate(&self, _state: &S) -> Result<EvalResult, EvaluatorError> {
        Err(EvaluatorError::EvaluationFailed("backend unavailable".into()))
    }
}
