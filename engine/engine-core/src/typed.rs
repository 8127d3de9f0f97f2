//! Typed game-state contract consumed by the search.
//!
//! A [`GameState`] is an immutable position: applying an action produces a
//! new state and never mutates the old one. The search treats actions as
//! plain indices into a fixed-size action space and never interprets them.

use crate::board_game::Observation;
use crate::metadata::GameMetadata;

/// Legal-move mask, one entry per action index.
pub type LegalMask = Vec<bool>;

/// A single position of a two-player, perfect-information game.
///
/// # Perspective
///
/// Every scalar that crosses this trait is reported from the point of view of
/// the player **to move** in the state it was computed on. In particular
/// [`reward`](GameState::reward) on a position where the previous mover has
/// just won returns `-1.0`.
///
/// # Example
///
/// ```rust
/// # use engine_core::{GameState, GameMetadata, LegalMask, Observation};
/// #[derive(Debug, Clone)]
/// struct Countdown(u8);
///
/// impl GameState for Countdown {
///     const NUM_ACTIONS: usize = 1;
///
///     fn apply(&self, _action: usize) -> Self { Countdown(self.0.saturating_sub(1)) }
///     fn is_terminal(&self) -> bool { self.0 == 0 }
///     fn reward(&self) -> f32 { if self.is_terminal() { -1.0 } else { 0.0 } }
///     fn legal_moves(&self) -> LegalMask { vec![!self.is_terminal()] }
///     fn key(&self) -> String { self.0.to_string() }
///     fn encode(&self) -> Observation { Observation::zeros(1, 1, 1) }
///     fn symmetries(obs: &Observation, policy: &[f32]) -> Vec<(Observation, Vec<f32>)> {
///         vec![(obs.clone(), policy.to_vec())]
///     }
///     fn metadata() -> GameMetadata { GameMetadata::new("countdown", "Countdown") }
/// }
///
/// let s = Countdown(1).apply(0);
/// assert!(s.is_terminal());
/// ```
pub trait GameState: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Size of the (fixed) action space.
    const NUM_ACTIONS: usize;

    /// Return the state reached by playing `action` from this state.
    fn apply(&self, action: usize) -> Self;

    /// Whether the game is over.
    fn is_terminal(&self) -> bool;

    /// Terminal reward for the player to move. Only meaningful when
    /// [`is_terminal`](GameState::is_terminal) is true; 0.0 otherwise.
    fn reward(&self) -> f32;

    /// Legal-move mask of length [`NUM_ACTIONS`](GameState::NUM_ACTIONS).
    fn legal_moves(&self) -> LegalMask;

    /// Canonical string key. Two states with the same key are the same
    /// position with the same player to move.
    fn key(&self) -> String;

    /// Network input encoding.
    fn encode(&self) -> Observation;

    /// All `(input, policy)` pairs under the game's symmetry group.
    fn symmetries(obs: &Observation, policy: &[f32]) -> Vec<(Observation, Vec<f32>)>;

    /// Static description of the game.
    fn metadata() -> GameMetadata;

    /// Indices of the legal actions, in ascending order.
    fn legal_actions(&self) -> Vec<usize> {
        self.legal_moves()
            .iter()
            .enumerate()
            .filter_map(|(a, &legal)| legal.then_some(a))
            .collect()
    }
}
