//! Shared utilities for two-player game implementations
//!
//! Player numbering follows the board encoding: 1 moves first, 2 moves
//! second. Winner codes are 0=ongoing, 1=player1, 2=player2, 3=draw.

/// Winner code for a drawn game.
pub const DRAW: u8 = 3;

/// The other player.
#[inline]
pub fn opponent(player: u8) -> u8 {
    if player == 1 {
        2
    } else {
        1
    }
}

/// Calculate reward for a two-player zero-sum game.
///
/// # Arguments
/// * `winner` - Winner indicator: 0=ongoing, 1=player1 wins, 2=player2 wins, 3=draw
/// * `perspective` - The player the reward is reported for (1 or 2)
///
/// # Returns
/// * `1.0` if `perspective` won
/// * `-1.0` if `perspective` lost
/// * `0.0` for draws or ongoing games
///
/// # Example
/// ```
/// use engine_core::game_utils::calculate_reward;
///
/// // Player 1 wins, viewed from player 1's perspective
/// assert_eq!(calculate_reward(1, 1), 1.0);
///
/// // Player 1 wins, viewed from player 2's perspective
/// assert_eq!(calculate_reward(1, 2), -1.0);
///
/// // Draw
/// assert_eq!(calculate_reward(3, 1), 0.0);
/// ```
#[inline]
pub fn calculate_reward(winner: u8, perspective: u8) -> f32 {
    match winner {
        1 | 2 if winner == perspective => 1.0,
        1 | 2 => -1.0,
        _ => 0.0,
    }
}
