//! Network input planes for two-player board games.
//!
//! An [`Observation`] is a dense `channels x height x width` tensor stored in
//! channel-major order. Two-player board games encode themselves as
//! "stones of the player to move", "stones of the opponent" and a constant
//! colour plane, which is what [`Observation::from_two_player_board`] builds.

use serde::{Deserialize, Serialize};

/// Dense channel-major planes fed to the policy-value predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
    pub data: Vec<f32>,
}

impl Observation {
    /// All-zero observation of the given shape.
    pub fn zeros(channels: usize, height: usize, width: usize) -> Self {
        Self {
            channels,
            height,
            width,
            data: vec![0.0; channels * height * width],
        }
    }

    /// Encode a two-player board as three planes.
    ///
    /// - `board`: row-major cells (0=empty, 1=player1, 2=player2)
    /// - `current_player`: player to move (1 or 2)
    ///
    /// Plane 0 holds the mover's stones, plane 1 the opponent's, plane 2 is
    /// all ones when player 1 is to move and all zeros otherwise.
    pub fn from_two_player_board(
        board: &[u8],
        height: usize,
        width: usize,
        current_player: u8,
    ) -> Self {
        let mut obs = Self::zeros(3, height, width);
        let plane = height * width;
        let opponent = if current_player == 1 { 2 } else { 1 };

        for (i, &cell) in board.iter().enumerate().take(plane) {
            if cell == current_player {
                obs.data[i] = 1.0;
            } else if cell == opponent {
                obs.data[plane + i] = 1.0;
            }
        }

        if current_player == 1 {
            obs.data[2 * plane..].fill(1.0);
        }

        obs
    }

    /// Shape as `[channels, height, width]`.
    pub fn shape(&self) -> [usize; 3] {
        [self.channels, self.height, self.width]
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn index(&self, channel: usize, row: usize, col: usize) -> usize {
        (channel * self.height + row) * self.width + col
    }

    /// Value at `(channel, row, col)`.
    #[inline]
    pub fn get(&self, channel: usize, row: usize, col: usize) -> f32 {
        self.data[self.index(channel, row, col)]
    }

    /// Set the value at `(channel, row, col)`.
    #[inline]
    pub fn set(&mut self, channel: usize, row: usize, col: usize, value: f32) {
        let i = self.index(channel, row, col);
        self.data[i] = value;
    }
}
