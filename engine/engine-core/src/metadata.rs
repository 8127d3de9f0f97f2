//! Static game description used for logging and by episode consumers.
//!
//! The actor logs this once at startup so that anyone reading a run's output
//! knows the board dimensions, the action-space size and the shape of the
//! network input without inspecting the game crate.

use serde::{Deserialize, Serialize};

/// Metadata about a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMetadata {
    /// Environment identifier (e.g., "gomoku")
    pub env_id: String,

    /// Human-readable display name
    pub display_name: String,

    /// Board width in cells
    pub board_width: usize,

    /// Board height in cells
    pub board_height: usize,

    /// Number of possible actions
    pub num_actions: usize,

    /// Network input shape as `[channels, height, width]`
    pub obs_shape: [usize; 3],

    /// Order of the symmetry group used for augmentation
    pub symmetry_count: usize,

    /// Display names for each player (e.g., ["Black", "White"])
    pub player_names: Vec<String>,

    /// Single-character symbols for each player
    pub player_symbols: Vec<char>,

    /// Brief description of the rules
    pub description: String,
}

impl GameMetadata {
    /// Create a new GameMetadata with required fields
    pub fn new(env_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            display_name: display_name.into(),
            board_width: 0,
            board_height: 0,
            num_actions: 0,
            obs_shape: [0, 0, 0],
            symmetry_count: 1,
            player_names: vec!["Player 1".to_string(), "Player 2".to_string()],
            player_symbols: vec!['1', '2'],
            description: String::new(),
        }
    }

    /// Builder method for board dimensions
    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.board_width = width;
        self.board_height = height;
        self
    }

    /// Builder method for action count
    pub fn with_actions(mut self, num_actions: usize) -> Self {
        self.num_actions = num_actions;
        self
    }

    /// Builder method for the network input shape
    pub fn with_observation(mut self, channels: usize, height: usize, width: usize) -> Self {
        self.obs_shape = [channels, height, width];
        self
    }

    /// Builder method for the symmetry group order
    pub fn with_symmetries(mut self, count: usize) -> Self {
        self.symmetry_count = count;
        self
    }

    /// Builder method for player information
    pub fn with_players(mut self, names: Vec<String>, symbols: Vec<char>) -> Self {
        self.player_names = names;
        self.player_symbols = symbols;
        self
    }

    /// Builder method for description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Total number of board cells
    pub fn board_size(&self) -> usize {
        self.board_width * self.board_height
    }

    /// Number of f32 values in one network input
    pub fn obs_size(&self) -> usize {
        self.obs_shape.iter().product()
    }
}
