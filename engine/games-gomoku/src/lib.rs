//! Gomoku (connect five) on a 15x15 board
//!
//! Two players alternately place stones on empty intersections. The first
//! player to form an unbroken horizontal, vertical, or diagonal line of five
//! or more stones wins. A full board without such a line is a draw.
//!
//! # Board Layout
//!
//! Cells are stored in row-major order and the action index of a cell is
//! `row * 15 + col`:
//! ```text
//!          col 0   1   2  ...  14
//! row  0:  [  0][  1][  2] ... [ 14]
//! row  1:  [ 15][ 16][ 17] ... [ 29]
//!  ...
//! row 14:  [210][211][212] ... [224]
//! ```
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_gomoku::Gomoku;
//!
//! let state = Gomoku::new().apply(112); // black takes the centre
//! assert_eq!(state.legal_actions().len(), 224);
//! assert!(!state.is_terminal());
//! ```

use engine_core::game_utils::{calculate_reward, opponent, DRAW};
use engine_core::{dihedral_symmetries, GameMetadata, GameState, LegalMask, Observation};
use std::fmt;

/// Board dimensions
pub const BOARD_SIDE: usize = 15;
pub const BOARD_SIZE: usize = BOARD_SIDE * BOARD_SIDE; // 225

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Planes in the network input: mover, opponent, colour
pub const OBS_CHANNELS: usize = 3;

/// Player numbers
pub const BLACK: u8 = 1;
pub const WHITE: u8 = 2;

/// Gomoku game state
///
/// Immutable per move: [`GameState::apply`] returns a new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gomoku {
    /// Board representation: 0=empty, 1=Black, 2=White, row-major
    board: [u8; BOARD_SIZE],
    /// Player to move: 1=Black, 2=White. Switches after every move,
    /// including the one that ends the game.
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=Black, 2=White, 3=draw
    winner: u8,
    /// Number of stones on the board
    moves_played: u16,
    /// Index of the most recently placed stone
    last_move: Option<usize>,
}

impl Gomoku {
    /// Create a new empty board with Black to move
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: BLACK,
            winner: 0,
            moves_played: 0,
            last_move: None,
        }
    }

    /// Convert row and column to board index
    #[inline]
    pub fn pos(row: usize, col: usize) -> usize {
        row * BOARD_SIDE + col
    }

    /// Cell value at `(row, col)`: 0=empty, 1=Black, 2=White
    pub fn cell(&self, row: usize, col: usize) -> u8 {
        self.board[Self::pos(row, col)]
    }

    /// Player to move
    pub fn current_player(&self) -> u8 {
        self.current_player
    }

    /// Winner code: 0=ongoing, 1=Black, 2=White, 3=draw
    pub fn winner(&self) -> u8 {
        self.winner
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played as usize
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Place the mover's stone at `index` and return the new state.
    ///
    /// Out-of-range, occupied, or post-game placements return the state
    /// unchanged.
    pub fn place(&self, index: usize) -> Gomoku {
        if self.is_done() || index >= BOARD_SIZE || self.board[index] != 0 {
            return self.clone();
        }

        let mut next = self.clone();
        next.board[index] = self.current_player;
        next.moves_played += 1;
        next.last_move = Some(index);
        next.winner = next.check_winner_at(index / BOARD_SIDE, index % BOARD_SIDE);
        next.current_player = opponent(self.current_player);
        next
    }

    /// Check if the stone at (row, col) completes a line of five
    fn check_winner_at(&self, row: usize, col: usize) -> u8 {
        let player = self.board[Self::pos(row, col)];
        if player == 0 {
            return 0;
        }

        // Direction vectors: horizontal, vertical, diagonal \, diagonal /
        let directions: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

        for (dr, dc) in directions {
            let count = 1
                + self.run_length(row, col, dr, dc, player)
                + self.run_length(row, col, -dr, -dc, player);
            if count >= WIN_LENGTH {
                return player;
            }
        }

        if self.moves_played as usize == BOARD_SIZE {
            return DRAW;
        }

        0
    }

    /// Count consecutive `player` stones starting next to (row, col)
    fn run_length(&self, row: usize, col: usize, dr: i32, dc: i32, player: u8) -> usize {
        let side = BOARD_SIDE as i32;
        let (mut r, mut c) = (row as i32 + dr, col as i32 + dc);
        let mut count = 0;
        while r >= 0 && r < side && c >= 0 && c < side {
            if self.board[Self::pos(r as usize, c as usize)] != player {
                break;
            }
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }
}

impl Default for Gomoku {
    fn default() -> Self {
        Self::new()
    }
}

fn symbol(cell: u8) -> char {
    match cell {
        BLACK => 'X',
        WHITE => 'O',
        _ => '.',
    }
}

impl GameState for Gomoku {
    const NUM_ACTIONS: usize = BOARD_SIZE;

    fn apply(&self, action: usize) -> Self {
        self.place(action)
    }

    fn is_terminal(&self) -> bool {
        self.is_done()
    }

    fn reward(&self) -> f32 {
        calculate_reward(self.winner, self.current_player)
    }

    fn legal_moves(&self) -> LegalMask {
        if self.is_done() {
            return vec![false; BOARD_SIZE];
        }
        self.board.iter().map(|&cell| cell == 0).collect()
    }

    fn key(&self) -> String {
        let mut key: String = self.board.iter().map(|&c| symbol(c)).collect();
        key.push(':');
        key.push(symbol(self.current_player));
        key
    }

    fn encode(&self) -> Observation {
        Observation::from_two_player_board(
            &self.board,
            BOARD_SIDE,
            BOARD_SIDE,
            self.current_player,
        )
    }

    fn symmetries(obs: &Observation, policy: &[f32]) -> Vec<(Observation, Vec<f32>)> {
        dihedral_symmetries(obs, policy)
    }

    fn metadata() -> GameMetadata {
        GameMetadata::new("gomoku", "Gomoku")
            .with_board(BOARD_SIDE, BOARD_SIDE)
            .with_actions(BOARD_SIZE)
            .with_observation(OBS_CHANNELS, BOARD_SIDE, BOARD_SIDE)
            .with_symmetries(8)
            .with_players(
                vec!["Black".to_string(), "White".to_string()],
                vec!['X', 'O'],
            )
            .with_description("Place stones to make five in a row!")
    }
}

impl fmt::Display for Gomoku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIDE {
            write!(f, "{:>2}", col)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIDE {
            write!(f, "{:>2} ", row)?;
            for col in 0..BOARD_SIDE {
                let index = Self::pos(row, col);
                let mark = if self.last_move == Some(index) { '*' } else { ' ' };
                write!(f, "{}{}", mark, symbol(self.board[index]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
