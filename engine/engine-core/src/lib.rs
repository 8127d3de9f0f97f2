//! Core traits and types shared by the games and the search
//!
//! This crate provides the contract between a game and the planner:
//! - `GameState`: immutable position with move application, terminal
//!   detection, canonical keying, network-input encoding and symmetries
//! - `Observation`: dense channel-major planes fed to the predictor
//! - `symmetry`: the 8 dihedral transforms of a square board
//! - `GameMetadata`: static description of a game

pub mod board_game;
pub mod game_utils;
pub mod metadata;
pub mod symmetry;
pub mod typed;

// Re-export main types for convenience
pub use board_game::Observation;
pub use metadata::GameMetadata;
pub use symmetry::{dihedral_symmetries, Symmetry};
pub use typed::{GameState, LegalMask};
