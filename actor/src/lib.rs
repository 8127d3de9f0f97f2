//! Self-play actor for 15x15 connect-five
//!
//! - `selfplay`: plays one game with the MCTS planner and labels every move
//!   under all board symmetries
//! - `stats`: running totals over many episodes
//! - `config`: CLI and central-config settings
//! - `actor`: the driver loop behind the `actor` binary

pub mod actor;
pub mod config;
pub mod selfplay;
pub mod stats;

pub use crate::actor::Actor;
pub use config::Config;
pub use selfplay::{generate_episode, Episode, EpisodeError, Outcome, TrainingExample};
pub use stats::{ActorStats, ActorStatsSnapshot};
