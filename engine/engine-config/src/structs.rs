//! Configuration struct definitions.
//!
//! Every field falls back to the compiled-in default when absent from
//! config.toml, so partial files are valid.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_actor_id() -> String {
    defaults::actor_id().into()
}
fn d_max_episodes() -> i32 {
    defaults::max_episodes()
}
fn d_log_interval() -> u32 {
    defaults::log_interval()
}
fn d_num_sims() -> u32 {
    defaults::num_simulations()
}
fn d_c_puct() -> f64 {
    defaults::c_puct()
}
fn d_noise_level() -> f64 {
    defaults::noise_level()
}
fn d_dirichlet_alpha() -> f64 {
    defaults::dirichlet_alpha()
}
fn d_temp_threshold() -> u32 {
    defaults::temp_threshold()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub actor: ActorConfig,
    #[serde(default)]
    pub mcts: MctsConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Self-play actor configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ActorConfig {
    #[serde(default = "d_actor_id")]
    pub actor_id: String,
    /// Episodes to play; -1 for unlimited
    #[serde(default = "d_max_episodes")]
    pub max_episodes: i32,
    /// Log a summary every N episodes
    #[serde(default = "d_log_interval")]
    pub log_interval: u32,
    /// Base RNG seed; None seeds from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            actor_id: defaults::actor_id().into(),
            max_episodes: defaults::max_episodes(),
            log_interval: defaults::log_interval(),
            seed: None,
        }
    }
}

/// MCTS (Monte Carlo Tree Search) configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MctsConfig {
    #[serde(default = "d_num_sims")]
    pub num_simulations: u32,
    #[serde(default = "d_c_puct")]
    pub c_puct: f64,
    /// Weight of the Dirichlet noise mixed into each new root's prior
    #[serde(default = "d_noise_level")]
    pub noise_level: f64,
    #[serde(default = "d_dirichlet_alpha")]
    pub dirichlet_alpha: f64,
    /// Plies sampled at temperature 1 before switching to greedy play
    #[serde(default = "d_temp_threshold")]
    pub temp_threshold: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: defaults::num_simulations(),
            c_puct: defaults::c_puct(),
            noise_level: defaults::noise_level(),
            dirichlet_alpha: defaults::dirichlet_alpha(),
            temp_threshold: defaults::temp_threshold(),
        }
    }
}
