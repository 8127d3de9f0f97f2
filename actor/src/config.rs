//! Configuration for the Actor service
//!
//! Defaults come from the central config (config.toml plus `GOMOKU_*`
//! environment overrides); CLI arguments take highest priority.

use anyhow::{anyhow, Result};
use clap::Parser;
use engine_config::{load_config, CentralConfig};
use mcts::MctsConfig;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_actor_id() -> String {
    CENTRAL_CONFIG.actor.actor_id.clone()
}

fn default_max_episodes() -> i32 {
    CENTRAL_CONFIG.actor.max_episodes
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

fn default_log_interval() -> u32 {
    CENTRAL_CONFIG.actor.log_interval
}

fn default_num_simulations() -> u32 {
    CENTRAL_CONFIG.mcts.num_simulations
}

fn default_c_puct() -> f64 {
    CENTRAL_CONFIG.mcts.c_puct
}

fn default_noise_level() -> f64 {
    CENTRAL_CONFIG.mcts.noise_level
}

fn default_dirichlet_alpha() -> f64 {
    CENTRAL_CONFIG.mcts.dirichlet_alpha
}

fn default_temp_threshold() -> u32 {
    CENTRAL_CONFIG.mcts.temp_threshold
}

#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "actor")]
#[command(about = "Gomoku self-play episode generator")]
#[command(
    long_about = "Actor that plays 15x15 connect-five games against itself with MCTS
and produces symmetry-augmented training examples.

Configuration is loaded from config.toml with GOMOKU_<SECTION>_<KEY>
environment variable overrides. CLI arguments take highest priority."
)]
pub struct Config {
    /// Unique actor identifier
    #[arg(long, default_value_t = default_actor_id())]
    pub actor_id: String,

    /// Maximum episodes to run (-1 for unlimited)
    #[arg(long, default_value_t = default_max_episodes())]
    pub max_episodes: i32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Log a summary every N episodes (0 to disable)
    #[arg(long, default_value_t = default_log_interval())]
    pub log_interval: u32,

    /// Base RNG seed; falls back to the config file, then OS entropy
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of MCTS simulations per move
    #[arg(long, default_value_t = default_num_simulations())]
    pub num_simulations: u32,

    /// PUCT exploration constant
    #[arg(long, default_value_t = default_c_puct())]
    pub c_puct: f64,

    /// Weight of Dirichlet noise mixed into each new root's prior (0 disables)
    #[arg(long, default_value_t = default_noise_level())]
    pub noise_level: f64,

    /// Dirichlet concentration for root noise
    #[arg(long, default_value_t = default_dirichlet_alpha())]
    pub dirichlet_alpha: f64,

    /// Plies sampled at temperature 1 before switching to greedy play
    #[arg(long, default_value_t = default_temp_threshold())]
    pub temp_threshold: u32,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.actor_id.is_empty() {
            return Err(anyhow!("actor_id cannot be empty"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        if self.num_simulations == 0 {
            return Err(anyhow!("num_simulations must be greater than 0"));
        }

        if !self.c_puct.is_finite() || self.c_puct <= 0.0 {
            return Err(anyhow!("c_puct must be a positive number"));
        }

        if !(0.0..=1.0).contains(&self.noise_level) {
            return Err(anyhow!("noise_level must be within [0, 1]"));
        }

        if !self.dirichlet_alpha.is_finite() || self.dirichlet_alpha <= 0.0 {
            return Err(anyhow!("dirichlet_alpha must be a positive number"));
        }

        Ok(())
    }

    /// Planner settings for every episode.
    pub fn mcts_config(&self) -> MctsConfig {
        MctsConfig::for_training()
            .with_simulations(self.num_simulations)
            .with_c_puct(self.c_puct as f32)
            .with_noise_level(self.noise_level as f32)
            .with_dirichlet_alpha(self.dirichlet_alpha as f32)
            .with_temp_threshold(self.temp_threshold)
    }

    /// Seed from the CLI, else from the config file.
    pub fn resolved_seed(&self) -> Option<u64> {
        self.seed.or(CENTRAL_CONFIG.actor.seed)
    }

    /// Episode limit, `None` for unlimited.
    pub fn episode_limit(&self) -> Option<u32> {
        u32::try_from(self.max_episodes).ok().filter(|&n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            actor_id: "actor".into(),
            max_episodes: 1,
            log_level: "info".into(),
            log_interval: 10,
            seed: Some(7),
            num_simulations: 100,
            c_puct: 1.0,
            noise_level: 0.3,
            dirichlet_alpha: 1.0,
            temp_threshold: 6,
        }
    }

    #[test]
    fn validate_accepts_valid_configuration() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_actor_id() {
        let mut cfg = base_config();
        cfg.actor_id.clear();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("actor_id"));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut cfg = base_config();
        cfg.log_level = "nope".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }

    #[test]
    fn validate_rejects_zero_simulations() {
        let mut cfg = base_config();
        cfg.num_simulations = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("num_simulations"));
    }

    #[test]
    fn validate_rejects_bad_search_parameters() {
        let mut cfg = base_config();
        cfg.c_puct = 0.0;
        assert!(cfg.validate().unwrap_err().to_string().contains("c_puct"));

        let mut cfg = base_config();
        cfg.noise_level = 1.5;
        assert!(cfg.validate().unwrap_err().to_string().contains("noise_level"));

        let mut cfg = base_config();
        cfg.dirichlet_alpha = -1.0;
        assert!(cfg
            .validate()
            .unwrap_err()
            .to_string()
            .contains("dirichlet_alpha"));
    }

    #[test]
    fn validate_accepts_negative_max_episodes() {
        let mut cfg = base_config();
        cfg.max_episodes = -1; // Unlimited mode
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.episode_limit(), None);
    }

    #[test]
    fn episode_limit_for_bounded_runs() {
        let mut cfg = base_config();
        cfg.max_episodes = 25;
        assert_eq!(cfg.episode_limit(), Some(25));
        cfg.max_episodes = 0;
        assert_eq!(cfg.episode_limit(), None);
    }

    #[test]
    fn mcts_config_carries_cli_values() {
        let mut cfg = base_config();
        cfg.num_simulations = 321;
        cfg.noise_level = 0.0;
        cfg.temp_threshold = 2;

        let mcts = cfg.mcts_config();
        assert_eq!(mcts.num_simulations, 321);
        assert_eq!(mcts.noise_level, 0.0);
        assert_eq!(mcts.temp_threshold, 2);
        assert!((mcts.c_puct - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cli_seed_wins() {
        assert_eq!(base_config().resolved_seed(), Some(7));
    }

    #[test]
    fn parses_command_line() {
        let cfg = Config::try_parse_from([
            "actor",
            "--max-episodes",
            "3",
            "--num-simulations",
            "50",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(cfg.max_episodes, 3);
        assert_eq!(cfg.num_simulations, 50);
        assert_eq!(cfg.seed, Some(42));
    }
}
