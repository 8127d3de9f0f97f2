//! Tests for the configuration module.

use super::*;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert_eq!(config.actor.actor_id, "actor-1");
    assert_eq!(config.actor.max_episodes, -1);
    assert_eq!(config.actor.log_interval, 10);
    assert_eq!(config.actor.seed, None);
}

#[test]
fn test_mcts_defaults() {
    let config = CentralConfig::default();
    assert_eq!(config.mcts.num_simulations, 200);
    assert!((config.mcts.c_puct - 1.0).abs() < f64::EPSILON);
    assert!((config.mcts.noise_level - 0.3).abs() < f64::EPSILON);
    assert!((config.mcts.dirichlet_alpha - 1.0).abs() < f64::EPSILON);
    assert_eq!(config.mcts.temp_threshold, 6);
}

#[test]
fn test_defaults_file_matches_accessors() {
    assert_eq!(log_level(), "info");
    assert_eq!(num_simulations(), 200);
    assert_eq!(temp_threshold(), 6);
}

#[test]
fn test_gomoku_env_overrides() {
    std::env::set_var("GOMOKU_ACTOR_ACTOR_ID", "env-actor");
    std::env::set_var("GOMOKU_ACTOR_SEED", "1234");
    std::env::set_var("GOMOKU_MCTS_NOISE_LEVEL", "0.5");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.actor.actor_id, "env-actor");
    assert_eq!(config.actor.seed, Some(1234));
    assert!((config.mcts.noise_level - 0.5).abs() < f64::EPSILON);

    std::env::remove_var("GOMOKU_ACTOR_ACTOR_ID");
    std::env::remove_var("GOMOKU_ACTOR_SEED");
    std::env::remove_var("GOMOKU_MCTS_NOISE_LEVEL");
}

#[test]
fn test_unparseable_env_override_is_ignored() {
    std::env::set_var("GOMOKU_MCTS_TEMP_THRESHOLD", "not-a-number");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.mcts.temp_threshold, 6);

    std::env::remove_var("GOMOKU_MCTS_TEMP_THRESHOLD");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[actor]
actor_id = "my-actor"
max_episodes = 100
seed = 42

[mcts]
num_simulations = 800
c_puct = 1.5
noise_level = 0.25
dirichlet_alpha = 0.3
temp_threshold = 10
"#;
    let config = parse_config(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert_eq!(config.actor.actor_id, "my-actor");
    assert_eq!(config.actor.max_episodes, 100);
    assert_eq!(config.actor.seed, Some(42));
    assert_eq!(config.mcts.num_simulations, 800);
    assert!((config.mcts.c_puct - 1.5).abs() < f64::EPSILON);
    assert!((config.mcts.noise_level - 0.25).abs() < f64::EPSILON);
    assert!((config.mcts.dirichlet_alpha - 0.3).abs() < f64::EPSILON);
    assert_eq!(config.mcts.temp_threshold, 10);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[mcts]
num_simulations = 50
"#;
    let config = parse_config(toml_content).unwrap();
    assert_eq!(config.mcts.num_simulations, 50);
    assert!((config.mcts.c_puct - 1.0).abs() < f64::EPSILON); // Default
    assert_eq!(config.actor.actor_id, "actor-1"); // Default
    assert_eq!(config.common.log_level, "info"); // Default
}

#[test]
fn test_invalid_toml_is_error() {
    assert!(parse_config("[mcts\nnum_simulations = ").is_err());
    assert!(parse_config("[mcts]\nnum_simulations = \"many\"").is_err());
}

#[test]
fn test_load_from_missing_path_uses_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/gomoku/config.toml"));
    assert_eq!(config.actor.max_episodes, -1);
}

#[test]
fn test_config_clone() {
    let config = CentralConfig::default();
    let cloned = config.clone();
    assert_eq!(config.common.log_level, cloned.common.log_level);
    assert_eq!(config.actor.actor_id, cloned.actor.actor_id);
}
