//! Actor main loop: runs self-play episodes until the limit or shutdown

use anyhow::{anyhow, Result};
use engine_core::GameState;
use games_gomoku::Gomoku;
use indicatif::{ProgressBar, ProgressStyle};
use mcts::{MctsConfig, UniformEvaluator};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Mutex, MutexGuard,
};
use std::time::Instant;
use tracing::{error, info};

use crate::config::Config;
use crate::selfplay::{generate_episode, Episode};
use crate::stats::ActorStats;

pub struct Actor {
    config: Config,
    mcts_config: MctsConfig,
    player_names: Vec<String>,
    stats: ActorStats,
    /// Source of per-episode seeds.
    seed_rng: Mutex<ChaCha20Rng>,
    episode_count: AtomicU32,
    shutdown_signal: AtomicBool,
}

impl Actor {
    pub fn new(config: Config) -> Result<Self> {
        let seed_rng = match config.resolved_seed() {
            Some(seed) => {
                info!(seed, "Using fixed base seed");
                ChaCha20Rng::seed_from_u64(seed)
            }
            None => ChaCha20Rng::from_entropy(),
        };

        let meta = Gomoku::metadata();
        info!(
            env_id = %meta.env_id,
            board = format!("{}x{}", meta.board_width, meta.board_height),
            num_actions = meta.num_actions,
            obs_shape = ?meta.obs_shape,
            symmetries = meta.symmetry_count,
            "Game loaded"
        );

        let mcts_config = config.mcts_config();
        info!(
            num_simulations = mcts_config.num_simulations,
            c_puct = mcts_config.c_puct,
            noise_level = mcts_config.noise_level,
            dirichlet_alpha = mcts_config.dirichlet_alpha,
            temp_threshold = mcts_config.temp_threshold,
            "MCTS configured"
        );

        Ok(Self {
            config,
            mcts_config,
            player_names: meta.player_names,
            stats: ActorStats::new(),
            seed_rng: Mutex::new(seed_rng),
            episode_count: AtomicU32::new(0),
            shutdown_signal: AtomicBool::new(false),
        })
    }

    pub async fn run(&self) -> Result<()> {
        let limit = self.config.episode_limit();
        info!(
            actor_id = %self.config.actor_id,
            max_episodes = self.config.max_episodes,
            "Actor starting main loop"
        );

        // Progress bar for bounded runs, only when stderr is a TTY
        let progress = match limit {
            Some(n) if std::io::IsTerminal::is_terminal(&std::io::stderr()) => {
                let pb = ProgressBar::new(n as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template(
                            "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} episodes ({eta})",
                        )?
                        .progress_chars("#>-"),
                );
                Some(pb)
            }
            _ => None,
        };

        loop {
            if self.shutdown_signal.load(Ordering::Relaxed) {
                info!("Shutdown signal received, stopping actor");
                break;
            }

            let done = self.episode_count.load(Ordering::Relaxed);
            if limit.is_some_and(|n| done >= n) {
                info!("Reached maximum episodes ({}), stopping", done);
                break;
            }

            let start = Instant::now();
            match self.run_episode().await {
                Ok(episode) => {
                    self.stats.record_episode(&episode);
                    let count = self.episode_count.fetch_add(1, Ordering::Relaxed) + 1;

                    if let Some(ref pb) = progress {
                        pb.inc(1);
                    }

                    let winner = episode
                        .outcome()
                        .winner_index()
                        .and_then(|i| self.player_names.get(i))
                        .map_or("draw", String::as_str);
                    let log_episode = || {
                        info!(
                            episode = count,
                            plies = episode.plies,
                            examples = episode.examples.len(),
                            winner,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "Episode finished"
                        )
                    };
                    match progress {
                        Some(ref pb) => pb.suspend(log_episode),
                        None => log_episode(),
                    }

                    if self.config.log_interval > 0 && count % self.config.log_interval == 0 {
                        match progress {
                            Some(ref pb) => pb.suspend(|| self.stats.log_summary()),
                            None => self.stats.log_summary(),
                        }
                    }
                }
                Err(e) => {
                    let count = self.episode_count.load(Ordering::Relaxed);
                    error!("Episode {} failed: {:#}", count + 1, e);
                    // Continue with next episode rather than stopping
                }
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message("done");
        }

        self.stats.log_summary();
        info!("Actor stopped gracefully");
        Ok(())
    }

    pub fn shutdown(&self) {
        self.shutdown_signal.store(true, Ordering::Relaxed);
        info!("Shutdown signal set");
    }

    /// Play one game on a blocking thread.
    async fn run_episode(&self) -> Result<Episode> {
        let seed: u64 = self.lock_seed_rng()?.gen();
        let mcts_config = self.mcts_config.clone();

        let episode = tokio::task::spawn_blocking(move || {
            generate_episode(Gomoku::new(), &UniformEvaluator::new(), &mcts_config, seed)
        })
        .await
        .map_err(|e| anyhow!("Episode task panicked: {}", e))??;

        Ok(episode)
    }

    fn lock_seed_rng(&self) -> Result<MutexGuard<'_, ChaCha20Rng>> {
        self.seed_rng
            .lock()
            .map_err(|e| anyhow!("Seed RNG lock poisoned: {}", e))
    }

    /// Completed episode count.
    pub fn episode_count(&self) -> u32 {
        self.episode_count.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }
}
