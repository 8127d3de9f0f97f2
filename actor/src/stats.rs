//! Actor statistics tracking.
//!
//! Counters are atomics so the run loop and the shutdown handler can read
//! them without locking.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Instant;

use tracing::info;

use crate::selfplay::{Episode, Outcome};

/// Aggregated actor statistics, designed for lock-free updates.
#[derive(Debug)]
pub struct ActorStats {
    /// Number of episodes completed
    episodes_completed: AtomicU32,
    /// Total plies across all episodes
    total_plies: AtomicU64,
    /// Total training examples produced
    total_examples: AtomicU64,
    /// Episodes won by the first player (Black)
    black_wins: AtomicU32,
    /// Episodes won by the second player (White)
    white_wins: AtomicU32,
    /// Episodes that ended in a draw
    draws: AtomicU32,
    /// Moves played with zero recorded visits
    zero_visit_moves: AtomicU64,
    /// Total MCTS simulations
    simulations: AtomicU64,
    /// Total wall time spent searching (microseconds)
    search_us: AtomicU64,
    /// Start time for rate calculations
    start_time: Instant,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorStatsSnapshot {
    pub episodes_completed: u32,
    pub total_plies: u64,
    pub total_examples: u64,
    pub black_wins: u32,
    pub white_wins: u32,
    pub draws: u32,
    pub zero_visit_moves: u64,
    pub avg_episode_length: f64,
    pub episodes_per_second: f64,
    pub simulations_per_second: f64,
    pub runtime_seconds: f64,
}

impl Default for ActorStats {
    fn default() -> Self {
        Self::new()
    }
}

impl ActorStats {
    pub fn new() -> Self {
        Self {
            episodes_completed: AtomicU32::new(0),
            total_plies: AtomicU64::new(0),
            total_examples: AtomicU64::new(0),
            black_wins: AtomicU32::new(0),
            white_wins: AtomicU32::new(0),
            draws: AtomicU32::new(0),
            zero_visit_moves: AtomicU64::new(0),
            simulations: AtomicU64::new(0),
            search_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a completed episode. Black is the first player.
    pub fn record_episode(&self, episode: &Episode) {
        self.episodes_completed.fetch_add(1, Ordering::Relaxed);
        self.total_plies
            .fetch_add(episode.plies as u64, Ordering::Relaxed);
        self.total_examples
            .fetch_add(episode.examples.len() as u64, Ordering::Relaxed);
        self.zero_visit_moves
            .fetch_add(episode.zero_visit_moves as u64, Ordering::Relaxed);
        self.simulations
            .fetch_add(episode.stats.simulations, Ordering::Relaxed);
        self.search_us
            .fetch_add(episode.stats.elapsed_us, Ordering::Relaxed);

        let counter = match episode.outcome() {
            Outcome::FirstPlayerWin => &self.black_wins,
            Outcome::SecondPlayerWin => &self.white_wins,
            Outcome::Draw => &self.draws,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> ActorStatsSnapshot {
        let episodes = self.episodes_completed.load(Ordering::Relaxed);
        let plies = self.total_plies.load(Ordering::Relaxed);
        let runtime = self.start_time.elapsed().as_secs_f64();
        let simulations = self.simulations.load(Ordering::Relaxed);
        let search_us = self.search_us.load(Ordering::Relaxed);

        let avg_episode_length = if episodes > 0 {
            plies as f64 / episodes as f64
        } else {
            0.0
        };

        let episodes_per_second = if runtime > 0.0 {
            episodes as f64 / runtime
        } else {
            0.0
        };

        let simulations_per_second = if search_us > 0 {
            simulations as f64 * 1_000_000.0 / search_us as f64
        } else {
            0.0
        };

        ActorStatsSnapshot {
            episodes_completed: episodes,
            total_plies: plies,
            total_examples: self.total_examples.load(Ordering::Relaxed),
            black_wins: self.black_wins.load(Ordering::Relaxed),
            white_wins: self.white_wins.load(Ordering::Relaxed),
            draws: self.draws.load(Ordering::Relaxed),
            zero_visit_moves: self.zero_visit_moves.load(Ordering::Relaxed),
            avg_episode_length,
            episodes_per_second,
            simulations_per_second,
            runtime_seconds: runtime,
        }
    }

    /// Log the current totals.
    pub fn log_summary(&self) {
        let s = self.snapshot();
        info!(
            episodes = s.episodes_completed,
            plies = s.total_plies,
            examples = s.total_examples,
            black_wins = s.black_wins,
            white_wins = s.white_wins,
            draws = s.draws,
            zero_visit_moves = s.zero_visit_moves,
            avg_length = format!("{:.1}", s.avg_episode_length),
            episodes_per_sec = format!("{:.3}", s.episodes_per_second),
            sims_per_sec = format!("{:.0}", s.simulations_per_second),
            "Actor stats"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcts::SearchStats;

    fn episode(plies: usize, final_reward: f32) -> Episode {
        Episode {
            examples: Vec::new(),
            moves: (0..plies).collect(),
            final_reward,
            plies,
            zero_visit_moves: 0,
            stats: SearchStats {
                simulations: 10 * plies as u64,
                evaluator_calls: 0,
                terminal_hits: 0,
                elapsed_us: 1000,
            },
        }
    }

    #[test]
    fn test_record_outcomes() {
        let stats = ActorStats::new();

        stats.record_episode(&episode(9, -1.0)); // Black made the last move and won
        stats.record_episode(&episode(10, -1.0)); // White made the last move and won
        stats.record_episode(&episode(225, 0.0)); // Draw

        let s = stats.snapshot();
        assert_eq!(s.episodes_completed, 3);
        assert_eq!(s.black_wins, 1);
        assert_eq!(s.white_wins, 1);
        assert_eq!(s.draws, 1);
        assert_eq!(s.total_plies, 9 + 10 + 225);
    }

    #[test]
    fn test_average_with_zero_episodes() {
        let s = ActorStats::new().snapshot();

        // Averages should be 0.0, not NaN or panic
        assert_eq!(s.episodes_completed, 0);
        assert_eq!(s.avg_episode_length, 0.0);
        assert_eq!(s.simulations_per_second, 0.0);
    }

    #[test]
    fn test_counts_examples_and_zero_visit_moves() {
        let stats = ActorStats::new();
        let mut ep = episode(11, -1.0);
        ep.zero_visit_moves = 2;
        stats.record_episode(&ep);
        stats.record_episode(&ep);

        let s = stats.snapshot();
        assert_eq!(s.zero_visit_moves, 4);
        assert_eq!(s.total_examples, 0);
    }

    #[test]
    fn test_simulation_rate() {
        let stats = ActorStats::new();
        stats.record_episode(&episode(10, -1.0)); // 100 sims in 1ms
        let s = stats.snapshot();
        assert!((s.simulations_per_second - 100_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_avg_episode_length_calculation() {
        let stats = ActorStats::new();
        stats.record_episode(&episode(9, -1.0));
        stats.record_episode(&episode(15, -1.0));

        let s = stats.snapshot();
        assert!((s.avg_episode_length - 12.0).abs() < 0.01);
    }

    #[test]
    fn test_concurrent_updates() {
        use std::sync::Arc;
        use std::thread;

        let stats = Arc::new(ActorStats::new());

        let mut handles = vec![];
        for _ in 0..10 {
            let stats_clone = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    stats_clone.record_episode(&episode(9, -1.0));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.snapshot().episodes_completed, 1000);
    }
}
