//! MCTS configuration parameters.

/// Configuration for the PUCT planner and the self-play loop that drives it.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run per real move.
    pub num_simulations: u32,

    /// Exploration constant for the PUCT formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub c_puct: f32,

    /// Weight of Dirichlet noise mixed into the root prior every time the
    /// root advances. 0.0 disables the refresh.
    pub noise_level: f32,

    /// Concentration of the Dirichlet noise. 1.0 samples uniformly from the
    /// probability simplex.
    pub dirichlet_alpha: f32,

    /// Number of opening plies played at temperature 1.0 before switching to
    /// greedy (temperature 0.0) move selection.
    pub temp_threshold: u32,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 200,
            c_puct: 1.0,
            noise_level: 0.3,
            dirichlet_alpha: 1.0,
            temp_threshold: 6,
        }
    }
}

impl MctsConfig {
    /// Create config for self-play training.
    pub fn for_training() -> Self {
        Self::default()
    }

    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            num_simulations: 16,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Builder pattern: set c_puct exploration constant.
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    /// Builder pattern: set root noise mixing weight.
    pub fn with_noise_level(mut self, level: f32) -> Self {
        self.noise_level = level;
        self
    }

    /// Builder pattern: set Dirichlet concentration.
    pub fn with_dirichlet_alpha(mut self, alpha: f32) -> Self {
        self.dirichlet_alpha = alpha;
        self
    }

    /// Builder pattern: set the ply at which selection turns greedy.
    pub fn with_temp_threshold(mut self, plies: u32) -> Self {
        self.temp_threshold = plies;
        self
    }

    /// Move-selection temperature for the given 0-based ply.
    pub fn temperature_for_ply(&self, ply: u32) -> f32 {
        if ply < self.temp_threshold {
            1.0
        } else {
            0.0
        }
    }
}
