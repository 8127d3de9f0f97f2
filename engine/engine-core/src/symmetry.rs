//! Dihedral symmetries of a square board.
//!
//! A square board has 8 symmetries: 4 rotations (0°, 90°, 180°, 270°) and the
//! same 4 rotations applied after a flip across the horizontal axis. Training
//! data is augmented by applying each of them to both the network input and
//! the policy target, so a transform must move a cell's plane value and its
//! policy entry to the same destination.

use crate::board_game::Observation;

/// One element of the dihedral group D4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    Rot90,
    Rot180,
    Rot270,
    Flip,
    FlipRot90,
    FlipRot180,
    FlipRot270,
}

impl Symmetry {
    /// All 8 group elements, identity first.
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::Rot90,
        Symmetry::Rot180,
        Symmetry::Rot270,
        Symmetry::Flip,
        Symmetry::FlipRot90,
        Symmetry::FlipRot180,
        Symmetry::FlipRot270,
    ];

    /// Whether the horizontal flip is applied (before rotating).
    fn flips(self) -> bool {
        matches!(
            self,
            Symmetry::Flip | Symmetry::FlipRot90 | Symmetry::FlipRot180 | Symmetry::FlipRot270
        )
    }

    /// Number of 90° clockwise rotations.
    fn quarter_turns(self) -> usize {
        match self {
            Symmetry::Identity | Symmetry::Flip => 0,
            Symmetry::Rot90 | Symmetry::FlipRot90 => 1,
            Symmetry::Rot180 | Symmetry::FlipRot180 => 2,
            Symmetry::Rot270 | Symmetry::FlipRot270 => 3,
        }
    }

    /// Destination of cell `(row, col)` on a `side x side` board.
    pub fn map_cell(self, row: usize, col: usize, side: usize) -> (usize, usize) {
        let last = side - 1;
        let (mut r, mut c) = if self.flips() {
            (last - row, col)
        } else {
            (row, col)
        };
        for _ in 0..self.quarter_turns() {
            // 90° clockwise: (r, c) -> (c, last - r)
            (r, c) = (c, last - r);
        }
        (r, c)
    }

    /// Human-readable name, used in debug output.
    pub fn name(self) -> &'static str {
        match self {
            Symmetry::Identity => "R0 (identity)",
            Symmetry::Rot90 => "R90 (rotate 90° clockwise)",
            Symmetry::Rot180 => "R180 (rotate 180°)",
            Symmetry::Rot270 => "R270 (rotate 270° clockwise)",
            Symmetry::Flip => "H (horizontal flip)",
            Symmetry::FlipRot90 => "H+R90 (horizontal flip + rotate 90°)",
            Symmetry::FlipRot180 => "H+R180 (horizontal flip + rotate 180°)",
            Symmetry::FlipRot270 => "H+R270 (horizontal flip + rotate 270°)",
        }
    }
}

/// Apply `sym` to every plane of a square observation.
pub fn transform_planes(obs: &Observation, sym: Symmetry) -> Observation {
    debug_assert_eq!(obs.height, obs.width, "dihedral transforms need a square board");
    let side = obs.width;
    let mut out = Observation::zeros(obs.channels, side, side);

    for channel in 0..obs.channels {
        for row in 0..side {
            for col in 0..side {
                let (r, c) = sym.map_cell(row, col, side);
                out.set(channel, r, c, obs.get(channel, row, col));
            }
        }
    }

    out
}

/// Apply `sym` to a row-major policy over a `side x side` board.
pub fn transform_policy(policy: &[f32], side: usize, sym: Symmetry) -> Vec<f32> {
    debug_assert_eq!(policy.len(), side * side);
    let mut out = vec![0.0; policy.len()];

    for row in 0..side {
        for col in 0..side {
            let (r, c) = sym.map_cell(row, col, side);
            out[r * side + c] = policy[row * side + col];
        }
    }

    out
}

/// All 8 `(input, policy)` pairs under D4, identity first.
pub fn dihedral_symmetries(obs: &Observation, policy: &[f32]) -> Vec<(Observation, Vec<f32>)> {
    let side = obs.width;
    Symmetry::ALL
        .iter()
        .map(|&sym| {
            (
                transform_planes(obs, sym),
                transform_policy(policy, side, sym),
            )
        })
        .collect()
}
