//! Named patterns and deterministic random inputs.
//!
//! The ASCII fixtures use `#` for live cells and `.` for dead cells,
//! matching the engine's `from_rows`/`render` convention.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Horizontal blinker centered on a 5×5 board (period-2 oscillator).
pub const BLINKER_5X5: &[&str] = &[
    ".....",
    ".....",
    ".###.",
    ".....",
    ".....",
];

/// Still-life block on a 6×6 board.
pub const BLOCK_6X6: &[&str] = &[
    "......",
    "......",
    "..##..",
    "..##..",
    "......",
    "......",
];

/// Glider in the top-left corner of an 8×8 board, heading south-east.
pub const GLIDER_8X8: &[&str] = &[
    ".#......",
    "..#.....",
    "###.....",
    "........",
    "........",
    "........",
    "........",
    "........",
];

/// Live-cell coordinates of a seeded random soup.
///
/// Fully deterministic for a given `(width, height, density, seed)`,
/// independent of platform — the backbone of the worker-count
/// independence and reference-parity tests.
pub fn random_soup(width: u32, height: u32, density: f64, seed: u64) -> Vec<(u32, u32)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut live = Vec::new();
    for y in 0..height {
        for x in 0..width {
            if rng.gen::<f64>() < density {
                live.push((x, y));
            }
        }
    }
    live
}
