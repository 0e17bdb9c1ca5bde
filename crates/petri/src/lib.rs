//! Petri: an incremental multithreaded engine for toroidal life-like
//! cellular automata.
//!
//! This is the top-level facade crate re-exporting the public API from
//! the Petri sub-crates. For most users, adding `petri` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use petri::prelude::*;
//!
//! // A blinker under standard Conway rules.
//! let mut board = Board::from_rows(&[
//!     ".....",
//!     ".....",
//!     ".###.",
//!     ".....",
//!     ".....",
//! ], '#').unwrap();
//!
//! let outcome = board.step().unwrap();
//! assert_eq!(outcome.generation, Generation(1));
//! for &idx in &outcome.changed {
//!     let (x, y) = board.coord(idx);
//!     println!("({x}, {y}) flipped");
//! }
//! assert!(board.is_alive(2, 1).unwrap());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`rules`] | `petri-rules` | Rule sets, parsing, outcome classification |
//! | [`grid`] | `petri-grid` | Toroidal topology, directions, ids |
//! | [`engine`] | `petri-engine` | Board, worker pool, patterns, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Rule sets and outcome classification (`petri-rules`).
pub use petri_rules as rules;

/// Toroidal grid topology and core ids (`petri-grid`).
pub use petri_grid as grid;

/// The board, worker pool, and pattern input (`petri-engine`).
pub use petri_engine as engine;

/// Common imports for typical Petri usage.
///
/// ```rust
/// use petri::prelude::*;
/// ```
pub mod prelude {
    pub use petri_engine::{
        Board, BoardConfig, ConfigError, Pattern, PatternError, StepError, StepMetrics,
        StepOutcome,
    };
    pub use petri_grid::{CellIdx, Direction, Generation, GridError, Torus};
    pub use petri_rules::{Outcome, RuleError, RuleSet};
}
