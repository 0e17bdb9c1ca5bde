//! Incremental multithreaded stepping engine for toroidal life-like
//! cellular automata.
//!
//! The engine never rescans the whole board: only cells that might
//! change — the *dirty set* — are evaluated each generation. A fixed
//! pool of worker threads advances the board through a strict
//! three-phase pipeline per generation, synchronized by a phase barrier:
//!
//! 1. **Evaluate** — each worker drains its private partition of the
//!    dirty set, stages every cell's next liveness, and enqueues the
//!    cells that need attention next generation (births fan out to all
//!    8 neighbors; idempotent per-cell claims keep every queue
//!    duplicate-free under concurrency).
//! 2. **Commit** — staged liveness is applied; flips are collected.
//! 3. **Requeue** — the shared next-step queue is split back into
//!    balanced per-worker partitions for the following generation.
//!
//! The [`Board`] is the user-facing entry point; see [`BoardConfig`] for
//! construction options and [`Pattern`] for initial conditions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod arena;
mod cell;
mod queue;
mod worker;

pub mod board;
pub mod config;
pub mod error;
pub mod pattern;

pub use board::{Board, StepMetrics, StepOutcome};
pub use config::BoardConfig;
pub use error::{ConfigError, StepError};
pub use pattern::{Pattern, PatternError};
