//! Test fixtures and deterministic inputs for Petri development.
//!
//! Named ASCII patterns for the classic still lifes and oscillators,
//! plus a seeded random-soup generator for determinism and parity tests.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{random_soup, BLINKER_5X5, BLOCK_6X6, GLIDER_8X8};
