//! Benchmarks for the Petri cellular automaton engine.
//!
//! This crate holds no library code — see the `benches/` directory.
//! Run with `cargo bench -p petri-bench`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]
