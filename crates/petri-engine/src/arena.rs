//! The cell arena: flat cell storage plus the fixed neighbor table, and
//! the per-cell evaluate/commit operations that drive a generation.
//!
//! Neighbor "references" are arena indices wired once at construction
//! from the torus topology and never touched again — stepping is O(1)
//! table indexing, with no coordinate arithmetic on the hot path.

use crate::cell::Cell;
use crate::queue::EnqueueSinks;
use petri_grid::{CellIdx, Direction, Torus};
use petri_rules::{Outcome, RuleSet};

/// Shared, index-addressed storage for every cell on the board.
///
/// The arena itself is immutable after construction; all mutation goes
/// through the cells' atomic fields. Workers hold it behind an `Arc`.
#[derive(Debug)]
pub(crate) struct Arena {
    torus: Torus,
    cells: Vec<Cell>,
    neighbors: Vec<[CellIdx; 8]>,
}

impl Arena {
    /// Build the arena and wire every cell's neighbor table.
    pub fn new(torus: Torus) -> Self {
        let count = torus.cell_count();
        let mut cells = Vec::with_capacity(count);
        cells.resize_with(count, Cell::default);

        let width = torus.width();
        let mut neighbors = Vec::with_capacity(count);
        for i in 0..count as u32 {
            let (x, y) = torus.coord(CellIdx(i));
            let mut row = [CellIdx(0); 8];
            for d in Direction::ALL {
                let (nx, ny) = torus.neighbor(x, y, d);
                row[d.ordinal()] = CellIdx(ny * width + nx);
            }
            neighbors.push(row);
        }
        Self {
            torus,
            cells,
            neighbors,
        }
    }

    /// The board topology.
    pub fn torus(&self) -> &Torus {
        &self.torus
    }

    /// A cell by index.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is outside the arena — an index can only be out of
    /// range if a work queue was corrupted, which is not recoverable.
    #[inline]
    pub fn cell(&self, idx: CellIdx) -> &Cell {
        &self.cells[idx.index()]
    }

    /// A cell's fixed neighbor table, in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors(&self, idx: CellIdx) -> &[CellIdx; 8] {
        &self.neighbors[idx.index()]
    }

    /// The neighbor of `idx` in `direction`.
    #[cfg(test)]
    #[inline]
    pub fn neighbor(&self, idx: CellIdx, direction: Direction) -> CellIdx {
        self.neighbors[idx.index()][direction.ordinal()]
    }

    /// Number of the 8 neighbors currently alive.
    ///
    /// Only called during the evaluate phase, after every commit from the
    /// previous generation is barrier-complete, so the reads cannot race
    /// a concurrent liveness write.
    pub fn live_neighbor_count(&self, idx: CellIdx) -> u8 {
        self.neighbors[idx.index()]
            .iter()
            .filter(|&&nb| self.cells[nb.index()].is_alive())
            .count() as u8
    }

    /// Evaluate one cell from its live state.
    pub fn evaluate(&self, idx: CellIdx, rules: RuleSet, sinks: &mut EnqueueSinks<'_>) -> Outcome {
        let alive = self.cell(idx).is_alive();
        let live_neighbors = self.live_neighbor_count(idx);
        self.evaluate_with(idx, alive, live_neighbors, rules, sinks)
    }

    /// Evaluate one cell from an externally supplied `(alive, count)`
    /// pair — classification and enqueue behavior are identical to
    /// [`evaluate`](Self::evaluate), which makes the enqueue logic
    /// testable without arranging live neighbors.
    ///
    /// Staging and scheduling per outcome:
    /// - `Birth`/`Survive`: stage alive, enqueue self into both queues;
    ///   a birth additionally fans all 8 neighbors into the next-step
    ///   queue so any cell adjacent to new life is re-checked next
    ///   generation. Survival deliberately does not fan out — a stable
    ///   cell's neighbors are already tracked through their own live
    ///   neighbor.
    /// - `Death`: stage dead; re-check next generation only if some
    ///   neighbor is still alive; always commit (the flip must land).
    /// - `StaysDead`: nothing staged; re-check and commit (for the flag
    ///   reset) only while some neighbor is alive. A fully isolated dead
    ///   cell drops out of the dirty set entirely.
    pub fn evaluate_with(
        &self,
        idx: CellIdx,
        alive: bool,
        live_neighbors: u8,
        rules: RuleSet,
        sinks: &mut EnqueueSinks<'_>,
    ) -> Outcome {
        let cell = self.cell(idx);
        debug_assert!(
            !cell.is_evaluated(),
            "cell {idx} evaluated twice in one generation"
        );

        let outcome = rules.classify(alive, live_neighbors);
        match outcome {
            Outcome::Birth | Outcome::Survive => {
                cell.set_pending(true);
                self.enqueue_next_step(idx, sinks);
                self.enqueue_update(idx, sinks);
                if outcome == Outcome::Birth {
                    for &nb in self.neighbors(idx) {
                        self.enqueue_next_step(nb, sinks);
                    }
                }
            }
            Outcome::Death => {
                cell.set_pending(false);
                if live_neighbors != 0 {
                    self.enqueue_next_step(idx, sinks);
                }
                self.enqueue_update(idx, sinks);
            }
            Outcome::StaysDead => {
                if live_neighbors != 0 {
                    self.enqueue_next_step(idx, sinks);
                    self.enqueue_update(idx, sinks);
                }
            }
        }
        cell.mark_evaluated();
        outcome
    }

    /// Commit one cell's staged liveness. Returns whether it changed.
    pub fn commit(&self, idx: CellIdx) -> bool {
        self.cell(idx).commit()
    }

    /// Release a queued cell's schedule flags as it is copied into a
    /// work partition during the requeue phase.
    #[inline]
    pub fn reset_for_schedule(&self, idx: CellIdx) {
        self.cell(idx).reset_for_schedule();
    }

    /// Directly overwrite a cell's liveness (controller seeding path,
    /// between generations only). Returns whether the value changed.
    pub fn set_alive(&self, idx: CellIdx, alive: bool) -> bool {
        self.cell(idx).set_alive(alive)
    }

    fn enqueue_next_step(&self, idx: CellIdx, sinks: &mut EnqueueSinks<'_>) {
        if self.cell(idx).claim_next_step() {
            sinks.next_step.push(idx);
        }
    }

    fn enqueue_update(&self, idx: CellIdx, sinks: &mut EnqueueSinks<'_>) {
        if self.cell(idx).claim_commit() {
            sinks.updates.push(idx);
        }
    }
}
