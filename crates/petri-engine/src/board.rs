//! The board: cell grid ownership and generation orchestration.
//!
//! [`Board`] owns the cell arena, the active rule set, and the worker
//! pool, and drives one generation per [`step()`](Board::step) call:
//! evaluate → commit → requeue, each a full barrier round across every
//! worker. The controller thread never touches cell state during a step —
//! it only broadcasts phase commands and waits on the barrier.
//!
//! All mutating methods take `&mut self`, so the borrow checker enforces
//! the protocol's "between generations only" rules (edits, rule swaps,
//! state queries) at compile time.

use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexSet;

use crate::arena::Arena;
use crate::config::BoardConfig;
use crate::error::{ConfigError, StepError};
use crate::pattern::Pattern;
use crate::queue::FrozenQueue;
use crate::worker::WorkerPool;
use petri_grid::{CellIdx, Generation, GridError};
use petri_rules::RuleSet;

/// Counters and timing for one completed generation.
#[derive(Clone, Copy, Debug, Default)]
pub struct StepMetrics {
    /// Cells evaluated this generation (the dirty set that was due).
    pub evaluated: usize,
    /// Cells whose staged liveness was committed.
    pub committed: usize,
    /// Cells whose liveness actually flipped.
    pub changed: usize,
    /// Cells scheduled for the next generation (next dirty-set size).
    pub requeued: usize,
    /// Wall-clock duration of the whole step.
    pub elapsed: Duration,
}

/// Result of a successful [`Board::step`] call.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// The generation counter after this step (1 after the first step).
    pub generation: Generation,
    /// Every cell whose liveness flipped, sorted by arena index. The
    /// ordering makes output independent of the worker count.
    pub changed: Vec<CellIdx>,
    /// Counters and timing for this step.
    pub metrics: StepMetrics,
}

/// A toroidal life board stepped by a fixed worker pool.
///
/// # Examples
///
/// ```
/// use petri_engine::Board;
///
/// let mut board = Board::from_rows(&[
///     ".....",
///     ".###.",
///     ".....",
/// ], '#').unwrap();
/// let outcome = board.step().unwrap();
/// assert_eq!(outcome.changed.len(), 4); // two ends die, two cells born
/// assert_eq!(board.render('.', '#'), "..#..\n..#..\n..#..");
/// ```
pub struct Board {
    arena: Arc<Arena>,
    rules: RuleSet,
    pool: WorkerPool,
    generation: Generation,
    /// Cells awaiting distribution into evaluate partitions: the initial
    /// pattern before generation 0, then any edited neighborhoods.
    /// Insertion-ordered set, so distribution is deterministic.
    seeds: IndexSet<CellIdx>,
    /// Mirror of what the worker partitions currently hold, used to
    /// avoid seeding a cell that is already scheduled.
    scheduled: IndexSet<CellIdx>,
    /// Changed cells of the most recently completed generation.
    changed: Vec<CellIdx>,
    last_metrics: StepMetrics,
}

impl Board {
    /// Build an empty board from a configuration.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        let torus = petri_grid::Torus::new(config.width, config.height)?;
        let arena = Arc::new(Arena::new(torus));
        let pool = WorkerPool::spawn(Arc::clone(&arena), config.resolved_worker_count())?;
        Ok(Self {
            arena,
            rules: config.rules,
            pool,
            generation: Generation::default(),
            seeds: IndexSet::new(),
            scheduled: IndexSet::new(),
            changed: Vec::new(),
            last_metrics: StepMetrics::default(),
        })
    }

    /// Build a board sized and populated from a [`Pattern`].
    ///
    /// Uses the pattern's embedded rule set when present, otherwise the
    /// config's. The config's width/height are ignored in favor of the
    /// pattern's.
    pub fn from_pattern(pattern: &Pattern, config: BoardConfig) -> Result<Self, ConfigError> {
        let mut board = Self::new(BoardConfig {
            width: pattern.width(),
            height: pattern.height(),
            rules: pattern.rules().unwrap_or(config.rules),
            workers: config.workers,
        })?;
        for (x, y) in pattern.live_cells() {
            // Coordinates come from the pattern's own grid, so they are
            // always in bounds here.
            board
                .set_cell_alive(x, y, true)
                .expect("pattern cell within its own bounds");
        }
        Ok(board)
    }

    /// Build a board from ASCII rows (one character per cell) with the
    /// default rules and worker count.
    pub fn from_rows(rows: &[&str], alive: char) -> Result<Self, ConfigError> {
        let pattern = Pattern::from_rows(rows, alive)?;
        Self::from_pattern(&pattern, BoardConfig::default())
    }

    /// Board width in cells.
    pub fn width(&self) -> u32 {
        self.arena.torus().width()
    }

    /// Board height in cells.
    pub fn height(&self) -> u32 {
        self.arena.torus().height()
    }

    /// The generation counter: 0 on a fresh board, +1 per completed step.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The active rule set.
    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Swap the active rule set. Takes effect from the next step; the
    /// `&mut` receiver keeps swaps out of in-flight generations.
    pub fn set_rules(&mut self, rules: RuleSet) {
        self.rules = rules;
    }

    /// Liveness of the cell at `(x, y)`.
    pub fn is_alive(&self, x: u32, y: u32) -> Result<bool, GridError> {
        let idx = self.arena.torus().index(x, y)?;
        Ok(self.arena.cell(idx).is_alive())
    }

    /// The `(x, y)` coordinate of a changed-cell index.
    pub fn coord(&self, idx: CellIdx) -> (u32, u32) {
        self.arena.torus().coord(idx)
    }

    /// Cells whose liveness flipped during the most recently completed
    /// generation, sorted by arena index.
    ///
    /// After a failed step the list is empty and must not be interpreted
    /// until a subsequent successful step.
    pub fn changed_cells(&self) -> &[CellIdx] {
        &self.changed
    }

    /// Counters from the most recently completed generation.
    pub fn last_metrics(&self) -> StepMetrics {
        self.last_metrics
    }

    /// Set a cell's liveness directly. Between generations only
    /// (enforced by `&mut self`).
    ///
    /// A real change re-seeds the cell and its whole neighborhood into
    /// the next step's evaluate partitions: before generation 0 this is
    /// how the initial pattern enters the dirty set, and later edits
    /// restore the incremental-tracking invariant the same way.
    pub fn set_cell_alive(&mut self, x: u32, y: u32, alive: bool) -> Result<(), GridError> {
        let torus = self.arena.torus();
        let idx = torus.index(x, y)?;
        if self.arena.set_alive(idx, alive) {
            for cell in torus.neighborhood(x, y) {
                if !self.scheduled.contains(&cell) {
                    self.seeds.insert(cell);
                }
            }
        }
        Ok(())
    }

    /// Advance the simulation one generation.
    ///
    /// Runs the evaluate, commit, and requeue phases as full barrier
    /// rounds (with a leading seed-distribution round when edits are
    /// pending), aggregates every worker's changed set, increments the
    /// generation counter, and returns the changes.
    ///
    /// # Errors
    ///
    /// [`StepError::WorkerFault`] if a worker died mid-phase — the board
    /// is then left in an unspecified intermediate state and every
    /// subsequent call returns [`StepError::Disabled`].
    pub fn step(&mut self) -> Result<StepOutcome, StepError> {
        let started = Instant::now();
        self.changed.clear();

        if !self.seeds.is_empty() {
            let seeds: Vec<CellIdx> = self.seeds.drain(..).collect();
            self.pool.seed(Arc::new(FrozenQueue::single(seeds)))?;
        }

        let (buffers, evaluated) = self.pool.evaluate(self.rules)?;
        let (mut changed, committed) = self.pool.commit()?;

        let frozen = FrozenQueue::shared(buffers);
        self.scheduled.clear();
        self.scheduled.extend(frozen.iter());
        let requeued = self.pool.requeue(Arc::clone(&frozen))?;
        debug_assert_eq!(requeued, frozen.len());

        changed.sort_unstable();
        self.changed = changed;
        self.generation = self.generation.next();
        self.last_metrics = StepMetrics {
            evaluated,
            committed,
            changed: self.changed.len(),
            requeued,
            elapsed: started.elapsed(),
        };
        Ok(StepOutcome {
            generation: self.generation,
            changed: self.changed.clone(),
            metrics: self.last_metrics,
        })
    }

    /// Render the board as newline-separated rows.
    pub fn render(&self, dead: char, alive: char) -> String {
        let width = self.width();
        let height = self.height();
        let mut out = String::with_capacity((width as usize + 1) * height as usize);
        for y in 0..height {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..width {
                let idx = self
                    .arena
                    .torus()
                    .index(x, y)
                    .expect("render iterates in bounds");
                out.push(if self.arena.cell(idx).is_alive() {
                    alive
                } else {
                    dead
                });
            }
        }
        out
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Board")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("generation", &self.generation)
            .field("rules", &self.rules.to_string())
            .field("workers", &self.pool.worker_count())
            .field("disabled", &self.pool.is_disabled())
            .finish()
    }
}
