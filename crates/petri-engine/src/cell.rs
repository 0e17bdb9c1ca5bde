//! Per-cell state: liveness, staged next liveness, and queue-claim flags.

use std::sync::atomic::{AtomicBool, Ordering};

/// One board position's mutable state.
///
/// A cell's identity is its arena index; this struct holds only the flags.
/// Liveness fields are written by exactly one worker per phase (partition
/// disjointness), but the queue-claim flags can be hit by up to eight
/// neighbor evaluations racing on different workers, so claiming is a
/// single compare-and-set per flag — the thread that flips the flag owns
/// the enqueue.
#[derive(Debug, Default)]
pub(crate) struct Cell {
    alive: AtomicBool,
    pending_alive: AtomicBool,
    evaluated: AtomicBool,
    queued_next: AtomicBool,
    queued_commit: AtomicBool,
}

impl Cell {
    /// Current liveness.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Directly overwrite liveness. Controller-only, between generations.
    /// Returns whether the value changed.
    #[inline]
    pub fn set_alive(&self, alive: bool) -> bool {
        self.alive.swap(alive, Ordering::AcqRel) != alive
    }

    /// Stage the liveness this cell will have after the commit phase.
    #[inline]
    pub fn set_pending(&self, alive: bool) {
        self.pending_alive.store(alive, Ordering::Release);
    }

    /// The staged next liveness.
    #[cfg(test)]
    #[inline]
    pub fn pending(&self) -> bool {
        self.pending_alive.load(Ordering::Acquire)
    }

    /// Whether this cell's evaluation already ran this generation.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated.load(Ordering::Acquire)
    }

    /// Record that evaluation ran.
    #[inline]
    pub fn mark_evaluated(&self) {
        self.evaluated.store(true, Ordering::Release);
    }

    /// Claim this cell's slot in the next-step queue.
    ///
    /// Returns `true` for exactly one caller per generation; only that
    /// caller pushes the cell into its buffer.
    #[inline]
    pub fn claim_next_step(&self) -> bool {
        self.queued_next
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Claim this cell's slot in the update (commit) queue.
    #[inline]
    pub fn claim_commit(&self) -> bool {
        self.queued_commit
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether the next-step claim is currently held.
    #[cfg(test)]
    #[inline]
    pub fn is_queued_next(&self) -> bool {
        self.queued_next.load(Ordering::Acquire)
    }

    /// Apply the staged liveness and reset all per-generation flags.
    ///
    /// Returns whether liveness actually changed. After this the cell can
    /// be freshly claimed next generation.
    pub fn commit(&self) -> bool {
        let next = self.pending_alive.load(Ordering::Acquire);
        let was = self.alive.swap(next, Ordering::AcqRel);
        self.pending_alive.store(false, Ordering::Release);
        self.evaluated.store(false, Ordering::Release);
        self.queued_next.store(false, Ordering::Release);
        self.queued_commit.store(false, Ordering::Release);
        was != next
    }

    /// Clear the schedule-related flags when this cell is copied out of
    /// the next-step queue into a work partition.
    ///
    /// Cells that entered the queue only through a neighbor's birth
    /// fan-out are never committed, so this is where their claim is
    /// released. Runs strictly between the commit and evaluate phases.
    #[inline]
    pub fn reset_for_schedule(&self) {
        self.queued_next.store(false, Ordering::Release);
        self.evaluated.store(false, Ordering::Release);
    }
}
