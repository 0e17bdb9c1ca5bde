//! Work-queue plumbing: per-worker enqueue buffers, the frozen shared
//! next-step queue, and the deterministic partition assignment.

use petri_grid::CellIdx;
use std::ops::Range;
use std::sync::Arc;

/// The per-worker enqueue buffers a cell evaluation writes into.
///
/// The at-most-once guarantee lives in the cells' claim flags, not here:
/// the arena claims a cell's flag first and pushes only on winning, so
/// these are plain vectors owned by one worker — no shared mutation on
/// the hot path.
pub(crate) struct EnqueueSinks<'a> {
    /// Cells to re-evaluate next generation.
    pub next_step: &'a mut Vec<CellIdx>,
    /// Cells whose staged liveness must be committed this generation.
    pub updates: &'a mut Vec<CellIdx>,
}

/// The generation's shared next-step queue, frozen for the requeue phase.
///
/// Holds every worker's next-step buffer from the evaluate phase (or the
/// controller's seed list). Workers never mutate it — each reads its own
/// [`chunk`](FrozenQueue::chunk) while merging the queue into its private
/// evaluate partition.
#[derive(Debug)]
pub(crate) struct FrozenQueue {
    buffers: Vec<Vec<CellIdx>>,
    total: usize,
}

impl FrozenQueue {
    /// Freeze a set of per-worker buffers.
    pub fn new(buffers: Vec<Vec<CellIdx>>) -> Self {
        let total = buffers.iter().map(Vec::len).sum();
        Self { buffers, total }
    }

    /// Freeze a single buffer (the controller's seed list).
    pub fn single(buffer: Vec<CellIdx>) -> Self {
        Self::new(vec![buffer])
    }

    /// Freeze behind an `Arc` for broadcast to the pool.
    pub fn shared(buffers: Vec<Vec<CellIdx>>) -> Arc<Self> {
        Arc::new(Self::new(buffers))
    }

    /// Number of queued cells.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// All queued cells in buffer order.
    pub fn iter(&self) -> impl Iterator<Item = CellIdx> + '_ {
        self.buffers.iter().flatten().copied()
    }

    /// The contiguous slice of the concatenated queue assigned to
    /// `worker` out of `worker_count`.
    ///
    /// Chunks are evenly sized with the remainder going to the first few
    /// workers: disjoint, covering, and balanced within one cell.
    pub fn chunk(&self, worker: usize, worker_count: usize) -> impl Iterator<Item = CellIdx> + '_ {
        let range = chunk_range(self.total, worker_count, worker);
        let len = range.len();
        self.iter().skip(range.start).take(len)
    }
}

/// The index range of `worker`'s chunk of a `total`-element queue.
pub(crate) fn chunk_range(total: usize, worker_count: usize, worker: usize) -> Range<usize> {
    debug_assert!(worker < worker_count);
    let base = total / worker_count;
    let remainder = total % worker_count;
    let start = worker * base + worker.min(remainder);
    let len = base + usize::from(worker < remainder);
    start..start + len
}
