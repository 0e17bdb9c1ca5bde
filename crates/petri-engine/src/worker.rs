//! The worker pool and the phase-barrier protocol.
//!
//! A fixed set of long-lived worker threads executes the three pipeline
//! phases of a generation in lock-step. Rendezvous is a pair of bounded
//! channels per worker: the controller broadcasts a [`Command`] to every
//! worker, then receives every [`Reply`] before issuing the next phase.
//! That send/recv pair is the phase barrier and the sole ordering
//! guarantee in the engine — no worker starts phase *k+1* until every
//! worker has finished phase *k*. Workers park on `recv` between phases;
//! nothing busy-spins.
//!
//! A panic inside a phase body is caught, reported as [`Reply::Fault`],
//! and permanently disables the pool: a partial barrier arrival cannot
//! be resumed safely.

use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, Receiver, Sender};

use crate::arena::Arena;
use crate::error::{ConfigError, StepError};
use crate::queue::{EnqueueSinks, FrozenQueue};
use petri_grid::CellIdx;
use petri_rules::RuleSet;

/// A phase command broadcast by the controller.
#[derive(Debug)]
pub(crate) enum Command {
    /// Append this worker's chunk of the seed queue to its evaluate
    /// partition (initial pattern, or edits between generations).
    Seed {
        /// The controller's frozen seed list.
        queue: Arc<FrozenQueue>,
    },
    /// Drain the evaluate partition through cell evaluation.
    Evaluate {
        /// The active rule set for this generation.
        rules: RuleSet,
    },
    /// Drain the local update partition through cell commit.
    Commit,
    /// Replace the evaluate partition with this worker's chunk of the
    /// frozen next-step queue.
    Requeue {
        /// The generation's frozen next-step queue.
        queue: Arc<FrozenQueue>,
    },
    /// Terminal: stop the worker thread.
    Shutdown,
}

/// A worker's answer to a phase command.
#[derive(Debug)]
pub(crate) enum Reply {
    /// Seed chunk merged; how many cells were appended.
    Seeded {
        /// Cells appended to the partition.
        taken: usize,
    },
    /// Evaluation finished; the worker's next-step buffer travels to the
    /// controller to be frozen for the requeue phase.
    Evaluated {
        /// Cells this worker enqueued for the next generation.
        next_step: Vec<CellIdx>,
        /// Cells this worker evaluated.
        evaluated: usize,
    },
    /// Commits applied.
    Committed {
        /// Cells whose liveness flipped.
        changed: Vec<CellIdx>,
        /// Cells committed (flipped or not).
        committed: usize,
    },
    /// Partition rebuilt from the frozen queue.
    Requeued {
        /// Cells now in the partition.
        taken: usize,
    },
    /// The phase body panicked; the worker has exited.
    Fault {
        /// Recovered panic message.
        reason: String,
    },
}

/// Private state owned by one worker thread.
struct WorkerState {
    index: usize,
    worker_count: usize,
    arena: Arc<Arena>,
    /// Cells this worker evaluates next generation. Disjoint from every
    /// other worker's partition by chunk construction.
    partition: Vec<CellIdx>,
    /// Next-step enqueue buffer, shipped to the controller after each
    /// evaluate phase.
    next_step: Vec<CellIdx>,
    /// Cells this worker claimed for commit during evaluation. Disjoint
    /// across workers by claim ownership.
    updates: Vec<CellIdx>,
}

impl WorkerState {
    fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Seed { queue } => self.merge(&queue, false),
            Command::Evaluate { rules } => self.evaluate(rules),
            Command::Commit => self.commit(),
            Command::Requeue { queue } => self.merge(&queue, true),
            Command::Shutdown => unreachable!("shutdown handled by the loop"),
        }
    }

    /// Merge this worker's chunk of a frozen queue into the partition,
    /// releasing each consumed cell's schedule flags.
    fn merge(&mut self, queue: &FrozenQueue, replace: bool) -> Reply {
        if replace {
            self.partition.clear();
        }
        let before = self.partition.len();
        for idx in queue.chunk(self.index, self.worker_count) {
            self.arena.reset_for_schedule(idx);
            self.partition.push(idx);
        }
        let taken = self.partition.len() - before;
        if replace {
            Reply::Requeued { taken }
        } else {
            Reply::Seeded { taken }
        }
    }

    fn evaluate(&mut self, rules: RuleSet) -> Reply {
        let partition = mem::take(&mut self.partition);
        {
            let mut sinks = EnqueueSinks {
                next_step: &mut self.next_step,
                updates: &mut self.updates,
            };
            for &idx in &partition {
                self.arena.evaluate(idx, rules, &mut sinks);
            }
        }
        let evaluated = partition.len();
        self.partition = partition;
        Reply::Evaluated {
            next_step: mem::take(&mut self.next_step),
            evaluated,
        }
    }

    fn commit(&mut self) -> Reply {
        let mut changed = Vec::new();
        for &idx in &self.updates {
            if self.arena.commit(idx) {
                changed.push(idx);
            }
        }
        let committed = self.updates.len();
        self.updates.clear();
        Reply::Committed { changed, committed }
    }
}

/// Worker thread main loop: receive a command, run it under
/// `catch_unwind`, reply, repeat until shutdown or fault.
fn worker_loop(mut state: WorkerState, commands: Receiver<Command>, replies: Sender<Reply>) {
    while let Ok(command) = commands.recv() {
        if matches!(command, Command::Shutdown) {
            break;
        }
        match panic::catch_unwind(AssertUnwindSafe(|| state.execute(command))) {
            Ok(reply) => {
                if replies.send(reply).is_err() {
                    break;
                }
            }
            Err(payload) => {
                let _ = replies.send(Reply::Fault {
                    reason: panic_reason(payload),
                });
                break;
            }
        }
    }
}

fn panic_reason(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

/// One worker's controller-side endpoints.
struct WorkerHandle {
    commands: Sender<Command>,
    replies: Receiver<Reply>,
    thread: Option<JoinHandle<()>>,
}

/// The fixed pool of worker threads plus the barrier bookkeeping.
pub(crate) struct WorkerPool {
    workers: Vec<WorkerHandle>,
    disabled: bool,
}

impl WorkerPool {
    /// Spawn `worker_count` named worker threads over a shared arena.
    pub fn spawn(arena: Arc<Arena>, worker_count: usize) -> Result<Self, ConfigError> {
        debug_assert!(worker_count > 0);
        let mut workers = Vec::with_capacity(worker_count);
        for index in 0..worker_count {
            // One outstanding command/reply per worker at a time, so both
            // channels are bounded(1).
            let (command_tx, command_rx) = bounded(1);
            let (reply_tx, reply_rx) = bounded(1);
            let state = WorkerState {
                index,
                worker_count,
                arena: Arc::clone(&arena),
                partition: Vec::new(),
                next_step: Vec::new(),
                updates: Vec::new(),
            };
            let thread = std::thread::Builder::new()
                .name(format!("petri-worker-{index}"))
                .spawn(move || worker_loop(state, command_rx, reply_tx))
                .map_err(|e| ConfigError::ThreadSpawnFailed {
                    reason: format!("worker {index}: {e}"),
                })?;
            workers.push(WorkerHandle {
                commands: command_tx,
                replies: reply_rx,
                thread: Some(thread),
            });
        }
        Ok(Self {
            workers,
            disabled: false,
        })
    }

    /// Number of workers in the pool.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Whether an earlier fault has permanently disabled the pool.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Run one phase: broadcast a command to every worker, then collect
    /// every reply. Returning from this function IS the phase barrier.
    fn run_phase(
        &mut self,
        command_for: impl Fn(usize) -> Command,
    ) -> Result<Vec<Reply>, StepError> {
        if self.disabled {
            return Err(StepError::Disabled);
        }
        for (index, worker) in self.workers.iter().enumerate() {
            if worker.commands.send(command_for(index)).is_err() {
                self.disabled = true;
                return Err(StepError::WorkerFault {
                    worker: index,
                    reason: "worker thread terminated".to_string(),
                });
            }
        }
        let mut replies = Vec::with_capacity(self.workers.len());
        for (index, worker) in self.workers.iter().enumerate() {
            match worker.replies.recv() {
                Ok(Reply::Fault { reason }) => {
                    self.disabled = true;
                    return Err(StepError::WorkerFault {
                        worker: index,
                        reason,
                    });
                }
                Ok(reply) => replies.push(reply),
                Err(_) => {
                    self.disabled = true;
                    return Err(StepError::WorkerFault {
                        worker: index,
                        reason: "worker thread terminated without reply".to_string(),
                    });
                }
            }
        }
        Ok(replies)
    }

    /// Seed round: append chunks of the controller's seed list to the
    /// workers' partitions. Returns the total number of cells taken.
    pub fn seed(&mut self, queue: Arc<FrozenQueue>) -> Result<usize, StepError> {
        let replies = self.run_phase(|_| Command::Seed {
            queue: Arc::clone(&queue),
        })?;
        Ok(replies
            .into_iter()
            .map(|reply| match reply {
                Reply::Seeded { taken } => taken,
                other => unreachable!("expected Seeded, got {other:?}"),
            })
            .sum())
    }

    /// Evaluate phase. Returns every worker's next-step buffer and the
    /// total number of cells evaluated.
    pub fn evaluate(&mut self, rules: RuleSet) -> Result<(Vec<Vec<CellIdx>>, usize), StepError> {
        let replies = self.run_phase(|_| Command::Evaluate { rules })?;
        let mut buffers = Vec::with_capacity(replies.len());
        let mut total = 0;
        for reply in replies {
            match reply {
                Reply::Evaluated {
                    next_step,
                    evaluated,
                } => {
                    total += evaluated;
                    buffers.push(next_step);
                }
                other => unreachable!("expected Evaluated, got {other:?}"),
            }
        }
        Ok((buffers, total))
    }

    /// Commit phase. Returns the merged changed-cell list (unsorted) and
    /// the total number of commits applied.
    pub fn commit(&mut self) -> Result<(Vec<CellIdx>, usize), StepError> {
        let replies = self.run_phase(|_| Command::Commit)?;
        let mut all_changed = Vec::new();
        let mut total = 0;
        for reply in replies {
            match reply {
                Reply::Committed { changed, committed } => {
                    total += committed;
                    all_changed.extend(changed);
                }
                other => unreachable!("expected Committed, got {other:?}"),
            }
        }
        Ok((all_changed, total))
    }

    /// Requeue phase: rebuild every partition from the frozen queue.
    /// Returns the total number of cells scheduled for next generation.
    pub fn requeue(&mut self, queue: Arc<FrozenQueue>) -> Result<usize, StepError> {
        let replies = self.run_phase(|_| Command::Requeue {
            queue: Arc::clone(&queue),
        })?;
        Ok(replies
            .into_iter()
            .map(|reply| match reply {
                Reply::Requeued { taken } => taken,
                other => unreachable!("expected Requeued, got {other:?}"),
            })
            .sum())
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Best-effort shutdown: faulted workers are already gone and
        // their channels disconnected.
        for worker in &self.workers {
            let _ = worker.commands.send(Command::Shutdown);
        }
        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petri_grid::Torus;

    fn pool(width: u32, height: u32, workers: usize) -> (Arc<Arena>, WorkerPool) {
        let arena = Arc::new(Arena::new(Torus::new(width, height).unwrap()));
        let pool = WorkerPool::spawn(Arc::clone(&arena), workers).unwrap();
        (arena, pool)
    }

    #[test]
    fn empty_phases_complete() {
        let (_, mut pool) = pool(8, 8, 4);
        let (buffers, evaluated) = pool.evaluate(RuleSet::CONWAY).unwrap();
        assert_eq!(evaluated, 0);
        assert!(buffers.iter().all(Vec::is_empty));
        let (changed, committed) = pool.commit().unwrap();
        assert!(changed.is_empty());
        assert_eq!(committed, 0);
        assert_eq!(pool.requeue(FrozenQueue::shared(vec![])).unwrap(), 0);
    }

    #[test]
    fn seed_distributes_every_cell_once() {
        let (arena, mut pool) = pool(8, 8, 3);
        let seeds: Vec<CellIdx> = (0..10).map(CellIdx).collect();
        let taken = pool.seed(Arc::new(FrozenQueue::single(seeds))).unwrap();
        assert_eq!(taken, 10);

        // Every seeded cell evaluates exactly once: 10 isolated dead
        // cells, so nothing is enqueued anywhere.
        let (buffers, evaluated) = pool.evaluate(RuleSet::CONWAY).unwrap();
        assert_eq!(evaluated, 10);
        assert!(buffers.iter().all(Vec::is_empty));
        drop(arena);
    }

    #[test]
    fn fault_in_a_phase_surfaces_and_disables_the_pool() {
        let (_, mut pool) = pool(4, 4, 2);
        // An index past the arena is a corrupted queue; the worker's
        // panic must surface as a fault, not hang the barrier.
        let poisoned = vec![CellIdx(u32::MAX)];
        let err = pool
            .seed(Arc::new(FrozenQueue::single(poisoned)))
            .unwrap_err();
        match err {
            StepError::WorkerFault { worker, .. } => assert_eq!(worker, 0),
            other => panic!("expected WorkerFault, got {other:?}"),
        }
        assert!(pool.is_disabled());
        assert_eq!(pool.evaluate(RuleSet::CONWAY).unwrap_err(), StepError::Disabled);
    }

    #[test]
    fn shutdown_on_drop_joins_cleanly() {
        let (_, pool) = pool(4, 4, 4);
        drop(pool);
    }
}
