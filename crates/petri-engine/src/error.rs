//! Error types for board construction and stepping.

use crate::pattern::PatternError;
use petri_grid::GridError;
use std::error::Error;
use std::fmt;

/// Errors detected while constructing a [`Board`](crate::Board).
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid dimensions are invalid.
    Grid(GridError),
    /// The initial pattern could not be parsed.
    Pattern(PatternError),
    /// A worker thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of which thread failed and why.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Pattern(e) => write!(f, "pattern: {e}"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Pattern(e) => Some(e),
            Self::ThreadSpawnFailed { .. } => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<PatternError> for ConfigError {
    fn from(e: PatternError) -> Self {
        Self::Pattern(e)
    }
}

/// Errors from an in-flight [`Board::step`](crate::Board::step).
///
/// A worker fault is fatal to the generation: the barrier can never
/// complete with a partial arrival, so the pool is disabled and the board
/// is left in an unspecified intermediate state. Changed-cell queries are
/// meaningless until a subsequent successful step — which, after a fault,
/// cannot happen on this board.
#[derive(Debug, PartialEq, Eq)]
pub enum StepError {
    /// A worker thread panicked or died during a phase.
    WorkerFault {
        /// Index of the faulting worker.
        worker: usize,
        /// The panic message, when one could be recovered.
        reason: String,
    },
    /// Stepping is disabled after an earlier worker fault.
    Disabled,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WorkerFault { worker, reason } => {
                write!(f, "worker {worker} faulted: {reason}")
            }
            Self::Disabled => write!(f, "stepping disabled after a worker fault"),
        }
    }
}

impl Error for StepError {}
