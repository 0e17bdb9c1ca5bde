//! Board configuration and validation.

use crate::error::ConfigError;
use petri_grid::Torus;
use petri_rules::RuleSet;

/// Complete configuration for constructing a [`Board`](crate::Board).
///
/// # Examples
///
/// ```
/// use petri_engine::BoardConfig;
///
/// let config = BoardConfig {
///     width: 64,
///     height: 64,
///     workers: Some(2),
///     ..BoardConfig::default()
/// };
/// assert_eq!(config.resolved_worker_count(), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BoardConfig {
    /// Board width in cells.
    pub width: u32,
    /// Board height in cells.
    pub height: u32,
    /// The active rule set.
    pub rules: RuleSet,
    /// Number of worker threads. `None` selects the default of
    /// [`DEFAULT_WORKERS`](Self::DEFAULT_WORKERS).
    pub workers: Option<usize>,
}

impl BoardConfig {
    /// Worker thread count used when none is configured.
    pub const DEFAULT_WORKERS: usize = 4;

    /// Upper bound on the configured worker count.
    pub const MAX_WORKERS: usize = 64;

    /// Resolve the actual worker count.
    ///
    /// Explicit values are clamped to `[1, MAX_WORKERS]` — zero workers
    /// would make a board that can never step.
    pub fn resolved_worker_count(&self) -> usize {
        match self.workers {
            Some(n) => n.clamp(1, Self::MAX_WORKERS),
            None => Self::DEFAULT_WORKERS,
        }
    }

    /// Validate the structural invariants without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Torus::new(self.width, self.height)?;
        Ok(())
    }
}

impl Default for BoardConfig {
    /// 100×100 Conway board with the default worker count.
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            rules: RuleSet::CONWAY,
            workers: None,
        }
    }
}
