use crate::constants::{DEFAULT_ITERATION_COUNT, ITERATION_COUNT_ENV};
use crate::error::{Error, Result};

/// Workload parameters of the contention harness.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    iteration_count: u64,
}

impl HarnessConfig {
    /// Create a config where every worker performs `iteration_count` increments.
    pub fn new(iteration_count: u64) -> Result<Self> {
        Self::default().with_iteration_count(iteration_count)
    }

    /// Read the iteration count from `FALSE_SHARING_ITERATIONS`.
    ///
    /// Falls back to [`DEFAULT_ITERATION_COUNT`] when the variable is unset.
    pub fn from_env() -> Result<Self> {
        Self::from_env_value(std::env::var(ITERATION_COUNT_ENV).ok().as_deref())
    }

    pub(crate) fn from_env_value(value: Option<&str>) -> Result<Self> {
        let Some(raw) = value else {
            return Ok(Self::default());
        };

        let iteration_count = raw
            .trim()
            .replace('_', "")
            .parse::<u64>()
            .map_err(|_| Error::InvalidIterationCount { value: raw.to_string() })?;
        Self::new(iteration_count)
    }

    /// Replace the iteration count, rejecting zero.
    pub fn with_iteration_count(mut self, iteration_count: u64) -> Result<Self> {
        if iteration_count == 0 {
            return Err(Error::InvalidIterationCount { value: iteration_count.to_string() });
        }
        self.iteration_count = iteration_count;
        Ok(self)
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self { iteration_count: DEFAULT_ITERATION_COUNT }
    }
}
