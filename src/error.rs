use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to query available parallelism: {0}")]
    Probe(#[source] io::Error),

    #[error("invalid cache geometry: {cache_line_size} byte cache line, {core_count} cores")]
    InvalidGeometry {
        cache_line_size: usize,
        core_count: usize,
    },

    #[error("invalid iteration count {value:?}: expected a positive integer")]
    InvalidIterationCount { value: String },

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("worker {worker} panicked")]
    WorkerPanicked { worker: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
