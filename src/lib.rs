//! Demonstrates the cost of false sharing between threads.
//!
//! [`CacheGeometry::probe`] detects the cache line size and core count of the
//! host, and [`Harness`] runs two otherwise identical workloads over a shared
//! [`CounterArray`]: one where every thread writes its own cache line, and one
//! where all threads write neighbouring counters on the same line. The
//! criterion benchmarks in `benches/` time both.

pub mod config;
pub mod constants;
pub mod counters;
pub mod error;
pub mod geometry;
pub mod harness;
mod sync;
mod utils;
mod worker;

pub use config::HarnessConfig;
pub use counters::CounterArray;
pub use error::{Error, Result};
pub use geometry::CacheGeometry;
pub use harness::{Harness, Scenario, ScenarioReport};

pub mod prelude {
    pub use crate::config::HarnessConfig;
    pub use crate::error::Error;
    pub use crate::geometry::CacheGeometry;
    pub use crate::harness::{Harness, Scenario, ScenarioReport};
}
