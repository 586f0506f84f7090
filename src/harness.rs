//! Contention benchmark harness.
//!
//! Both scenarios spawn one thread per core and make every thread increment
//! its own counter a fixed number of times. They differ only in where those
//! counters live:
//!
//! - [`Scenario::Disjoint`] spreads the counters several cache lines apart, so
//!   each core keeps its line in its own cache.
//! - [`Scenario::Shared`] packs the counters next to each other, so every write
//!   invalidates the line in the other cores' caches (false sharing).

use crate::config::HarnessConfig;
use crate::counters::CounterArray;
use crate::error::{Error, Result};
use crate::geometry::CacheGeometry;
use crate::sync::Arc;
use crate::worker::Worker;
use log::{debug, info};
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Worker `i` increments counter `i * cache_line_size * 4`.
    Disjoint,
    /// Worker `i` increments counter `i`.
    Shared,
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Disjoint => "disjoint_access",
            Scenario::Shared => "shared_access",
        }
    }

    /// Counter index written by `worker` in this scenario.
    pub fn index_for(&self, geometry: &CacheGeometry, worker: usize) -> usize {
        match self {
            Scenario::Disjoint => geometry.disjoint_index(worker),
            Scenario::Shared => geometry.shared_index(worker),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one scenario run.
#[derive(Clone, Debug)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    /// Increments each worker was asked to perform.
    pub increments_per_worker: u64,
    /// Increments each worker reported back, indexed by worker.
    pub completed: Vec<u64>,
    /// Wall-clock time from the first spawn to the last join.
    pub elapsed: Duration,
}

impl ScenarioReport {
    pub fn workers(&self) -> usize {
        self.completed.len()
    }

    pub fn total_increments(&self) -> u64 {
        self.completed.iter().sum()
    }

    pub fn nanos_per_increment(&self) -> f64 {
        match self.total_increments() {
            0 => 0.0,
            total => self.elapsed.as_nanos() as f64 / total as f64,
        }
    }
}

/// Runs the contention scenarios over a counter array sized for `geometry`.
pub struct Harness {
    geometry: CacheGeometry,
    config: HarnessConfig,
    counters: Arc<CounterArray>,
}

impl Harness {
    pub fn new(geometry: CacheGeometry, config: HarnessConfig) -> Self {
        Self {
            geometry,
            config,
            counters: Arc::new(CounterArray::for_geometry(&geometry)),
        }
    }

    pub fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    pub fn config(&self) -> HarnessConfig {
        self.config
    }

    /// The shared counters. No worker is running while this borrow is alive.
    pub fn counters(&self) -> &CounterArray {
        &self.counters
    }

    /// Zero every counter. Keeps long benchmark sessions from wrapping the counters.
    pub fn reset_counters(&mut self) {
        self.counters.clear();
    }

    pub fn run_disjoint(&mut self) -> Result<ScenarioReport> {
        self.run(Scenario::Disjoint)
    }

    pub fn run_shared(&mut self) -> Result<ScenarioReport> {
        self.run(Scenario::Shared)
    }

    /// Spawn one worker per core for `scenario` and wait for all of them.
    ///
    /// Every worker that was started is joined before this returns, including
    /// when a later spawn fails or a worker panics.
    pub fn run(&mut self, scenario: Scenario) -> Result<ScenarioReport> {
        let iterations = self.config.iteration_count();
        let core_count = self.geometry.core_count();
        debug!("starting {scenario}: {core_count} workers x {iterations} increments");

        let start = Instant::now();
        let mut handles = Vec::with_capacity(core_count);
        let mut spawn_error = None;

        for worker in 0..core_count {
            let index = scenario.index_for(&self.geometry, worker);
            debug!(
                "{scenario} worker {worker}: counter {index}, cache line {}",
                self.geometry.cache_line_of(index)
            );
            let name = format!("false-sharing-{scenario}-{worker}");
            match Worker::new(name, Arc::clone(&self.counters), index, iterations).start() {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_error = Some(e);
                    break;
                }
            }
        }

        let mut completed = Vec::with_capacity(handles.len());
        let mut panicked = None;
        for (worker, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(done) => completed.push(done),
                Err(_) => {
                    panicked.get_or_insert(worker);
                }
            }
        }
        let elapsed = start.elapsed();

        if let Some(e) = spawn_error {
            return Err(Error::Spawn(e));
        }
        if let Some(worker) = panicked {
            return Err(Error::WorkerPanicked { worker });
        }

        let report = ScenarioReport {
            scenario,
            increments_per_worker: iterations,
            completed,
            elapsed,
        };
        info!(
            "{scenario} finished in {:?} ({:.3} ns/increment)",
            report.elapsed,
            report.nanos_per_increment()
        );
        Ok(report)
    }
}

#[cfg(all(test, not(loom)))]
mod tests {
    use super::*;

    fn harness(cache_line_size: usize, core_count: usize, iterations: u64) -> Harness {
        let geometry = CacheGeometry::new(cache_line_size, core_count).unwrap();
        Harness::new(geometry, HarnessConfig::new(iterations).unwrap())
    }

    #[test]
    fn test_scenario_names() {
        assert_eq!(Scenario::Disjoint.to_string(), "disjoint_access");
        assert_eq!(Scenario::Shared.name(), "shared_access");
    }

    #[test]
    fn test_scenario_indices() {
        let geometry = CacheGeometry::new(64, 4).unwrap();
        let disjoint: Vec<usize> = (0..4).map(|w| Scenario::Disjoint.index_for(&geometry, w)).collect();
        let shared: Vec<usize> = (0..4).map(|w| Scenario::Shared.index_for(&geometry, w)).collect();
        assert_eq!(disjoint, vec![0, 256, 512, 768]);
        assert_eq!(shared, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_disjoint_touches_only_assigned_counters() {
        let mut harness = harness(64, 4, 1_000);
        let report = harness.run_disjoint().unwrap();
        assert_eq!(report.completed, vec![1_000; 4]);

        let snapshot = harness.counters().snapshot();
        assert_eq!(snapshot.len(), 1025);
        for (index, value) in snapshot.iter().enumerate() {
            let expected = if index % 256 == 0 && index < 1024 { 1_000 } else { 0 };
            assert_eq!(*value, expected, "counter {index}");
        }
    }

    #[test]
    fn test_shared_touches_leading_counters() {
        let mut harness = harness(64, 4, 1_000);
        let report = harness.run_shared().unwrap();
        assert_eq!(report.total_increments(), 4_000);

        let snapshot = harness.counters().snapshot();
        assert_eq!(&snapshot[..5], &[1_000, 1_000, 1_000, 1_000, 0]);
    }

    #[test]
    fn test_single_core() {
        let mut harness = harness(64, 1, 10);
        assert_eq!(harness.run_disjoint().unwrap().workers(), 1);
        assert_eq!(harness.run_shared().unwrap().workers(), 1);
        // Both scenarios hit counter 0 when there is a single worker.
        assert_eq!(harness.counters().snapshot()[0], 20);
    }

    #[test]
    fn test_reset_counters() {
        let mut harness = harness(64, 2, 100);
        harness.run_shared().unwrap();
        assert_eq!(&harness.counters().snapshot()[..2], &[100, 100]);

        harness.reset_counters();
        assert!(harness.counters().snapshot().iter().all(|&v| v == 0));
        assert_eq!(harness.config().iteration_count(), 100);
    }

    #[test]
    fn test_report_rates() {
        let report = ScenarioReport {
            scenario: Scenario::Shared,
            increments_per_worker: 50,
            completed: vec![50, 50],
            elapsed: Duration::from_nanos(200),
        };
        assert_eq!(report.total_increments(), 100);
        assert_eq!(report.nanos_per_increment(), 2.0);
    }
}
