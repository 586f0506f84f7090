#![cfg(not(loom))]

use false_sharing::prelude::*;

const ITERATIONS: u64 = 1_000;

fn probed_harness() -> Harness {
    let geometry = CacheGeometry::probe().unwrap();
    Harness::new(geometry, HarnessConfig::new(ITERATIONS).unwrap())
}

#[test]
fn test_counter_array_matches_geometry() {
    let harness = probed_harness();
    let geometry = harness.geometry();
    assert_eq!(
        harness.counters().len(),
        geometry.cache_line_size() * 4 * geometry.core_count() + 1
    );
}

#[test]
fn test_disjoint_scenario_returns() {
    let mut harness = probed_harness();
    let report = harness.run_disjoint().unwrap();

    assert_eq!(report.scenario, Scenario::Disjoint);
    assert_eq!(report.workers(), harness.geometry().core_count());
    assert!(report.completed.iter().all(|&done| done == ITERATIONS));
}

#[test]
fn test_shared_scenario_returns() {
    let mut harness = probed_harness();
    let report = harness.run_shared().unwrap();

    assert_eq!(report.scenario, Scenario::Shared);
    assert_eq!(report.increments_per_worker, ITERATIONS);
    assert_eq!(report.total_increments(), ITERATIONS * harness.geometry().core_count() as u64);
}

#[test]
fn test_scenarios_can_be_repeated() {
    let mut harness = probed_harness();
    for _ in 0..3 {
        harness.run_disjoint().unwrap();
        harness.run_shared().unwrap();
    }
}

#[test]
fn test_more_workers_than_cores() {
    let geometry = CacheGeometry::new(64, 16).unwrap();
    let mut harness = Harness::new(geometry, HarnessConfig::new(ITERATIONS).unwrap());
    assert_eq!(harness.run_shared().unwrap().workers(), 16);
    assert_eq!(harness.run_disjoint().unwrap().workers(), 16);
}
