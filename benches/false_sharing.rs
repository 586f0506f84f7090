use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use false_sharing::prelude::*;

fn bench_false_sharing(c: &mut Criterion) {
    let _ = env_logger::try_init();

    let geometry = CacheGeometry::probe().expect("cache geometry");
    println!("{geometry}");

    let mut harness = Harness::new(geometry, HarnessConfig::from_env().expect("FALSE_SHARING_ITERATIONS"));
    let config = harness.config();

    let mut group = c.benchmark_group("false_sharing");
    group.sample_size(10);
    group.throughput(Throughput::Elements(geometry.core_count() as u64 * config.iteration_count()));

    group.bench_function(Scenario::Disjoint.name(), |b| {
        b.iter(|| {
            std::hint::black_box(harness.run_disjoint().expect("disjoint scenario"));
        });
    });

    harness.reset_counters();
    group.bench_function(Scenario::Shared.name(), |b| {
        b.iter(|| {
            std::hint::black_box(harness.run_shared().expect("shared scenario"));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_false_sharing);
criterion_main!(benches);
