// Available modules
mod aggregation;
mod layout;
mod loading;

// Used Modules
use aggregation::*;
use criterion::{criterion_group, criterion_main, Criterion};
use layout::*;
use loading::*;

#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

fn criterion_benchmark(c: &mut Criterion) {
    bench_parse_positional(c);
    bench_parse_named(c);
    bench_bucket_samples(c);
    bench_build_chart_data(c);
    bench_bar_layout(c);
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(target_os = "windows")]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
