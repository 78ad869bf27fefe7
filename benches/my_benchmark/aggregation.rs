use crate::loading::{generate_named_csv, generate_positional_csv};
use criterion::{black_box, Criterion};
use lookup_chart::api::presets::hash_size_keys;
use lookup_chart::loader::named::{parse_named, NamedColumns};
use lookup_chart::loader::positional::{parse_positional, PositionalColumns};
use lookup_chart::prelude::*;

pub fn bench_bucket_samples(c: &mut Criterion) {
    let keys = hash_size_keys();
    let mut group = c.benchmark_group("bucket_samples");

    for rows in [1_000, 100_000] {
        let data = generate_positional_csv(rows);
        let samples = parse_positional(
            data.as_bytes(),
            &PositionalColumns::two_column(),
            &keys,
            UnitPolicy::PassThrough,
        )
        .unwrap();

        group.bench_function(format!("{} samples", rows), |b| {
            b.iter(|| {
                let buckets =
                    BucketSet::from_samples(black_box(&keys), black_box(samples.iter().copied()));
                buckets.means()
            })
        });
    }

    group.finish();
}

pub fn bench_build_chart_data(c: &mut Criterion) {
    let keys = hash_size_keys();
    let files: Vec<BucketSet> = (0..16)
        .map(|_| {
            let data = generate_positional_csv(10_000);
            let samples = parse_positional(
                data.as_bytes(),
                &PositionalColumns::two_column(),
                &keys,
                UnitPolicy::PassThrough,
            )
            .unwrap();
            BucketSet::from_samples(&keys, samples)
        })
        .collect();
    let categories: Vec<String> = (25..=40).map(|x: u32| x.to_string()).collect();

    let named_data = generate_named_csv(100_000);
    let named_samples = parse_named(
        named_data.as_bytes(),
        &NamedColumns {
            key_column: "K".to_string(),
            value_column: "lookup_time".to_string(),
            series_column: Some("hash_size".to_string()),
        },
        None,
        UnitPolicy::PassThrough,
    )
    .unwrap();

    let mut group = c.benchmark_group("build_chart_data");
    group.bench_function("indexed files", |b| {
        b.iter(|| {
            ChartData::from_files(
                black_box("nvme_lookup"),
                black_box(categories.clone()),
                black_box(&keys),
                black_box(&files),
            )
        })
    });
    group.bench_function("named columns", |b| {
        b.iter(|| ChartData::from_named(black_box("epyc"), black_box(&named_samples), None))
    });
    group.finish();
}
