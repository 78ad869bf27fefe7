use criterion::{black_box, Criterion, Throughput};
use lookup_chart::api::presets::{hash_size_keys, HASH_SIZES};
use lookup_chart::loader::named::{parse_named, NamedColumns};
use lookup_chart::loader::positional::{parse_positional, PositionalColumns};
use lookup_chart::prelude::*;
use std::fmt::Write;

/// `hash_size,lookup_time` rows cycling through every hash size.
pub fn generate_positional_csv(rows: usize) -> String {
    let mut csv = String::with_capacity(rows * 16);
    for x in 0..rows {
        let hash_size = HASH_SIZES[x % HASH_SIZES.len()];
        let _ = writeln!(csv, "{},{:.6}", hash_size, 0.001 + (x % 97) as f64 * 1e-5);
    }
    csv
}

/// `K,hash_size,lookup_time` rows over K = 24..=40.
pub fn generate_named_csv(rows: usize) -> String {
    let mut csv = String::from("K,hash_size,lookup_time\n");
    for x in 0..rows {
        let k = 24 + (x % 17);
        let hash_size = HASH_SIZES[(x / 17) % HASH_SIZES.len()];
        let _ = writeln!(csv, "{},{},{:.6}", k, hash_size, 0.002 + (x % 89) as f64 * 1e-5);
    }
    csv
}

pub fn bench_parse_positional(c: &mut Criterion) {
    let keys = hash_size_keys();
    let mut group = c.benchmark_group("parse_positional");

    for rows in [1_000, 100_000] {
        let data = generate_positional_csv(rows);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(format!("{} rows", rows), |b| {
            b.iter(|| {
                parse_positional(
                    black_box(data.as_bytes()),
                    black_box(&PositionalColumns::two_column()),
                    black_box(keys.as_slice()),
                    black_box(UnitPolicy::SecondsToMilliseconds),
                )
            })
        });
    }

    group.finish();
}

pub fn bench_parse_named(c: &mut Criterion) {
    let data = generate_named_csv(100_000);
    let columns = NamedColumns {
        key_column: "K".to_string(),
        value_column: "lookup_time".to_string(),
        series_column: Some("hash_size".to_string()),
    };

    let mut group = c.benchmark_group("parse_named");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("100000 rows", |b| {
        b.iter(|| {
            parse_named(
                black_box(data.as_bytes()),
                black_box(&columns),
                black_box(None),
                black_box(UnitPolicy::PassThrough),
            )
        })
    });
    group.finish();
}
