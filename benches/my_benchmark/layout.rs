use criterion::{black_box, Criterion};
use lookup_chart::layout::bar_layout::series_offsets;
use lookup_chart::prelude::*;

pub fn bench_bar_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("bar_layout");

    for series in [8, 32] {
        group.bench_function(format!("offsets {}", series), |b| {
            b.iter(|| series_offsets(black_box(series), black_box(0.35)))
        });

        group.bench_function(format!("extents 16x{}", series), |b| {
            b.iter(|| {
                let layout = BarLayout::new(black_box(16), black_box(series), 0.1, 0.35);
                let mut total = 0.0;
                for category in 0..layout.categories() {
                    for bar in 0..layout.series() {
                        let (left, right) = layout.extent(category, bar);
                        total += right - left;
                    }
                }
                total
            })
        });
    }

    group.finish();
}
