//! Mapping cost across the hue circle.

use std::hint::black_box;

use chroma_fm::{Color, ModelKey};
use criterion::{BenchmarkId, Criterion};

pub fn bench_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("mapping");

    // A full sweep hits every anchor segment, including the wrap.
    let colors: Vec<Color> = (0..360)
        .map(|h| Color::new(h as f32, 50.0 + (h % 51) as f32).unwrap())
        .collect();

    for key in ModelKey::ALL {
        let model = key.model();
        group.bench_with_input(BenchmarkId::new("sweep", key), &colors, |b, colors| {
            b.iter(|| {
                for &color in colors {
                    black_box(model.map(black_box(color)));
                }
            })
        });
    }

    group.finish();
}
