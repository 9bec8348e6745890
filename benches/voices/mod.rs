//! Rendering cost of complete voices.
//!
//! Durations are stretched so the voice is still sounding however many
//! blocks criterion asks for.

use std::hint::black_box;

use chroma_fm::{graph::OfflineHost, ModelKey, Swatch, SynthParams, VoiceEngine};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

fn sustained(key: ModelKey, swatch: Swatch) -> SynthParams {
    let mut params = key.model().map(swatch.color());
    params.duration = 1.0e6;
    params
}

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Messiaen: three serial operators plus the sub layer
        let mut messiaen = VoiceEngine::new(OfflineHost::new(SAMPLE_RATE));
        messiaen
            .play(&sustained(ModelKey::Messiaen, Swatch::Purple))
            .unwrap();

        group.bench_with_input(BenchmarkId::new("messiaen", size), &size, |b, _| {
            b.iter(|| {
                messiaen.host_mut().render_block(black_box(&mut buffer));
            })
        });

        // Kandinsky: two operators, non-sine carrier, no sub
        let mut kandinsky = VoiceEngine::new(OfflineHost::new(SAMPLE_RATE));
        kandinsky
            .play(&sustained(ModelKey::Kandinsky, Swatch::Yellow))
            .unwrap();

        group.bench_with_input(BenchmarkId::new("kandinsky", size), &size, |b, _| {
            b.iter(|| {
                kandinsky.host_mut().render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

pub fn bench_overlap(c: &mut Criterion) {
    let mut group = c.benchmark_group("voices/overlap");
    let size = 256;
    let mut buffer = vec![0.0f32; size];

    for count in [1usize, 4, 16] {
        let mut engine = VoiceEngine::new(OfflineHost::new(SAMPLE_RATE));
        for (i, swatch) in Swatch::ALL.iter().cycle().take(count).enumerate() {
            let key = ModelKey::ALL[i % ModelKey::ALL.len()];
            engine.play(&sustained(key, *swatch)).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("voices", count), &count, |b, _| {
            b.iter(|| {
                engine.host_mut().render_block(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
