// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use understory_timeline_lens::{
    BaseScale, Event, FocusLens, FocusTransform, Lanes, LensConfig, Link, RelationKind,
    ScaleFactors, Timeline, classify,
};

const WIDTH: f64 = 4_000.0;
const HALF_WINDOW: f64 = 10.0;

/// `len` back-to-back turns over four speakers, every fifth one linked back.
fn timeline(len: u32) -> Timeline<u32> {
    let mut t = 0.0;
    let mut events = Vec::with_capacity(len as usize);
    for i in 0..len {
        let d = 2.0 + f64::from(i % 5);
        events.push(Event::new(i, t, t + d, (i % 4) as usize));
        t += d + 0.5;
    }
    let links = (1..len)
        .step_by(5)
        .map(|i| Link::new(i, i - 1, RelationKind::Inference))
        .collect();
    Timeline::new(events, links).unwrap()
}

fn config() -> LensConfig {
    LensConfig::default()
        .with_diagram_width(WIDTH)
        .with_half_window(HALF_WINDOW)
}

fn bench_classify_and_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("lens/transform");

    for len in [256_u32, 1_024, 4_096] {
        let tl = timeline(len);
        let scale = BaseScale::for_timeline(&tl, WIDTH);
        let bars = scale.bars(&tl);
        group.throughput(Throughput::Elements(u64::from(len)));

        group.bench_with_input(BenchmarkId::new("classify", len), &bars, |b, bars| {
            b.iter(|| black_box(classify(bars, black_box(WIDTH / 2.0), HALF_WINDOW)));
        });

        let buckets = classify(&bars, WIDTH / 2.0, HALF_WINDOW);
        group.bench_with_input(BenchmarkId::new("compute", len), &bars, |b, bars| {
            b.iter(|| {
                black_box(FocusTransform::compute(
                    &buckets,
                    bars,
                    scale.diagram_length(),
                    &ScaleFactors::default(),
                ))
            });
        });
    }

    group.finish();
}

fn bench_focus_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("lens/update");

    // Drag the focus across the whole diagram one pixel at a time; most steps
    // keep the window endpoints and skip the layout.
    for len in [256_u32, 1_024, 4_096] {
        let steps = WIDTH as u32;
        group.throughput(Throughput::Elements(u64::from(steps)));
        group.bench_with_input(BenchmarkId::new("sweep", len), &len, |b, &len| {
            b.iter_batched(
                || FocusLens::new(timeline(len), config(), Lanes::new(4, 0.0..200.0)).unwrap(),
                |mut lens| {
                    for x in 0..steps {
                        black_box(lens.update(f64::from(x)));
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify_and_compute, bench_focus_sweep);
criterion_main!(benches);
