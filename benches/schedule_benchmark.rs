use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lanepilot::config::{LaneCountMode, SessionOptions};
use lanepilot::jitter::bell_curve_offset_ms;
use lanepilot::model::note::HitObject;
use lanepilot::model::partition::partition;
use lanepilot::player::schedule::schedule_object;

fn schedule_benchmark(c: &mut Criterion) {
    c.bench_function("schedule_tap_with_successor", |b| {
        let obj = HitObject::tap(64, 1000);
        let next = HitObject::tap(64, 1040);
        b.iter(|| {
            schedule_object(
                black_box(&obj),
                black_box(Some(&next)),
                black_box(0),
                black_box(15),
                black_box(-3),
                black_box(4),
            )
        });
    });

    c.bench_function("bell_curve_offset", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| bell_curve_offset_ms(&mut rng, black_box(30)));
    });
}

fn partition_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    let objects: Vec<HitObject> = (0..10_000i64)
        .map(|i| HitObject::tap(64 + (i % 4) * 128, i * 25))
        .collect();

    group.bench_function("fixed_4k_10k_objects", |b| {
        let options = SessionOptions {
            lane_count: LaneCountMode::Fixed(4),
            ..Default::default()
        };
        b.iter(|| partition(black_box(&objects), &options).unwrap());
    });

    group.bench_function("auto_10k_objects", |b| {
        let options = SessionOptions::default();
        b.iter(|| partition(black_box(&objects), &options).unwrap());
    });

    group.finish();
}

criterion_group!(benches, schedule_benchmark, partition_benchmark);
criterion_main!(benches);
