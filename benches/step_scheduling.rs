// SPDX-License-Identifier: MPL-2.0
use checkpace::application::port::ProgressEvent;
use checkpace::domain::pacing::{Pacing, PacingState, Segment};
use checkpace::infrastructure::{MediaScript, SimulatedMediaSource};
use checkpace::pacing::{compute_step, clamp_target, PlaybackController, Tuning};
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::{Duration, Instant};

fn step_computation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_scheduling");

    group.bench_function("compute_step_and_targets", |b| {
        b.iter(|| {
            let step = compute_step(black_box(Some(30.0)), 3.0, 25, 0.08, 0.2);
            (1..=25u32)
                .map(|n| clamp_target(3.0 + f64::from(n) * step, Some(30.0), 0.05))
                .sum::<f64>()
        });
    });

    group.finish();
}

fn paced_segment_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("paced_segment");
    let frame = Duration::from_millis(20);

    group.bench_function("play_to_checkpoint_and_clear", |b| {
        b.iter(|| {
            let (source, mut notifications) = SimulatedMediaSource::new();
            source.add_media("clip", MediaScript::with_duration(Some(30.0)));
            let mut controller =
                PlaybackController::new(source.clone(), Vec::<ProgressEvent>::new(), Tuning::default());
            controller
                .start_segment(Segment::paced("clip", Pacing::new(3.0, 25)))
                .unwrap();

            let now = Instant::now();
            while controller.state() != PacingState::AwaitingInput {
                source.advance(frame);
                while let Ok(notification) = notifications.try_recv() {
                    controller.handle_notification(notification);
                }
                controller.tick(now);
            }
            for _ in 0..25 {
                black_box(controller.advance(now));
            }
            controller.state()
        });
    });

    group.finish();
}

criterion_group!(benches, step_computation_benchmark, paced_segment_benchmark);
criterion_main!(benches);
