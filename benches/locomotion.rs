//! Benchmarks for creature locomotion.

use criterion::{criterion_group, criterion_main, Criterion};
use wriggle::*;

fn bench_lizard_frames(c: &mut Criterion) {
    c.bench_function("lizard_4_pairs_60_frames", |b| {
        b.iter(|| {
            let mut sim = Simulation::<f32>::from_seed(1, |rng| {
                BodyPlan::new(6.0, 4, 16).build(Vec2::new(0.0, 0.0), 0.0, rng)
            })
            .unwrap();
            for t in 0..60 {
                let a = t as f32 * 0.05;
                sim.tick(Vec2::new(300.0 * a.cos(), 200.0 * a.sin()));
            }
            sim.creature().position()
        });
    });
}

fn bench_limb_solve(c: &mut Criterion) {
    c.bench_function("limb_8_segments_1000_solves", |b| {
        b.iter(|| {
            let mut rng = seeded(2);
            let mut skeleton: Skeleton<f32> = Skeleton::new(Vec2::new(0.0, 0.0), 0.0);
            let mut parent = Parent::Body;
            let mut end = None;
            for _ in 0..8 {
                let id = skeleton
                    .attach(parent, SegmentDef::new(10.0).with_angle(0.2).with_range(1.5), &mut rng)
                    .unwrap();
                parent = Parent::Segment(id);
                end = Some(id);
            }
            let mut limb = Limb::new(&skeleton, end.unwrap(), LimbConfig::new(8, 5.0)).unwrap();
            let frame = Frame::at_rest();
            for t in 0..1000 {
                let a = t as f32 * 0.01;
                limb.move_to(&mut skeleton, &frame, Vec2::new(60.0 * a.cos(), 60.0 * a.sin()));
            }
            skeleton.segment(limb.end()).position()
        });
    });
}

criterion_group!(benches, bench_lizard_frames, bench_limb_solve);
criterion_main!(benches);
