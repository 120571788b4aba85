use wriggle::{
    seeded, BodyPlan, Frame, Parent, RigError, SegmentDef, SegmentId, Simulation, Skeleton, Vec2,
};

fn lizard_sim(seed: u64) -> Simulation<f64> {
    Simulation::from_seed(seed, |rng| {
        BodyPlan::new(5.0, 2, 10).build(Vec2::new(0.0, 0.0), 0.3, rng)
    })
    .unwrap()
}

fn parent_position(skeleton: &Skeleton<f64>, parent: Parent) -> Vec2<f64> {
    skeleton.pose(parent).0
}

#[test]
fn rigid_links_hold_after_full_relaxation() {
    let mut sim = lizard_sim(1);
    // Let the IK pull leg chains off their hips before relaxing.
    for i in 0..40 {
        sim.tick(Vec2::new(300.0, 40.0 * (i as f64 * 0.1).sin()));
    }
    let field = sim.field().clone();
    let time = sim.time();
    let skeleton = sim.creature_mut().skeleton_mut();
    skeleton.relax_all(&Frame::new(time, &field));

    for (id, seg) in skeleton.iter() {
        let d = seg.position().distance(parent_position(skeleton, seg.parent()));
        assert!(
            (d - seg.size()).abs() < 1e-9,
            "segment {:?}: link length {} should equal size {}",
            id,
            d,
            seg.size(),
        );
    }
}

#[test]
fn relative_angles_stay_within_range() {
    let mut sim = lizard_sim(2);
    for _ in 0..60 {
        sim.tick(Vec2::new(-200.0, 150.0));
    }
    let field = sim.field().clone();
    let time = sim.time();
    let skeleton = sim.creature_mut().skeleton_mut();
    skeleton.relax_all(&Frame::new(time, &field));

    for (id, seg) in skeleton.iter() {
        let (lo, hi) = seg.angle_limits();
        assert!(
            seg.rel_angle() >= lo - 1e-12 && seg.rel_angle() <= hi + 1e-12,
            "segment {:?}: rel angle {} outside [{}, {}]",
            id,
            seg.rel_angle(),
            lo,
            hi,
        );
        assert!(seg.tension() <= 1.0 + 1e-9);
    }
}

#[test]
fn absolute_angle_is_parent_plus_relative() {
    let mut sim = lizard_sim(3);
    for _ in 0..10 {
        sim.tick(Vec2::new(100.0, 100.0));
    }
    let field = sim.field().clone();
    let time = sim.time();
    let skeleton = sim.creature_mut().skeleton_mut();
    skeleton.relax_all(&Frame::new(time, &field));

    for (_, seg) in skeleton.iter() {
        let parent_angle = skeleton.pose(seg.parent()).1;
        assert!((seg.abs_angle() - (parent_angle + seg.rel_angle())).abs() < 1e-9);
    }
}

#[test]
fn relax_without_flex_is_idempotent() {
    let mut rng = seeded(4);
    let mut skeleton: Skeleton<f64> = Skeleton::new(Vec2::new(10.0, -5.0), 1.0);
    let a = skeleton
        .attach(Parent::Body, SegmentDef::new(12.0).with_angle(0.4).with_stiffness(2.0), &mut rng)
        .unwrap();
    let b = skeleton
        .attach(Parent::Segment(a), SegmentDef::new(8.0).with_angle(-0.9), &mut rng)
        .unwrap();

    let frame = Frame::at_rest();
    skeleton.relax(a, true, false, &frame);
    let first: Vec<_> = skeleton.iter().map(|(_, s)| (s.position(), s.rel_angle())).collect();
    skeleton.relax(a, true, false, &frame);
    let second: Vec<_> = skeleton.iter().map(|(_, s)| (s.position(), s.rel_angle())).collect();
    assert_eq!(first, second);
    assert_eq!(skeleton.segment(b).parent(), Parent::Segment(a));
}

#[test]
fn health_scales_size_and_is_clamped() {
    let mut rng = seeded(6);
    let mut skeleton: Skeleton<f32> = Skeleton::new(Vec2::new(0.0, 0.0), 0.0);
    let id = skeleton.attach(Parent::Body, SegmentDef::new(10.0), &mut rng).unwrap();

    skeleton.set_health(id, 0.5).unwrap();
    skeleton.relax(id, false, false, &Frame::at_rest());
    let half = skeleton.segment(id).size();
    assert!(half > 0.5 * 10.0 * 0.97 - 1e-4 && half < 0.5 * 10.0 * 1.03 + 1e-4);

    skeleton.set_health(id, 3.0).unwrap();
    assert_eq!(skeleton.segment(id).health(), 1.0);
    skeleton.set_health(id, -1.0).unwrap();
    assert_eq!(skeleton.segment(id).health(), 0.0);
}

#[test]
fn invalid_definitions_are_rejected() {
    let mut rng = seeded(7);
    let mut skeleton: Skeleton<f32> = Skeleton::new(Vec2::new(0.0, 0.0), 0.0);
    assert_eq!(
        skeleton.attach(Parent::Body, SegmentDef::new(10.0).with_stiffness(0.0), &mut rng),
        Err(RigError::InvalidStiffness),
    );
    assert_eq!(
        skeleton.attach(Parent::Body, SegmentDef::new(f32::NAN), &mut rng),
        Err(RigError::InvalidSize),
    );
    assert_eq!(
        skeleton.attach(Parent::Body, SegmentDef::new(1.0).with_range(-0.1), &mut rng),
        Err(RigError::InvalidRange),
    );

    let stray = skeleton.attach(Parent::Body, SegmentDef::new(1.0), &mut rng).unwrap();
    let mut other: Skeleton<f32> = Skeleton::new(Vec2::new(0.0, 0.0), 0.0);
    let orphan: SegmentId = stray;
    assert_eq!(
        other.attach(Parent::Segment(orphan), SegmentDef::new(1.0), &mut rng),
        Err(RigError::SegmentOutOfBounds { index: 0, count: 0 }),
    );
}
