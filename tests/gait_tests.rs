use wriggle::{
    seeded, BodyPlan, Creature, FrameObserver, GaitState, LimbConfig, LimbId, LocomotionConfig,
    Parent, RigError, SegmentDef, Simulation, Vec2,
};

#[derive(Default)]
struct StepLog {
    frame: u64,
    started: Vec<(LimbId, u64)>,
    landed: Vec<(LimbId, u64)>,
}

impl FrameObserver for StepLog {
    fn on_step_started(&mut self, limb: LimbId) {
        self.started.push((limb, self.frame));
    }

    fn on_step_landed(&mut self, limb: LimbId) {
        self.landed.push((limb, self.frame));
    }

    fn on_frame_complete(&mut self) {
        self.frame += 1;
    }
}

/// Lizard chasing a point that runs away along +x faster than it can follow.
fn run_away(frames: u64) -> (Simulation<f64>, StepLog) {
    let mut sim = Simulation::from_seed(11, |rng| {
        BodyPlan::new(3.3, 2, 8).build(Vec2::new(0.0, 0.0), 0.0, rng)
    })
    .unwrap();
    let mut log = StepLog::default();
    for t in 0..frames {
        sim.tick_observed(Vec2::new(2000.0 + 100.0 * t as f64, 0.0), &mut log);
    }
    (sim, log)
}

#[test]
fn every_leg_steps_while_chasing() {
    let (sim, log) = run_away(300);
    for (i, limb) in sim.creature().limbs().iter().enumerate() {
        assert!(limb.is_leg());
        assert!(
            log.started.iter().any(|(id, _)| id.index() == i),
            "leg {} never lifted",
            i
        );
    }
}

#[test]
fn steps_land_after_fixed_number_of_frames() {
    let (sim, log) = run_away(300);
    let frames_per_step = BodyPlan::<f64>::new(3.3, 2, 8).gait.frames_per_step() as u64;
    assert_eq!(frames_per_step, 7);
    assert!(!log.landed.is_empty());

    for &(limb, landed_at) in &log.landed {
        let lifted_at = log
            .started
            .iter()
            .filter(|(id, at)| *id == limb && *at < landed_at)
            .map(|(_, at)| *at)
            .max()
            .unwrap();
        assert_eq!(landed_at - lifted_at, frames_per_step, "limb {:?}", limb);
    }

    // a leg never lifts twice without landing in between
    for (i, _) in sim.creature().limbs().iter().enumerate() {
        let mut events: Vec<(u64, bool)> = log
            .started
            .iter()
            .filter(|(id, _)| id.index() == i)
            .map(|(_, at)| (*at, true))
            .chain(log.landed.iter().filter(|(id, _)| id.index() == i).map(|(_, at)| (*at, false)))
            .collect();
        events.sort();
        for pair in events.windows(2) {
            assert_ne!(pair[0].1, pair[1].1, "leg {} events out of order: {:?}", i, events);
        }
    }
}

#[test]
fn stepping_feet_stay_finite() {
    let (sim, _) = run_away(150);
    for (_, seg) in sim.creature().skeleton().iter() {
        assert!(seg.position().is_finite());
    }
    for limb in sim.creature().limbs() {
        let gait = limb.gait().unwrap();
        assert!(gait.goal().is_finite());
        assert!(gait.step_progress() >= 0.0 && gait.step_progress() <= 1.0);
    }
}

#[test]
fn forced_step_only_lifts_planted_legs() {
    let mut rng = seeded(12);
    let mut critter: Creature<f64> = BodyPlan::new(4.0, 2, 8)
        .with_locomotion(LocomotionConfig::new())
        .build(Vec2::new(0.0, 0.0), 0.0, &mut rng)
        .unwrap();
    let leg = critter.update_order()[0];

    assert!(critter.limb(leg).unwrap().is_planted());
    assert_eq!(critter.begin_step(leg, &mut rng), Ok(true));
    let gait = critter.limb(leg).unwrap().gait().unwrap();
    assert!(matches!(gait.state(), GaitState::Stepping { .. }));
    assert_eq!(gait.step_progress(), 0.0);
    assert_eq!(critter.begin_step(leg, &mut rng), Ok(false));
}

#[test]
fn plain_limbs_never_step() {
    let mut rng = seeded(13);
    let mut critter: Creature<f32> = Creature::new(Vec2::new(0.0, 0.0), 0.0, LocomotionConfig::new());
    let a = critter.attach(Parent::Body, SegmentDef::new(10.0), &mut rng).unwrap();
    let b = critter.attach(Parent::Segment(a), SegmentDef::new(10.0), &mut rng).unwrap();
    let arm = critter.add_limb(b, LimbConfig::new(2, 4.0)).unwrap();

    assert!(!critter.limb(arm).unwrap().is_leg());
    assert!(!critter.limb(arm).unwrap().is_planted());
    assert_eq!(critter.begin_step(arm, &mut rng), Ok(false));

    let lizard: Creature<f32> = BodyPlan::new(4.0, 2, 8)
        .build(Vec2::new(0.0, 0.0), 0.0, &mut rng)
        .unwrap();
    let stray = lizard.update_order()[3];
    assert_eq!(
        critter.begin_step(stray, &mut rng),
        Err(RigError::LimbOutOfBounds { index: 3, count: 1 })
    );
}
