use wriggle::{BodyPlan, Simulation, Vec2};

fn run(seed: u64, frames: u32) -> Vec<Vec2<f64>> {
    let mut sim = Simulation::from_seed(seed, |rng| {
        let plan: BodyPlan<f64> = BodyPlan::random(rng);
        plan.build(Vec2::new(0.0, 0.0), 0.0, rng)
    })
    .unwrap();
    for t in 0..frames {
        let a = t as f64 * 0.03;
        sim.tick(Vec2::new(400.0 * a.cos(), 300.0 * a.sin()));
    }
    sim.creature().skeleton().iter().map(|(_, s)| s.position()).collect()
}

#[test]
fn same_seed_same_pose() {
    let results: Vec<_> = (0..3).map(|_| run(42, 100)).collect();
    for r in &results[1..] {
        assert_eq!(results[0], *r);
    }
}

#[test]
fn different_seeds_diverge() {
    assert_ne!(run(1, 30), run(2, 30));
}

#[test]
fn single_precision_is_deterministic() {
    let pose = || {
        let mut sim = Simulation::<f32>::from_seed(9, |rng| {
            BodyPlan::new(5.0, 3, 12).build(Vec2::new(10.0, 10.0), 1.0, rng)
        })
        .unwrap();
        for _ in 0..60 {
            sim.tick(Vec2::new(-250.0, 80.0));
        }
        (sim.creature().position(), sim.creature().heading())
    };
    assert_eq!(pose(), pose());
}
