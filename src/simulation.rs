//! Frame driver tying a creature to its ambient field, clock and random source.

use crate::creature::Creature;
use crate::float::Float;
use crate::frame::Frame;
use crate::noise::{AmbientField, DEFAULT_FIELD_LEN};
use crate::observer::{FrameObserver, NoOpFrameObserver};
use crate::rng::{seeded, DefaultRng, SimRng};
use crate::vec::Vec2;

/// Everything needed to advance one creature frame by frame.
///
/// ```
/// use wriggle::{BodyPlan, Simulation, Vec2};
///
/// let mut sim = Simulation::<f32>::from_seed(7, |rng| {
///     BodyPlan::new(6.0, 2, 8).build(Vec2::new(0.0, 0.0), 0.0, rng)
/// })
/// .unwrap();
/// for _ in 0..10 {
///     sim.tick(Vec2::new(200.0, 50.0));
/// }
/// assert_eq!(sim.time(), 10);
/// ```
pub struct Simulation<F: Float, R = DefaultRng> {
    creature: Creature<F>,
    field: AmbientField<F>,
    rng: R,
    time: u64,
}

impl<F: Float> Simulation<F, DefaultRng> {
    /// Seed the RNG, let `build` assemble the creature with it, then seed the field.
    pub fn from_seed<E>(
        seed: u64,
        build: impl FnOnce(&mut DefaultRng) -> Result<Creature<F>, E>,
    ) -> Result<Self, E> {
        let mut rng = seeded(seed);
        let creature = build(&mut rng)?;
        let field = AmbientField::new(DEFAULT_FIELD_LEN, &mut rng);
        Ok(Simulation::new(creature, field, rng))
    }
}

impl<F: Float, R: SimRng> Simulation<F, R> {
    pub fn new(creature: Creature<F>, field: AmbientField<F>, rng: R) -> Self {
        Simulation { creature, field, rng, time: 0 }
    }

    /// Advance one frame toward `target`.
    pub fn tick(&mut self, target: Vec2<F>) {
        self.tick_observed(target, &mut NoOpFrameObserver);
    }

    /// Advance one frame, reporting each phase to `observer`.
    pub fn tick_observed<O: FrameObserver>(&mut self, target: Vec2<F>, observer: &mut O) {
        self.time += 1;
        self.field.drift(&mut self.rng);
        let frame = Frame::new(self.time, &self.field);
        self.creature.follow(target, &frame, &mut self.rng, observer);
    }

    pub fn time(&self) -> u64 { self.time }
    pub fn creature(&self) -> &Creature<F> { &self.creature }
    pub fn creature_mut(&mut self) -> &mut Creature<F> { &mut self.creature }
    pub fn field(&self) -> &AmbientField<F> { &self.field }
    pub fn rng_mut(&mut self) -> &mut R { &mut self.rng }
}
