//! Randomness seam for organic jitter.
//!
//! Every random draw in the rig goes through [`SimRng`], so a run is reproducible
//! from a seed. Any `rand::RngCore` qualifies; [`seeded`] builds the default one.

use crate::float::Float;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// The RNG used by [`Simulation`](crate::Simulation) when built from a seed.
pub type DefaultRng = Xoshiro256PlusPlus;

/// Random source for tremor, gait phases and step jitter.
pub trait SimRng {
    /// Uniform f32 in [0.0, 1.0).
    fn gen_unit(&mut self) -> f32;

    /// Uniform value in [-0.5, 0.5).
    fn gen_centered<F: Float>(&mut self) -> F {
        F::from_f32(self.gen_unit() - 0.5)
    }

    /// Uniform angle in [0, 2π).
    fn gen_phase<F: Float>(&mut self) -> F {
        F::from_f32(self.gen_unit()) * F::tau()
    }
}

impl<T: ?Sized + rand::RngCore> SimRng for T {
    fn gen_unit(&mut self) -> f32 {
        rand::Rng::gen(self)
    }
}

/// Deterministic RNG from a seed.
pub fn seeded(seed: u64) -> DefaultRng {
    Xoshiro256PlusPlus::seed_from_u64(seed)
}
