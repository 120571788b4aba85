//! Stock lizard body plan: neck with feelers, ribbed spine, legs with toes, finned tail.

use crate::config::{GaitConfig, LimbConfig, LocomotionConfig, SegmentDef};
use crate::creature::Creature;
use crate::error::RigError;
use crate::float::Float;
use crate::rng::SimRng;
use crate::segment::{Parent, SegmentId};
use crate::vec::Vec2;

const NECK_SEGMENTS: usize = 6;
const SPINE_PER_LEG_PAIR: usize = 4;
const TOES: usize = 3;
const LEG_CHAIN: usize = 4;

/// Construction parameters for a lizard-like creature.
///
/// Every length is a multiple of `scale`. Legs come in mirrored pairs, each pair
/// after the first separated by a stretch of ribbed spine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyPlan<F: Float> {
    pub scale: F,
    pub leg_pairs: usize,
    pub tail: usize,
    pub gait: GaitConfig<F>,
    pub locomotion: LocomotionConfig<F>,
}

impl<F: Float> BodyPlan<F> {
    pub fn new(scale: F, leg_pairs: usize, tail: usize) -> Self {
        BodyPlan {
            scale,
            leg_pairs,
            tail,
            gait: GaitConfig::new(),
            locomotion: LocomotionConfig::lizard(scale),
        }
    }

    /// Random proportions: 2 to 9 leg pairs, a tail growing with the leg count,
    /// and a scale shrinking with it.
    pub fn random<R: SimRng + ?Sized>(rng: &mut R) -> Self {
        let leg_pairs = 2 + (rng.gen_unit() * 8.0) as usize;
        let tail = 8 + (rng.gen_unit() * leg_pairs as f32 * 4.0) as usize;
        let scale = F::from_f32(12.0) / F::from_f32(leg_pairs as f32).sqrt();
        BodyPlan::new(scale, leg_pairs, tail)
    }

    pub fn with_gait(mut self, gait: GaitConfig<F>) -> Self {
        self.gait = gait;
        self
    }

    pub fn with_locomotion(mut self, locomotion: LocomotionConfig<F>) -> Self {
        self.locomotion = locomotion;
        self
    }

    /// Assemble the creature at `position`, facing `angle`.
    pub fn build<R: SimRng + ?Sized>(
        &self,
        position: Vec2<F>,
        angle: F,
        rng: &mut R,
    ) -> Result<Creature<F>, RigError> {
        let s = self.scale;
        let f = F::from_f32;
        let pi = F::pi();
        let mut critter = Creature::new(position, angle, self.locomotion);
        let mut spinal = Parent::Body;

        for i in 0..NECK_SEGMENTS {
            let def = SegmentDef::new(s * f(4.0))
                .with_range(pi * f(2.0 / 3.0))
                .with_stiffness(f(0.8 + i as f32 * 0.1));
            spinal = Parent::Segment(critter.attach(spinal, def, rng)?);

            for side in [-1.0f32, 1.0] {
                let mut node = critter.attach(
                    spinal,
                    SegmentDef::new(s * f(2.0)).with_angle(f(side * 0.8)).with_range(f(0.2)).with_stiffness(f(1.5)),
                    rng,
                )?;
                for _ in 0..2 {
                    node = critter.attach(
                        Parent::Segment(node),
                        SegmentDef::new(s * f(1.5)).with_angle(f(-side * 0.2)).with_range(f(0.15)).with_stiffness(f(1.8)),
                        rng,
                    )?;
                }
            }
        }

        for pair in 0..self.leg_pairs {
            if pair > 0 {
                for j in 0..SPINE_PER_LEG_PAIR {
                    let def = SegmentDef::new(s * f(3.5))
                        .with_range(pi * F::half())
                        .with_stiffness(f(1.2 + j as f32 * 0.1));
                    spinal = Parent::Segment(critter.attach(spinal, def, rng)?);
                    self.ribs(&mut critter, spinal, rng)?;
                }
            }
            for side in [-1.0f32, 1.0] {
                let foot = self.leg(&mut critter, spinal, side, rng)?;
                critter.add_leg(foot, LimbConfig::new(LEG_CHAIN, s * f(8.0)), self.gait, rng)?;
            }
        }

        for i in 0..self.tail {
            let taper = f((self.tail - i) as f32 / self.tail as f32);
            let def = SegmentDef::new(s * f(3.0) * taper)
                .with_range(pi * F::half() * taper)
                .with_stiffness(f(0.8 + i as f32 * 0.02));
            spinal = Parent::Segment(critter.attach(spinal, def, rng)?);

            if i % 3 == 0 {
                for side in [-1.0f32, 1.0] {
                    let fin = critter.attach(
                        spinal,
                        SegmentDef::new(s * f(2.0) * taper).with_angle(f(side * 0.8)).with_range(f(0.4)).with_stiffness(f(1.5)),
                        rng,
                    )?;
                    critter.attach(
                        Parent::Segment(fin),
                        SegmentDef::new(s * f(1.5) * taper).with_angle(f(-side * 0.3)).with_range(f(0.3)).with_stiffness(f(2.0)),
                        rng,
                    )?;
                }
            }
        }

        log::debug!(
            "built lizard: {} segments, {} legs, tail {}",
            critter.skeleton().len(),
            critter.limbs().len(),
            self.tail
        );
        Ok(critter)
    }

    fn ribs<R: SimRng + ?Sized>(
        &self,
        critter: &mut Creature<F>,
        spinal: Parent,
        rng: &mut R,
    ) -> Result<(), RigError> {
        let s = self.scale;
        let f = F::from_f32;
        for side in [-1.0f32, 1.0] {
            let mut node = critter.attach(
                spinal,
                SegmentDef::new(s * f(2.5))
                    .with_angle(f(side) * F::pi() / f(3.0))
                    .with_range(f(0.3))
                    .with_stiffness(f(1.2)),
                rng,
            )?;
            for _ in 0..2 {
                node = critter.attach(
                    Parent::Segment(node),
                    SegmentDef::new(s * f(2.0)).with_angle(f(-side * 0.25)).with_range(f(0.2)).with_stiffness(f(1.5)),
                    rng,
                )?;
            }
        }
        Ok(())
    }

    /// Hip, thigh, shin and foot, plus toes. Returns the foot.
    fn leg<R: SimRng + ?Sized>(
        &self,
        critter: &mut Creature<F>,
        spinal: Parent,
        side: f32,
        rng: &mut R,
    ) -> Result<SegmentId, RigError> {
        let s = self.scale;
        let f = F::from_f32;
        let pi = F::pi();
        let hip = critter.attach(
            spinal,
            SegmentDef::new(s * f(8.0)).with_angle(f(side * 0.6)).with_range(f(0.5)).with_stiffness(f(4.0)),
            rng,
        )?;
        let thigh = critter.attach(
            Parent::Segment(hip),
            SegmentDef::new(s * f(12.0)).with_angle(f(-side * 0.6)).with_range(pi).with_stiffness(f(0.8)),
            rng,
        )?;
        let shin = critter.attach(
            Parent::Segment(thigh),
            SegmentDef::new(s * f(12.0)).with_angle(f(side * 1.2)).with_range(pi * f(0.8)).with_stiffness(f(1.2)),
            rng,
        )?;
        let foot = critter.attach(
            Parent::Segment(shin),
            SegmentDef::new(s * f(6.0)).with_angle(f(-side * 0.3)).with_range(pi * F::half()).with_stiffness(f(2.0)),
            rng,
        )?;
        for toe in 0..TOES {
            let spread = (toe as f32 / 2.0 - 0.5) * 0.8;
            critter.attach(
                Parent::Segment(foot),
                SegmentDef::new(s * f(2.0)).with_angle(f(spread)).with_range(f(0.3)).with_stiffness(f(3.0)),
                rng,
            )?;
        }
        Ok(foot)
    }
}
