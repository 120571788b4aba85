//! The locomotion controller: body integrator and per-frame orchestration.

use crate::config::{GaitConfig, LimbConfig, LocomotionConfig, SegmentDef};
use crate::error::RigError;
use crate::float::{wrap_angle, Float};
use crate::frame::Frame;
use crate::gait::GaitEvent;
use crate::limb::{Limb, LimbId};
use crate::observer::FrameObserver;
use crate::rng::SimRng;
use crate::segment::{Parent, SegmentId, Skeleton};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Root of a segment tree that walks toward a target point.
///
/// Each [`follow`](Creature::follow) call integrates forward and rotational
/// speed, relaxes the tree, and then updates every limb in
/// [`update_order`](Creature::update_order). Forward acceleration is scaled by
/// the fraction of legs that are planted, so a creature mid-stride slows down.
#[derive(Clone, Debug)]
pub struct Creature<F: Float> {
    skeleton: Skeleton<F>,
    limbs: AllocVec<Limb<F>>,
    update_order: AllocVec<LimbId>,
    config: LocomotionConfig<F>,
    f_speed: F,
    speed: F,
    r_speed: F,
    energy: F,
    heartbeat: F,
    breathing: F,
}

impl<F: Float> Creature<F> {
    pub fn new(position: Vec2<F>, angle: F, config: LocomotionConfig<F>) -> Self {
        Creature {
            skeleton: Skeleton::new(position, angle),
            limbs: AllocVec::new(),
            update_order: AllocVec::new(),
            config,
            f_speed: F::zero(),
            speed: F::zero(),
            r_speed: F::zero(),
            energy: F::one(),
            heartbeat: F::zero(),
            breathing: F::zero(),
        }
    }

    /// Attach a segment to the body or to an existing segment.
    pub fn attach<R: SimRng + ?Sized>(
        &mut self,
        parent: Parent,
        def: SegmentDef<F>,
        rng: &mut R,
    ) -> Result<SegmentId, RigError> {
        self.skeleton.attach(parent, def, rng)
    }

    /// Register a chain ending at `end` that chases the follow target.
    pub fn add_limb(&mut self, end: SegmentId, config: LimbConfig<F>) -> Result<LimbId, RigError> {
        let limb = Limb::new(&self.skeleton, end, config)?;
        Ok(self.push_limb(limb))
    }

    /// Register a leg ending at `end`.
    pub fn add_leg<R: SimRng + ?Sized>(
        &mut self,
        end: SegmentId,
        config: LimbConfig<F>,
        gait: GaitConfig<F>,
        rng: &mut R,
    ) -> Result<LimbId, RigError> {
        let limb = Limb::new(&self.skeleton, end, config)?.with_gait(&self.skeleton, gait, rng);
        Ok(self.push_limb(limb))
    }

    fn push_limb(&mut self, limb: Limb<F>) -> LimbId {
        let id = LimbId(self.limbs.len());
        log::debug!(
            "registered {} {} with {} nodes (reach {:?})",
            if limb.is_leg() { "leg" } else { "limb" },
            id.0,
            limb.nodes().len(),
            limb.gait().map(|g| g.reach()),
        );
        self.limbs.push(limb);
        self.update_order.push(id);
        id
    }

    /// Replace the order in which limbs are updated each frame.
    pub fn set_update_order(&mut self, order: AllocVec<LimbId>) -> Result<(), RigError> {
        if let Some(bad) = order.iter().find(|id| id.0 >= self.limbs.len()) {
            log::warn!("rejected update order containing limb {}", bad.0);
            return Err(RigError::LimbOutOfBounds { index: bad.0, count: self.limbs.len() });
        }
        self.update_order = order;
        Ok(())
    }

    pub fn update_order(&self) -> &[LimbId] { &self.update_order }
    pub fn skeleton(&self) -> &Skeleton<F> { &self.skeleton }
    pub fn skeleton_mut(&mut self) -> &mut Skeleton<F> { &mut self.skeleton }
    pub fn limbs(&self) -> &[Limb<F>] { &self.limbs }
    pub fn config(&self) -> &LocomotionConfig<F> { &self.config }
    pub fn position(&self) -> Vec2<F> { self.skeleton.body().position }
    pub fn heading(&self) -> F { self.skeleton.body().abs_angle }
    /// Effective forward speed used for the last move.
    pub fn speed(&self) -> F { self.speed }
    pub fn rotation_speed(&self) -> F { self.r_speed }
    pub fn energy(&self) -> F { self.energy }
    pub fn heartbeat(&self) -> F { self.heartbeat }
    pub fn breathing(&self) -> F { self.breathing }
    pub fn body_size(&self) -> F { self.config.body_size }

    pub fn limb(&self, id: LimbId) -> Result<&Limb<F>, RigError> {
        self.limbs.get(id.0).ok_or(RigError::LimbOutOfBounds { index: id.0, count: self.limbs.len() })
    }

    /// Force a leg to lift now. Returns false for plain limbs or legs already stepping.
    pub fn begin_step<R: SimRng + ?Sized>(&mut self, id: LimbId, rng: &mut R) -> Result<bool, RigError> {
        let count = self.limbs.len();
        let limb = self.limbs.get_mut(id.0).ok_or(RigError::LimbOutOfBounds { index: id.0, count })?;
        Ok(limb.begin_step(&self.skeleton, rng))
    }

    /// Planted legs over all legs; 1 for a creature without legs.
    pub fn grounded_fraction(&self) -> F {
        let legs = self.limbs.iter().filter(|l| l.is_leg()).count();
        if legs == 0 {
            return F::one();
        }
        let planted = self.limbs.iter().filter(|l| l.is_planted()).count();
        F::from_f32(planted as f32) / F::from_f32(legs as f32)
    }

    /// Forward acceleration the next frame would apply.
    pub fn forward_acceleration(&self) -> F {
        self.config.f_accel * self.energy * self.grounded_fraction()
    }

    /// Advance one frame toward `target`.
    pub fn follow<R: SimRng + ?Sized, O: FrameObserver>(
        &mut self,
        target: Vec2<F>,
        frame: &Frame<'_, F>,
        rng: &mut R,
        observer: &mut O,
    ) {
        self.integrate(target, rng);
        observer.on_body_integrated();

        self.skeleton.relax_all(frame);
        observer.on_tree_relaxed();

        for i in 0..self.update_order.len() {
            let id = self.update_order[i];
            let event = self.limbs[id.0].update(&mut self.skeleton, frame, rng, target);
            match event {
                Some(GaitEvent::StepStarted) => observer.on_step_started(id),
                Some(GaitEvent::Landed) => observer.on_step_landed(id),
                None => {}
            }
            observer.on_limb_updated(id);
        }

        observer.on_frame_complete();
    }

    fn integrate<R: SimRng + ?Sized>(&mut self, target: Vec2<F>, rng: &mut R) {
        let c = self.config;
        let body = self.skeleton.body();
        let (to_target, dist) = if target.is_finite() {
            (target - body.position, body.position.distance(target))
        } else {
            (Vec2::zero(), F::zero())
        };
        let chasing = dist > c.f_thresh;

        if chasing {
            self.f_speed = self.f_speed + self.forward_acceleration();
        }
        self.f_speed = self.f_speed * (F::one() - c.f_res);
        self.speed = (self.f_speed - c.f_fric).max(F::zero());

        let dif = wrap_angle(body.abs_angle - to_target.angle());
        if dif.abs() > c.r_thresh && chasing {
            self.r_speed = self.r_speed - c.r_accel * dif.sign() * self.energy;
        }
        self.r_speed = self.r_speed * (F::one() - c.r_res);
        if self.r_speed.abs() > c.r_fric {
            self.r_speed = self.r_speed - c.r_fric * self.r_speed.sign();
        } else {
            self.r_speed = F::zero();
        }

        let heading = wrap_angle(body.abs_angle + self.r_speed);
        let tremor = rng.gen_centered::<F>() * F::two() * c.tremor;
        let position = body.position + Vec2::from_angle(heading + tremor).scale(self.speed);
        self.skeleton.set_body(position, heading);

        self.heartbeat = self.heartbeat + c.heartbeat_rate;
        self.breathing = self.breathing + c.breathing_rate;
        self.energy = F::from_f32(0.8) + F::from_f32(0.2) * self.heartbeat.sin();
    }
}
