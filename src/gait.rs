//! Two-state step cycle that turns a limb into a leg.
//!
//! A planted foot is anchored to its goal while the body moves on. Once it lags
//! far enough behind and the leg's periodic trigger is open, the foot lifts and
//! arcs to a fresh goal one reach from the hip along its swing direction, landing
//! after a fixed number of frames.

use crate::config::GaitConfig;
use crate::float::{wrap_angle, Float};
use crate::rng::SimRng;
use crate::vec::Vec2;

/// Where a leg is in its step cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GaitState<F: Float> {
    /// Foot anchored at the goal.
    Planted,
    /// Foot travelling from `start` to the goal; `progress` is in [0, 1].
    Stepping { progress: F, start: Vec2<F> },
}

/// Transition reported by a leg update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GaitEvent {
    StepStarted,
    Landed,
}

/// Gait state attached to a limb.
#[derive(Clone, Debug)]
pub struct Gait<F: Float> {
    state: GaitState<F>,
    goal: Vec2<F>,
    reach: F,
    swing: F,
    swing_offset: F,
    phase: F,
    config: GaitConfig<F>,
}

impl<F: Float> Gait<F> {
    /// Derive stride geometry from the rest pose of a chain.
    ///
    /// `hip` and `end` are the anchor and end-effector poses, `body_angle` the
    /// creature heading at construction.
    pub fn new<R: SimRng + ?Sized>(
        hip: (Vec2<F>, F),
        end: Vec2<F>,
        body_angle: F,
        config: GaitConfig<F>,
        rng: &mut R,
    ) -> Self {
        let (hip_pos, hip_angle) = hip;
        let natural = config.reach_factor * end.distance(hip_pos);
        let reach = if natural.is_finite() && natural >= config.min_reach {
            natural
        } else {
            log::warn!(
                "leg reach {:?} below minimum, using {:?}",
                natural,
                config.min_reach
            );
            config.min_reach
        };

        let rel = wrap_angle(body_angle - (end - hip_pos).angle());
        let quarter = F::pi() * F::half();
        let swing = -rel + if rel < F::zero() { quarter } else { -quarter };

        Gait {
            state: GaitState::Planted,
            goal: end,
            reach,
            swing,
            swing_offset: body_angle - hip_angle,
            phase: rng.gen_phase(),
            config,
        }
    }

    pub fn state(&self) -> GaitState<F> { self.state }
    pub fn goal(&self) -> Vec2<F> { self.goal }
    pub fn reach(&self) -> F { self.reach }
    pub fn swing(&self) -> F { self.swing }
    pub fn swing_offset(&self) -> F { self.swing_offset }
    pub fn phase(&self) -> F { self.phase }
    pub fn config(&self) -> &GaitConfig<F> { &self.config }

    pub fn is_planted(&self) -> bool {
        matches!(self.state, GaitState::Planted)
    }

    /// Progress through the current step; zero while planted.
    pub fn step_progress(&self) -> F {
        match self.state {
            GaitState::Planted => F::zero(),
            GaitState::Stepping { progress, .. } => progress,
        }
    }

    /// Whether the periodic trigger permits a step at `time`.
    pub fn trigger_open(&self, time: F) -> bool {
        (time * self.config.trigger_frequency + self.phase).sin() > self.config.trigger_threshold
    }

    /// A planted foot `lag` away from its goal should lift now.
    pub fn wants_step(&self, time: F, lag: F) -> bool {
        self.is_planted()
            && lag > self.reach * self.config.step_distance_fraction
            && self.trigger_open(time)
    }

    /// Lift the foot at `foot` and aim it one reach out along the swing direction.
    pub(crate) fn lift<R: SimRng + ?Sized>(
        &mut self,
        foot: Vec2<F>,
        hip: (Vec2<F>, F),
        rng: &mut R,
    ) {
        let (hip_pos, hip_angle) = hip;
        let heading = self.swing + hip_angle + self.swing_offset;
        let spread = self.reach * self.config.jitter;
        let jitter = Vec2::new(rng.gen_centered::<F>() * spread, rng.gen_centered::<F>() * spread);
        self.goal = hip_pos + Vec2::from_angle(heading).scale(self.reach) + jitter;
        self.state = GaitState::Stepping { progress: F::zero(), start: foot };
    }

    /// Advance a step by one frame. Returns the foot's target this frame and
    /// whether this frame completes the step; `None` when planted.
    pub(crate) fn advance(&mut self) -> Option<(Vec2<F>, bool)> {
        let GaitState::Stepping { progress, start } = self.state else {
            return None;
        };
        let progress = (progress + self.config.step_rate).min(F::one());
        self.state = GaitState::Stepping { progress, start };

        let arc = (progress * F::pi()).sin() * self.config.step_height;
        let along = start.lerp(self.goal, progress);
        Some((Vec2::new(along.x, along.y - arc), progress >= F::one()))
    }

    /// Plant the foot where it ended up.
    pub(crate) fn land(&mut self, foot: Vec2<F>) {
        self.state = GaitState::Planted;
        self.goal = foot;
    }
}
