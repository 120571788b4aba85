//! Limb chains solved toward a moving target with a single backward pass.

use crate::config::{GaitConfig, LimbConfig};
use crate::error::RigError;
use crate::float::Float;
use crate::frame::Frame;
use crate::gait::{Gait, GaitEvent, GaitState};
use crate::rng::SimRng;
use crate::segment::{Parent, SegmentId, Skeleton};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Handle to a limb registered on a [`Creature`](crate::Creature).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LimbId(pub(crate) usize);

impl LimbId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An ordered chain of segments, from the hip side to the end-effector.
///
/// The limb does not own its segments; it only orders existing nodes of a
/// [`Skeleton`]. With a [`Gait`] attached it behaves as a leg, otherwise it
/// simply chases whatever point it is given.
#[derive(Clone, Debug)]
pub struct Limb<F: Float> {
    nodes: AllocVec<SegmentId>,
    hip: Parent,
    target: Vec2<F>,
    speed: F,
    smoothing: F,
    gait: Option<Gait<F>>,
}

impl<F: Float> Limb<F> {
    /// Collect up to `config.length` segments ending at `end`, stopping early at the body.
    pub fn new(skeleton: &Skeleton<F>, end: SegmentId, config: LimbConfig<F>) -> Result<Self, RigError> {
        skeleton.check(end)?;
        let length = config.length.max(1);
        let mut nodes = AllocVec::with_capacity(length);
        let mut cursor = end;
        loop {
            nodes.push(cursor);
            if nodes.len() >= length {
                break;
            }
            match skeleton.segment(cursor).parent() {
                Parent::Segment(p) => cursor = p,
                Parent::Body => break,
            }
        }
        nodes.reverse();
        let hip = skeleton.segment(nodes[0]).parent();

        Ok(Limb {
            nodes,
            hip,
            target: skeleton.segment(end).position(),
            speed: config.speed,
            smoothing: config.smoothing,
            gait: None,
        })
    }

    /// Turn this limb into a leg, deriving its stride from the current rest pose.
    pub fn with_gait<R: SimRng + ?Sized>(
        mut self,
        skeleton: &Skeleton<F>,
        config: GaitConfig<F>,
        rng: &mut R,
    ) -> Self {
        let hip = skeleton.pose(self.hip);
        let end = skeleton.segment(self.end()).position();
        self.gait = Some(Gait::new(hip, end, skeleton.body().abs_angle, config, rng));
        self
    }

    pub fn nodes(&self) -> &[SegmentId] { &self.nodes }
    pub fn hip(&self) -> Parent { self.hip }
    pub fn target(&self) -> Vec2<F> { self.target }
    pub fn speed(&self) -> F { self.speed }
    pub fn gait(&self) -> Option<&Gait<F>> { self.gait.as_ref() }

    pub fn end(&self) -> SegmentId {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn is_leg(&self) -> bool {
        self.gait.is_some()
    }

    /// A leg with its foot down. Plain limbs are never planted.
    pub fn is_planted(&self) -> bool {
        self.gait.as_ref().is_some_and(Gait::is_planted)
    }

    /// Drag the chain toward `point` while keeping every link length.
    ///
    /// The stored target eases toward `point`; the end-effector then closes on it
    /// by at most `speed`, and each proximal node is pulled after its distal
    /// neighbour at exactly that neighbour's length. Angles are rebuilt from the
    /// new positions and off-chain branches re-anchored without flexing.
    pub fn move_to(&mut self, skeleton: &mut Skeleton<F>, frame: &Frame<'_, F>, point: Vec2<F>) {
        if point.is_finite() {
            self.target = self.target.lerp(point, self.smoothing);
        }
        skeleton.relax(self.nodes[0], true, true, frame);

        let end = skeleton.segment(self.end()).position();
        let mut len = (self.target.distance(end) - self.speed).max(F::zero());
        let mut cursor = self.target;
        let mut fallback = skeleton.segment(self.end()).abs_angle();
        for &id in self.nodes.iter().rev() {
            let seg = skeleton.segment_mut(id);
            let dir = (seg.position - cursor)
                .try_normalize()
                .unwrap_or_else(|| Vec2::from_angle(fallback + F::pi()));
            seg.position = cursor + dir.scale(len);
            cursor = seg.position;
            len = seg.size;
            fallback = seg.abs_angle;
        }
        self.target = cursor;

        for i in 0..self.nodes.len() {
            let id = self.nodes[i];
            let (parent_pos, parent_angle) = skeleton.pose(skeleton.segment(id).parent());
            let seg = skeleton.segment_mut(id);
            let delta = seg.position - parent_pos;
            if delta.try_normalize().is_some() {
                seg.abs_angle = delta.angle();
                seg.rel_angle = seg.abs_angle - parent_angle;
            }

            for k in 0..skeleton.segment(id).children().len() {
                let child = skeleton.segment(id).children()[k];
                if !self.nodes.contains(&child) {
                    skeleton.relax(child, true, false, frame);
                }
            }
        }
    }

    /// One frame of this limb: chase `pointer`, or run the step cycle if it is a leg.
    pub fn update<R: SimRng + ?Sized>(
        &mut self,
        skeleton: &mut Skeleton<F>,
        frame: &Frame<'_, F>,
        rng: &mut R,
        pointer: Vec2<F>,
    ) -> Option<GaitEvent> {
        let state = match &self.gait {
            None => {
                self.move_to(skeleton, frame, pointer);
                return None;
            }
            Some(gait) => gait.state(),
        };

        match state {
            GaitState::Planted => {
                let goal = self.gait.as_ref().map(Gait::goal)?;
                self.move_to(skeleton, frame, goal);
                let lag = skeleton.segment(self.end()).position().distance(goal);
                let wants = self.gait.as_ref().is_some_and(|g| g.wants_step(frame.time, lag));
                if wants && self.begin_step(skeleton, rng) {
                    Some(GaitEvent::StepStarted)
                } else {
                    None
                }
            }
            GaitState::Stepping { .. } => {
                let (point, landed) = self.gait.as_mut().and_then(Gait::advance)?;
                self.move_to(skeleton, frame, point);
                if !landed {
                    return None;
                }
                let foot = skeleton.segment(self.end()).position();
                if let Some(gait) = self.gait.as_mut() {
                    gait.land(foot);
                }
                log::trace!("limb end {:?} landed at {:?}", self.end(), foot);
                Some(GaitEvent::Landed)
            }
        }
    }

    /// Lift a planted leg now, regardless of its trigger. Returns false for plain
    /// limbs and for legs already mid-step.
    pub fn begin_step<R: SimRng + ?Sized>(&mut self, skeleton: &Skeleton<F>, rng: &mut R) -> bool {
        let end = self.end();
        let foot = skeleton.segment(end).position();
        let hip = skeleton.pose(self.hip);
        match self.gait.as_mut() {
            Some(gait) if gait.is_planted() => {
                gait.lift(foot, hip, rng);
                log::trace!("limb end {:?} lifting toward {:?}", end, gait.goal());
                true
            }
            _ => false,
        }
    }
}
