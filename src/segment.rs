//! Angle-constrained segments stored in an index arena.
//!
//! A [`Skeleton`] owns every segment of one creature. Segments refer to their
//! parent and children by [`SegmentId`], and the body itself is the implicit
//! root: a segment whose parent is [`Parent::Body`] hangs off the body pose.

use crate::config::SegmentDef;
use crate::error::RigError;
use crate::float::{wrap_near, Float};
use crate::frame::Frame;
use crate::rng::SimRng;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

const SWAY_RATE: f32 = 0.05;
const SWAY_AMPLITUDE: f32 = 0.02;
const SWELL_RATE: f32 = 0.08;
const SWELL_AMPLITUDE: f32 = 0.03;
const TREMOR_SCALE: f32 = 0.01;

/// Stable handle to a segment in its [`Skeleton`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a segment (or a limb's hip) is attached to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parent {
    Body,
    Segment(SegmentId),
}

/// Position and heading of the body, the root every tree hangs from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Joint<F: Float> {
    pub position: Vec2<F>,
    pub abs_angle: F,
}

/// One rigid link: a rest length and an angular range relative to its parent.
#[derive(Clone, Debug)]
pub struct Segment<F: Float> {
    parent: Parent,
    children: AllocVec<SegmentId>,
    pub(crate) size: F,
    original_size: F,
    pub(crate) rel_angle: F,
    def_angle: F,
    pub(crate) abs_angle: F,
    range: F,
    stiffness: F,
    pub(crate) position: Vec2<F>,
    health: F,
    tension: F,
    thickness: F,
    pulse: F,
    breathing_offset: F,
}

impl<F: Float> Segment<F> {
    pub fn parent(&self) -> Parent { self.parent }
    pub fn children(&self) -> &[SegmentId] { &self.children }
    /// Current link length, after breathing and health scaling.
    pub fn size(&self) -> F { self.size }
    pub fn original_size(&self) -> F { self.original_size }
    pub fn rel_angle(&self) -> F { self.rel_angle }
    pub fn def_angle(&self) -> F { self.def_angle }
    pub fn abs_angle(&self) -> F { self.abs_angle }
    pub fn range(&self) -> F { self.range }
    pub fn stiffness(&self) -> F { self.stiffness }
    pub fn position(&self) -> Vec2<F> { self.position }
    pub fn health(&self) -> F { self.health }
    /// Deviation from the rest angle as a fraction of the half-range.
    pub fn tension(&self) -> F { self.tension }
    pub fn thickness(&self) -> F { self.thickness }
    /// Random phase for renderers that pulse segments.
    pub fn pulse(&self) -> F { self.pulse }

    /// Lower and upper bound of `rel_angle` after a flexing relaxation.
    pub fn angle_limits(&self) -> (F, F) {
        let half = self.range * F::half();
        (self.def_angle - half, self.def_angle + half)
    }
}

/// Arena holding every segment of one creature plus the body root.
#[derive(Clone, Debug)]
pub struct Skeleton<F: Float> {
    body: Joint<F>,
    segments: AllocVec<Segment<F>>,
    roots: AllocVec<SegmentId>,
}

impl<F: Float> Skeleton<F> {
    pub fn new(position: Vec2<F>, abs_angle: F) -> Self {
        Skeleton {
            body: Joint { position, abs_angle },
            segments: AllocVec::new(),
            roots: AllocVec::new(),
        }
    }

    /// Add a segment under `parent` and lay it out at its rest angle.
    pub fn attach<R: SimRng + ?Sized>(
        &mut self,
        parent: Parent,
        def: SegmentDef<F>,
        rng: &mut R,
    ) -> Result<SegmentId, RigError> {
        if !def.stiffness.is_finite() || def.stiffness <= F::zero() {
            return Err(RigError::InvalidStiffness);
        }
        if !def.size.is_finite() || def.size < F::zero() {
            return Err(RigError::InvalidSize);
        }
        if !def.range.is_finite() || def.range < F::zero() {
            return Err(RigError::InvalidRange);
        }
        if let Parent::Segment(p) = parent {
            self.check(p)?;
        }

        let id = SegmentId(self.segments.len());
        let (_, parent_angle) = self.pose(parent);
        self.segments.push(Segment {
            parent,
            children: AllocVec::new(),
            size: def.size,
            original_size: def.size,
            rel_angle: def.angle,
            def_angle: def.angle,
            abs_angle: parent_angle + def.angle,
            range: def.range,
            stiffness: def.stiffness,
            position: Vec2::zero(),
            health: F::one(),
            tension: F::zero(),
            thickness: (def.size / F::from_f32(8.0)).max(F::one()),
            pulse: rng.gen_phase(),
            breathing_offset: rng.gen_phase(),
        });
        match parent {
            Parent::Body => self.roots.push(id),
            Parent::Segment(p) => self.segments[p.0].children.push(id),
        }
        self.relax(id, false, true, &Frame::at_rest());
        log::debug!("attached segment {} under {:?} (size {:?})", id.0, parent, def.size);
        Ok(id)
    }

    pub fn body(&self) -> Joint<F> {
        self.body
    }

    pub(crate) fn set_body(&mut self, position: Vec2<F>, abs_angle: F) {
        self.body = Joint { position, abs_angle };
    }

    /// Position and absolute heading of an anchor.
    pub fn pose(&self, anchor: Parent) -> (Vec2<F>, F) {
        match anchor {
            Parent::Body => (self.body.position, self.body.abs_angle),
            Parent::Segment(id) => {
                let s = &self.segments[id.0];
                (s.position, s.abs_angle)
            }
        }
    }

    pub fn segment(&self, id: SegmentId) -> &Segment<F> {
        &self.segments[id.0]
    }

    pub(crate) fn segment_mut(&mut self, id: SegmentId) -> &mut Segment<F> {
        &mut self.segments[id.0]
    }

    pub fn get(&self, index: usize) -> Option<(SegmentId, &Segment<F>)> {
        self.segments.get(index).map(|s| (SegmentId(index), s))
    }

    /// Segments attached directly to the body, in attachment order.
    pub fn roots(&self) -> &[SegmentId] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment<F>)> + '_ {
        self.segments.iter().enumerate().map(|(i, s)| (SegmentId(i), s))
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub(crate) fn check(&self, id: SegmentId) -> Result<(), RigError> {
        if id.0 < self.segments.len() {
            Ok(())
        } else {
            Err(RigError::SegmentOutOfBounds { index: id.0, count: self.segments.len() })
        }
    }

    /// Scale a segment's length by a health factor, clamped to [0, 1].
    pub fn set_health(&mut self, id: SegmentId, health: F) -> Result<(), RigError> {
        self.check(id)?;
        let health = if health.is_finite() { health } else { F::zero() };
        self.segments[id.0].health = health.clamp(F::zero(), F::one());
        Ok(())
    }

    /// Relax a segment toward its rest angle and re-anchor it to its parent.
    ///
    /// With `flex`, the relative angle is pulled toward the rest angle by
    /// `1/stiffness`, perturbed by breathing sway and ambient tremor, then clamped
    /// to the segment's range. Without it only the angle is normalized and the
    /// position re-projected. With `recurse`, descendants follow in pre-order.
    pub fn relax(&mut self, id: SegmentId, recurse: bool, flex: bool, frame: &Frame<'_, F>) {
        if !recurse {
            self.relax_one(id, flex, frame);
            return;
        }
        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            self.relax_one(next, flex, frame);
            stack.extend(self.segments[next.0].children.iter().rev().copied());
        }
    }

    /// Flexing relaxation of every tree hanging off the body.
    pub fn relax_all(&mut self, frame: &Frame<'_, F>) {
        for i in 0..self.roots.len() {
            let root = self.roots[i];
            self.relax(root, true, true, frame);
        }
    }

    fn relax_one(&mut self, id: SegmentId, flex: bool, frame: &Frame<'_, F>) {
        let (parent_pos, parent_angle) = self.pose(self.segments[id.0].parent);
        let seg = &mut self.segments[id.0];

        seg.rel_angle = wrap_near(seg.rel_angle, seg.def_angle);
        let (lo, hi) = seg.angle_limits();
        if flex {
            let sway = (frame.time * F::from_f32(SWAY_RATE) + seg.breathing_offset).sin()
                * F::from_f32(SWAY_AMPLITUDE);
            let tremor = frame.noise_at(id.0) * F::from_f32(TREMOR_SCALE);
            let target = (seg.rel_angle - seg.def_angle) / seg.stiffness + seg.def_angle;
            seg.rel_angle = (target + sway + tremor).clamp(lo, hi);
        }

        let swell = F::one()
            + (frame.time * F::from_f32(SWELL_RATE) + seg.breathing_offset).sin()
                * F::from_f32(SWELL_AMPLITUDE);
        seg.size = seg.original_size * swell * seg.health;
        seg.abs_angle = parent_angle + seg.rel_angle;
        seg.position = parent_pos + Vec2::from_angle(seg.abs_angle).scale(seg.size);

        let half = seg.range * F::half();
        seg.tension = if half > F::zero() {
            (seg.rel_angle - seg.def_angle).abs() / half
        } else {
            F::zero()
        };
    }
}
