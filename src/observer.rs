//! Frame observer trait for monitoring a creature update.

use crate::limb::LimbId;

/// Trait for observing the phases of [`Creature::follow`](crate::Creature::follow).
///
/// Implement this trait to watch gait transitions and update order (e.g. for
/// debugging or test harnesses). All methods have default no-op implementations.
pub trait FrameObserver {
    /// Called after the body's speed, heading and position have been integrated.
    fn on_body_integrated(&mut self) {}

    /// Called after the whole segment tree has been relaxed top-down.
    fn on_tree_relaxed(&mut self) {}

    /// Called after each limb has run its IK (and gait) pass.
    fn on_limb_updated(&mut self, _limb: LimbId) {}

    /// Called when a leg lifts its foot.
    fn on_step_started(&mut self, _limb: LimbId) {}

    /// Called when a leg plants its foot.
    fn on_step_landed(&mut self, _limb: LimbId) {}

    /// Called when a frame is fully complete.
    fn on_frame_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpFrameObserver;

impl FrameObserver for NoOpFrameObserver {}
