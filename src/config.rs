//! Construction and tuning parameters for segments, limbs, gaits and the body.

use crate::float::Float;

/// Rest geometry of one segment.
///
/// # Builder Pattern
/// ```
/// use wriggle::config::SegmentDef;
///
/// let thigh: SegmentDef<f32> = SegmentDef::new(72.0)
///     .with_angle(-0.6)
///     .with_range(core::f32::consts::PI)
///     .with_stiffness(0.8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentDef<F: Float> {
    /// Rest length of the link to the parent.
    pub size: F,
    /// Rest angle relative to the parent's heading.
    pub angle: F,
    /// Total angular freedom around `angle` (half on each side).
    pub range: F,
    /// Divides the deviation from the rest angle on every flexing relaxation. Must be positive.
    pub stiffness: F,
}

impl<F: Float> SegmentDef<F> {
    /// Straight segment of `size` with a quarter turn of freedom and unit stiffness.
    pub fn new(size: F) -> Self {
        SegmentDef {
            size,
            angle: F::zero(),
            range: F::pi() * F::half(),
            stiffness: F::one(),
        }
    }

    pub fn with_angle(mut self, angle: F) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_range(mut self, range: F) -> Self {
        self.range = range;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }
}

/// How a limb chain is collected and how fast its end-effector may travel.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LimbConfig<F: Float> {
    /// Number of segments in the chain, counted up from the end-effector. Floored at 1.
    pub length: usize,
    /// Distance the end-effector may close on its target per frame.
    pub speed: F,
    /// Exponential smoothing factor applied to the requested target, in (0, 1).
    pub smoothing: F,
}

impl<F: Float> LimbConfig<F> {
    pub fn new(length: usize, speed: F) -> Self {
        LimbConfig {
            length: length.max(1),
            speed,
            smoothing: F::from_f32(0.1),
        }
    }

    pub fn with_smoothing(mut self, smoothing: F) -> Self {
        self.smoothing = smoothing;
        self
    }
}

/// Timing and geometry of a leg's step cycle.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaitConfig<F: Float> {
    /// Step progress gained per frame. Default: 0.15 (a step lasts 7 frames).
    pub step_rate: F,
    /// Peak lift of the foot mid-step. Default: 20.
    pub step_height: F,
    /// Angular frequency of the gait trigger against the frame clock. Default: 0.05.
    pub trigger_frequency: F,
    /// The trigger opens while `sin(time * frequency + phase)` exceeds this. Default: 0.3.
    pub trigger_threshold: F,
    /// Reach as a fraction of the rest hip-to-foot distance. Default: 0.9.
    pub reach_factor: F,
    /// A planted foot may step once it lags its goal by this fraction of reach. Default: 0.8.
    pub step_distance_fraction: F,
    /// Per-axis jitter on a new goal, as a fraction of reach (total span). Default: 0.3.
    pub jitter: F,
    /// Smallest reach a leg may have. Default: 1.0.
    pub min_reach: F,
}

impl<F: Float> GaitConfig<F> {
    pub fn new() -> Self {
        GaitConfig {
            step_rate: F::from_f32(0.15),
            step_height: F::from_f32(20.0),
            trigger_frequency: F::from_f32(0.05),
            trigger_threshold: F::from_f32(0.3),
            reach_factor: F::from_f32(0.9),
            step_distance_fraction: F::from_f32(0.8),
            jitter: F::from_f32(0.3),
            min_reach: F::one(),
        }
    }

    pub fn with_step_rate(mut self, step_rate: F) -> Self {
        self.step_rate = step_rate;
        self
    }

    pub fn with_step_height(mut self, step_height: F) -> Self {
        self.step_height = step_height;
        self
    }

    pub fn with_trigger(mut self, frequency: F, threshold: F) -> Self {
        self.trigger_frequency = frequency;
        self.trigger_threshold = threshold;
        self
    }

    pub fn with_jitter(mut self, jitter: F) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_min_reach(mut self, min_reach: F) -> Self {
        self.min_reach = min_reach;
        self
    }

    /// Upper bound on the frames a step takes to land.
    pub fn frames_per_step(&self) -> usize {
        let rate = self.step_rate.max(F::from_f32(1e-6));
        (F::one() / rate).ceil().to_usize().max(1)
    }
}

impl<F: Float> Default for GaitConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Body integrator constants.
///
/// The `f_` terms drive forward speed, the `r_` terms rotation. Each pair of
/// `*_res` (proportional drag) and `*_fric` (constant drag) bleeds speed every frame,
/// and `*_thresh` is the dead zone below which the body stops accelerating.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocomotionConfig<F: Float> {
    pub f_accel: F,
    pub f_fric: F,
    pub f_res: F,
    pub f_thresh: F,
    pub r_accel: F,
    pub r_fric: F,
    pub r_res: F,
    pub r_thresh: F,
    /// Half-width of the random heading tremor applied to each move, in radians.
    pub tremor: F,
    /// Heartbeat phase gained per frame. Default: 0.2.
    pub heartbeat_rate: F,
    /// Breathing phase gained per frame. Default: 0.05.
    pub breathing_rate: F,
    /// Radius of the body core, for renderers. Default: 6.
    pub body_size: F,
}

impl<F: Float> LocomotionConfig<F> {
    /// Constants of the stock lizard at scale `s`.
    pub fn lizard(s: F) -> Self {
        LocomotionConfig {
            f_accel: s * F::from_f32(8.0),
            f_fric: s * F::from_f32(1.5),
            f_res: F::from_f32(0.3),
            f_thresh: F::from_f32(16.0),
            r_accel: F::from_f32(0.4),
            r_fric: F::from_f32(0.06),
            r_res: F::from_f32(0.4),
            r_thresh: F::from_f32(0.25),
            ..Self::new()
        }
    }

    pub fn new() -> Self {
        LocomotionConfig {
            f_accel: F::one(),
            f_fric: F::from_f32(0.1),
            f_res: F::from_f32(0.3),
            f_thresh: F::from_f32(16.0),
            r_accel: F::from_f32(0.4),
            r_fric: F::from_f32(0.06),
            r_res: F::from_f32(0.4),
            r_thresh: F::from_f32(0.25),
            tremor: F::from_f32(0.01),
            heartbeat_rate: F::from_f32(0.2),
            breathing_rate: F::from_f32(0.05),
            body_size: F::from_f32(6.0),
        }
    }

    pub fn with_forward(mut self, accel: F, fric: F, res: F, thresh: F) -> Self {
        self.f_accel = accel;
        self.f_fric = fric;
        self.f_res = res;
        self.f_thresh = thresh;
        self
    }

    pub fn with_rotation(mut self, accel: F, fric: F, res: F, thresh: F) -> Self {
        self.r_accel = accel;
        self.r_fric = fric;
        self.r_res = res;
        self.r_thresh = thresh;
        self
    }

    pub fn with_tremor(mut self, tremor: F) -> Self {
        self.tremor = tremor;
        self
    }

    pub fn with_body_size(mut self, body_size: F) -> Self {
        self.body_size = body_size;
        self
    }
}

impl<F: Float> Default for LocomotionConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_step_lasts_seven_frames() {
        let gait: GaitConfig<f32> = GaitConfig::new();
        assert_eq!(gait.frames_per_step(), 7);
        assert_eq!(GaitConfig::<f64>::new().with_step_rate(0.5).frames_per_step(), 2);
    }

    #[test]
    fn tiny_step_rate_is_floored() {
        let frames = GaitConfig::<f64>::new().with_step_rate(0.0).frames_per_step();
        assert!((999_999..=1_000_001).contains(&frames), "{}", frames);
        assert_eq!(GaitConfig::<f32>::new().with_step_rate(2.0).frames_per_step(), 1);
    }

    #[test]
    fn limb_length_is_floored() {
        assert_eq!(LimbConfig::<f32>::new(0, 1.0).length, 1);
    }
}
