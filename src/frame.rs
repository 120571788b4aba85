//! Read-only per-frame context handed down through relaxation and gait updates.

use crate::float::Float;
use crate::noise::{sample_slice, AmbientField};

/// Clock and ambient noise for one frame.
#[derive(Copy, Clone, Debug)]
pub struct Frame<'a, F: Float> {
    /// Frames elapsed since the simulation started.
    pub time: F,
    /// Snapshot of the ambient field; empty means no micro-tremor.
    pub noise: &'a [F],
}

impl<'a, F: Float> Frame<'a, F> {
    pub fn new(time: u64, field: &'a AmbientField<F>) -> Self {
        Frame {
            time: F::from_u64(time),
            noise: field.values(),
        }
    }

    /// Frame zero with no noise. Used when laying out a freshly built rig.
    pub fn at_rest() -> Self {
        Frame {
            time: F::zero(),
            noise: &[],
        }
    }

    pub(crate) fn noise_at(&self, index: usize) -> F {
        sample_slice(self.noise, index)
    }
}
