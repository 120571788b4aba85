//! Slowly drifting noise shared by every segment as a micro-tremor source.

use crate::float::Float;
use crate::rng::SimRng;
use alloc::vec::Vec as AllocVec;

/// Number of slots in a default field.
pub const DEFAULT_FIELD_LEN: usize = 100;

/// Fixed-size array of values in [-1, 1] that random-walk once per frame.
///
/// Segments index it with their creation counter, so neighbouring segments
/// tremble independently while the overall motion stays smooth.
#[derive(Clone, Debug)]
pub struct AmbientField<F: Float> {
    values: AllocVec<F>,
    step: F,
    decay: F,
}

impl<F: Float> AmbientField<F> {
    /// Field with `len` slots seeded uniformly in [-1, 1).
    pub fn new<R: SimRng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let values = (0..len)
            .map(|_| rng.gen_centered::<F>() * F::two())
            .collect();
        AmbientField {
            values,
            step: F::from_f32(0.1),
            decay: F::from_f32(0.98),
        }
    }

    /// Field with every slot at zero. Sampling always yields zero until it drifts.
    pub fn calm(len: usize) -> Self {
        AmbientField {
            values: alloc::vec![F::zero(); len],
            step: F::from_f32(0.1),
            decay: F::from_f32(0.98),
        }
    }

    /// Advance one frame: bounded random step, decay toward zero, clamp to [-1, 1].
    pub fn drift<R: SimRng + ?Sized>(&mut self, rng: &mut R) {
        let (lo, hi) = (-F::one(), F::one());
        for v in self.values.iter_mut() {
            let stepped = (*v + rng.gen_centered::<F>() * self.step) * self.decay;
            *v = stepped.clamp(lo, hi);
        }
    }

    /// Value for `index`, wrapping around the field. An empty field reads as zero.
    pub fn sample(&self, index: usize) -> F {
        sample_slice(&self.values, index)
    }

    pub fn values(&self) -> &[F] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub(crate) fn sample_slice<F: Float>(values: &[F], index: usize) -> F {
    if values.is_empty() {
        F::zero()
    } else {
        values[index % values.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn new_field_is_bounded() {
        let mut rng = seeded(1);
        let field: AmbientField<f32> = AmbientField::new(DEFAULT_FIELD_LEN, &mut rng);
        assert_eq!(field.len(), DEFAULT_FIELD_LEN);
        assert!(field.values().iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn drift_stays_bounded() {
        let mut rng = seeded(2);
        let mut field: AmbientField<f64> = AmbientField::new(16, &mut rng);
        for _ in 0..5000 {
            field.drift(&mut rng);
        }
        assert!(field.values().iter().all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn drift_moves_values_smoothly() {
        let mut rng = seeded(3);
        let mut field: AmbientField<f64> = AmbientField::new(16, &mut rng);
        let before: AllocVec<f64> = field.values().to_vec();
        field.drift(&mut rng);
        for (a, b) in before.iter().zip(field.values()) {
            // one step is at most 0.05 plus 2% decay of a unit value
            assert!((a - b).abs() <= 0.05 * 0.98 + 0.02 + 1e-12);
        }
    }

    #[test]
    fn sample_wraps_and_empty_is_zero() {
        let mut rng = seeded(4);
        let field: AmbientField<f32> = AmbientField::new(10, &mut rng);
        assert_eq!(field.sample(3), field.sample(13));
        let empty: AmbientField<f32> = AmbientField::calm(0);
        assert_eq!(empty.sample(5), 0.0);
    }
}
