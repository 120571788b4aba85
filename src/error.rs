//! Error types for rig construction.
//!
//! Frame updates never fail; these only come back from the builders.

use thiserror::Error;

/// Errors that can occur while assembling a creature.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RigError {
    /// Stiffness must be positive and finite.
    #[error("stiffness must be positive and finite")]
    InvalidStiffness,
    /// Segment size must be non-negative and finite.
    #[error("segment size must be non-negative and finite")]
    InvalidSize,
    /// Angular range must be non-negative and finite.
    #[error("angular range must be non-negative and finite")]
    InvalidRange,
    /// Segment index is out of bounds.
    #[error("segment index {index} out of bounds (count: {count})")]
    SegmentOutOfBounds { index: usize, count: usize },
    /// Limb index is out of bounds.
    #[error("limb index {index} out of bounds (count: {count})")]
    LimbOutOfBounds { index: usize, count: usize },
}
