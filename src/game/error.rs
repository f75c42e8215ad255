//! Generation Errors
//!
//! Malformed generation parameters are rejected at generation entry with one
//! of these. Out-of-range block codes are not errors; the palette degrades them.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("angle step {0} degrees does not evenly divide 360")]
    InvalidAngleStep(u32),

    #[error("{layer} radius must not be negative, got {value}")]
    NegativeRadius { layer: &'static str, value: f32 },

    #[error("{layer} variance must not be negative, got {value}")]
    NegativeVariance { layer: &'static str, value: f32 },

    #[error("{layer} offset must not be negative, got {value}")]
    NegativeOffset { layer: &'static str, value: f32 },

    #[error("{layer} {field} must be positive, got {value}")]
    NonPositiveExtent {
        layer: &'static str,
        field: &'static str,
        value: f32,
    },

    #[error("lattice has a zero-sized axis")]
    EmptyLattice,

    #[error("lattice {size:?} exceeds {max} cells")]
    LatticeTooLarge { size: [u32; 3], max: u64 },

    #[error("random walk needs at least one block")]
    EmptyWalk,
}
