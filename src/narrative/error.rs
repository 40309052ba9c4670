//! Errors raised while assembling the narrative core
//!
//! Nothing in the per-frame path returns these: a running [`FrameLoop`] absorbs every
//! failure by falling back to the home pose. They only surface when sections, scene
//! objects or smoothing parameters are being configured.
//!
//! [`FrameLoop`]: super::frame_loop::FrameLoop

use thiserror::Error;

/// Configuration errors for sections, scene objects and camera smoothing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NarrativeError {
    #[error("scene object identifier must not be empty")]
    EmptyObjectId,

    #[error("`{0}` names the home pose and cannot be used as a scene object identifier")]
    ReservedObjectId(String),

    #[error("scene object `{0}` is already registered")]
    DuplicateObject(String),

    #[error("scene object `{0}` has a non-finite rotation speed")]
    InvalidRotationSpeed(String),

    #[error("scene object `{0}` has a non-finite base position")]
    InvalidPosition(String),

    #[error("group orbit rate {0} must be finite")]
    InvalidGroupRate(f32),

    #[error("section identifier must not be empty")]
    EmptySectionId,

    #[error("section `{0}` is declared more than once")]
    DuplicateSection(String),

    #[error("per-tick smoothing factor {0} is outside the open interval (0, 1)")]
    InvalidAlpha(f32),

    #[error("exponential smoothing rate {0} must be positive and finite")]
    InvalidRate(f32),
}
