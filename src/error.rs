//! Error type shared by the sketch pipeline.
//!
//! Only input-shape problems are errors. Degenerate geometry (zero-length
//! chords, vanishing gradients, zero denominators) is skipped where it is
//! found and SVD non-convergence is reported through [`crate::svd::SvdReport`].
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SketchError {
    /// Two collaborating fields or token stores disagree on `(width, height)`.
    #[error("dimension mismatch: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// A field buffer does not hold `width * height` samples.
    #[error("field buffer holds {found} samples, expected {expected}")]
    FieldLength { expected: usize, found: usize },
    #[error("at least one token store is required")]
    EmptyInput,
    #[error("schedule tables differ in length: {link} link rounds, {replace} replace rounds")]
    ScheduleMismatch { link: usize, replace: usize },
    #[error("requested {requested} rounds but the schedule holds {available}")]
    ScheduleExhausted { requested: usize, available: usize },
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = SketchError> = std::result::Result<T, E>;
