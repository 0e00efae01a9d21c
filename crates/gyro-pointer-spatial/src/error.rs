//! Error types for the spatial pipeline.

/// Errors raised inside the spatial pipeline.
///
/// These never escape [`crate::SpatialProcessor`]'s public operations; they are
/// logged and collapsed into `false` / `None` there. Input validation is the one
/// place callers see them directly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpatialError {
    #[error("{field} out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),

    #[error("numeric fault while computing {0}")]
    NumericFault(&'static str),
}

pub type Result<T> = std::result::Result<T, SpatialError>;
