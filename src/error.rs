use thiserror::Error;

/// Failures at the boundary of the simulation core.
///
/// Per-frame update steps never fail; these are raised only where outside
/// input enters the core or where a vertex buffer leaves it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MusyncError {
    #[error("non-finite {what} input: {value}")]
    NonFiniteInput { what: &'static str, value: f32 },

    #[error("vertex {index} is not finite after deformation")]
    NonFiniteVertex { index: usize },

    #[error("vertex buffer length mismatch: expected {expected}, got {actual}")]
    VertexCountMismatch { expected: usize, actual: usize },

    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("degenerate sphere mesh: radius={radius}, segments={width}x{height}")]
    DegenerateMesh { radius: f32, width: u32, height: u32 },
}

pub type Result<T> = std::result::Result<T, MusyncError>;

/// Reject NaN/Infinity at an input boundary.
#[inline]
pub fn ensure_finite(what: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MusyncError::NonFiniteInput { what, value })
    }
}
