//! Error types for scene_geometry
//!
//! The numeric core never fails: degenerate input produces NaN or Infinity
//! that callers check with `is_valid()`. These errors belong to the checked
//! layer on top of it.

use std::fmt;

/// Result type for checked geometry operations
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Geometry errors
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A frustum query ran before the first `transform()`
    NotTransformed(String),

    /// Projection parameters that cannot describe a finite volume
    InvalidProjection(String),

    /// A computation produced a non-finite or zero-length result
    DegenerateGeometry(String),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::NotTransformed(msg) => write!(f, "Frustum not transformed: {}", msg),
            GeometryError::InvalidProjection(msg) => write!(f, "Invalid projection: {}", msg),
            GeometryError::DegenerateGeometry(msg) => write!(f, "Degenerate geometry: {}", msg),
        }
    }
}

impl std::error::Error for GeometryError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
