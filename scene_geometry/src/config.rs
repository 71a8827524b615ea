//! Projection parameters and the tolerance policy.
//!
//! `Projection` is the value form of the three frustum setters, so a
//! projection can be stored, compared and validated before it reaches a
//! `Frustum`. `Tolerance` gathers every epsilon the crate uses.

use crate::error::{GeometryError, Result};

/// Projection parameters for a [`Frustum`](crate::camera::Frustum)
///
/// `fov_degrees` is the vertical field of view in degrees; every other angle
/// in the crate is in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Orthographic {
        x_min: f32,
        x_max: f32,
        y_min: f32,
        y_max: f32,
        z_min: f32,
        z_max: f32,
    },
    Perspective {
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    /// Perspective with explicit near-plane bounds. The far-plane corners
    /// still come from `fov_degrees` and `aspect`.
    AsymmetricPerspective {
        fov_degrees: f32,
        aspect: f32,
        x_min: f32,
        x_max: f32,
        y_min: f32,
        y_max: f32,
        near: f32,
        far: f32,
    },
}

impl Default for Projection {
    /// The unit cube `[-1, 1]³`
    fn default() -> Self {
        Projection::Orthographic {
            x_min: -1.0,
            x_max: 1.0,
            y_min: -1.0,
            y_max: 1.0,
            z_min: -1.0,
            z_max: 1.0,
        }
    }
}

impl Projection {
    pub fn is_perspective(&self) -> bool {
        !matches!(self, Projection::Orthographic { .. })
    }

    /// Check that the parameters describe a finite, non-empty volume.
    ///
    /// The unchecked frustum setters accept anything and let NaN or Infinity
    /// through; this is the gate for callers that want an error instead.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Projection::Orthographic { x_min, x_max, y_min, y_max, z_min, z_max } => {
                check_finite(&[x_min, x_max, y_min, y_max, z_min, z_max])?;
                check_range("x", x_min, x_max)?;
                check_range("y", y_min, y_max)?;
                check_range("z", z_min, z_max)
            }
            Projection::Perspective { fov_degrees, aspect, near, far } => {
                check_finite(&[fov_degrees, aspect, near, far])?;
                check_perspective(fov_degrees, aspect, near, far)
            }
            Projection::AsymmetricPerspective {
                fov_degrees, aspect, x_min, x_max, y_min, y_max, near, far,
            } => {
                check_finite(&[fov_degrees, aspect, x_min, x_max, y_min, y_max, near, far])?;
                check_perspective(fov_degrees, aspect, near, far)?;
                check_range("x", x_min, x_max)?;
                check_range("y", y_min, y_max)
            }
        }
    }
}

fn check_finite(values: &[f32]) -> Result<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(GeometryError::InvalidProjection(format!(
            "non-finite parameter in {:?}",
            values
        )))
    }
}

fn check_range(axis: &str, min: f32, max: f32) -> Result<()> {
    if min == max {
        return Err(GeometryError::InvalidProjection(format!(
            "{axis}_min == {axis}_max ({min})"
        )));
    }
    Ok(())
}

fn check_perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Result<()> {
    if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
        return Err(GeometryError::InvalidProjection(format!(
            "fov {fov_degrees} outside (0, 180) degrees"
        )));
    }
    if aspect <= 0.0 {
        return Err(GeometryError::InvalidProjection(format!("aspect {aspect} <= 0")));
    }
    if near <= 0.0 {
        return Err(GeometryError::InvalidProjection(format!("near {near} <= 0")));
    }
    if near == far {
        return Err(GeometryError::InvalidProjection(format!("near == far ({near})")));
    }
    Ok(())
}

/// Tolerances used across the crate
///
/// - `comparison_epsilon`: approximate comparisons (`Frame::approx_eq`).
///   Exact comparisons (`Frame::are_same`) ignore it.
/// - `entry_point_radius`: radius a candidate entry point may sit outside
///   the frustum and still be accepted by `Frustum::entry_point`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub comparison_epsilon: f32,
    pub entry_point_radius: f32,
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance {
        comparison_epsilon: 1e-5,
        entry_point_radius: 0.1,
    };
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
