/// Frame: an orthonormal pose built from an origin plus forward and up axes.
///
/// The right axis is never stored; it is `cross(up, forward)` computed on
/// demand, so it always follows the current orientation.
///
/// Rotations do not re-orthogonalize. Floating-point drift accumulates
/// across many small rotations and the owner is expected to call
/// [`Frame::normalize`] from time to time.

use std::fmt;
use crate::config::Tolerance;
use crate::error::{GeometryError, Result};
use crate::math::utils::close_enough;
use crate::math::{Matrix33f, Matrix44f, Vector3f};

/// Camera or object placement in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    origin: Vector3f,
    forward: Vector3f,
    up: Vector3f,
    /// Eye-to-centre distance when built with `from_look_at`, -1 otherwise.
    look_at_distance: f32,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// At the origin, looking down -Z with +Y up.
    pub const fn new() -> Self {
        Self {
            origin: Vector3f::new(0.0, 0.0, 0.0),
            forward: Vector3f::new(0.0, 0.0, -1.0),
            up: Vector3f::new(0.0, 1.0, 0.0),
            look_at_distance: -1.0,
        }
    }

    pub fn from_axes(origin: Vector3f, forward: Vector3f, up: Vector3f) -> Self {
        Self { origin, forward, up, look_at_distance: -1.0 }
    }

    /// Frame describing the direction from `centre` to `eye`.
    ///
    /// `forward` is the unit vector `eye - centre`, the eye distance is kept
    /// for [`Frame::look_at_eye`] and the origin stays at zero.
    pub fn from_look_at(eye: &Vector3f, centre: &Vector3f, up: &Vector3f) -> Self {
        let mut direction = *eye - *centre;
        let distance = direction.normalize();
        Self {
            origin: Vector3f::ZERO,
            forward: direction,
            up: *up,
            look_at_distance: distance,
        }
    }

    /// Eye position that, looking at `centre`, reproduces this frame.
    pub fn look_at_eye(&self, centre: &Vector3f) -> Vector3f {
        self.forward * self.look_at_distance + *centre
    }

    pub fn look_at_distance(&self) -> f32 {
        self.look_at_distance
    }

    // ===== AXES =====

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vector3f) {
        self.origin = origin;
    }

    pub fn forward(&self) -> Vector3f {
        self.forward
    }

    pub fn set_forward(&mut self, forward: Vector3f) {
        self.forward = forward;
    }

    pub fn up(&self) -> Vector3f {
        self.up
    }

    pub fn set_up(&mut self, up: Vector3f) {
        self.up = up;
    }

    /// Local X (right): `cross(up, forward)`.
    pub fn x_axis(&self) -> Vector3f {
        Vector3f::cross(&self.up, &self.forward)
    }

    pub fn y_axis(&self) -> Vector3f {
        self.up
    }

    pub fn z_axis(&self) -> Vector3f {
        self.forward
    }

    // ===== TRANSLATION =====

    pub fn translate_world(&mut self, x: f32, y: f32, z: f32) {
        self.origin += Vector3f::new(x, y, z);
    }

    /// Translate along the frame's own axes.
    pub fn translate_local(&mut self, x: f32, y: f32, z: f32) {
        self.move_forward(z);
        self.move_up(y);
        self.move_right(x);
    }

    pub fn move_forward(&mut self, delta: f32) {
        self.origin += self.forward * delta;
    }

    pub fn move_up(&mut self, delta: f32) {
        self.origin += self.up * delta;
    }

    pub fn move_right(&mut self, delta: f32) {
        self.origin += self.x_axis() * delta;
    }

    // ===== MATRICES =====

    /// Model matrix: columns `x_axis`, `up`, `forward` and the origin.
    ///
    /// With `rotation_only` the translation column is zero.
    pub fn matrix(&self, rotation_only: bool) -> Matrix44f {
        let translation = if rotation_only { Vector3f::ZERO } else { self.origin };
        Matrix44f::from_columns(
            self.x_axis().extend(0.0),
            self.up.extend(0.0),
            self.forward.extend(0.0),
            translation.extend(1.0),
        )
    }

    /// View matrix for a camera placed by this frame.
    ///
    /// The camera looks down its local -Z, so the rotation rows are
    /// `cross(up, -forward)`, `up` and `-forward`. Unless `rotation_only`,
    /// a translation by `-origin` is applied first.
    pub fn camera_matrix(&self, rotation_only: bool) -> Matrix44f {
        let z = -self.forward;
        let x = Vector3f::cross(&self.up, &z);

        let rotation = Matrix44f::from_columns(
            x.extend(0.0),
            self.up.extend(0.0),
            z.extend(0.0),
            Vector3f::ZERO.extend(1.0),
        )
        .transpose();

        if rotation_only {
            return rotation;
        }
        let translation = Matrix44f::translation(-self.origin.x, -self.origin.y, -self.origin.z);
        rotation * translation
    }

    // ===== ROTATION =====

    /// Pitch: rotate up and forward around the local X axis.
    pub fn rotate_local_x(&mut self, angle: f32) {
        let axis = self.x_axis();
        let rotation = Matrix33f::rotation(angle, axis.x, axis.y, axis.z);
        self.up = rotation.rotate_vector(&self.up);
        self.forward = rotation.rotate_vector(&self.forward);
    }

    /// Yaw: rotate forward around up.
    pub fn rotate_local_y(&mut self, angle: f32) {
        let rotation = Matrix33f::rotation(angle, self.up.x, self.up.y, self.up.z);
        self.forward = rotation.rotate_vector(&self.forward);
    }

    /// Roll: rotate up around forward.
    pub fn rotate_local_z(&mut self, angle: f32) {
        let rotation = Matrix33f::rotation(angle, self.forward.x, self.forward.y, self.forward.z);
        self.up = rotation.rotate_vector(&self.up);
    }

    /// Rotate up and forward around a world-space axis.
    pub fn rotate_world(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let rotation = Matrix33f::rotation(angle, x, y, z);
        self.up = rotation.rotate_vector(&self.up);
        self.forward = rotation.rotate_vector(&self.forward);
    }

    /// Rotate around an axis given in the frame's local coordinates.
    pub fn rotate_local(&mut self, angle: f32, x: f32, y: f32, z: f32) {
        let world = self.local_to_world(&Vector3f::new(x, y, z), true);
        self.rotate_world(angle, world.x, world.y, world.z);
    }

    /// Re-orthogonalize: up is kept, forward is rebuilt perpendicular to it,
    /// both end up unit length.
    pub fn normalize(&mut self) {
        let cross = Vector3f::cross(&self.up, &self.forward);
        self.forward = Vector3f::cross(&cross, &self.up);
        self.up.normalize();
        self.forward.normalize();
    }

    /// [`Frame::normalize`] that refuses a zero-length or parallel axis pair.
    ///
    /// On error the frame is left untouched.
    pub fn checked_normalize(&mut self) -> Result<()> {
        let cross = Vector3f::cross(&self.up, &self.forward);
        if !cross.is_valid() || cross.length_squared() == 0.0 {
            crate::geom_error!(
                "geometry::Frame",
                "cannot normalize: up ({}) and forward ({}) span no plane",
                self.up,
                self.forward
            );
            return Err(GeometryError::DegenerateGeometry(format!(
                "up ({}) and forward ({}) are zero or parallel",
                self.up, self.forward
            )));
        }
        self.normalize();
        Ok(())
    }

    // ===== COORDINATE CONVERSION =====

    /// Local coordinates to world coordinates. `rotation_only` skips the
    /// translation by the origin.
    pub fn local_to_world(&self, local: &Vector3f, rotation_only: bool) -> Vector3f {
        let rotated = self.matrix(true).rotate_vector(local);
        if rotation_only {
            rotated
        } else {
            rotated + self.origin
        }
    }

    /// World coordinates to local coordinates, through the inverse of the
    /// rotation matrix. A degenerate frame gives non-finite results.
    pub fn world_to_local(&self, world: &Vector3f) -> Vector3f {
        let relative = *world - self.origin;
        self.matrix(true).inverse().rotate_vector(&relative)
    }

    /// Apply the full model matrix to a point.
    pub fn transform_point(&self, point: &Vector3f) -> Vector3f {
        self.matrix(false).transform_point(point)
    }

    /// Apply only the rotation to a direction.
    pub fn rotate_vector(&self, vector: &Vector3f) -> Vector3f {
        self.matrix(true).rotate_vector(vector)
    }

    // ===== COMPARISON =====

    /// Exact comparison of origin, axes and look-at distance.
    pub fn are_same(&self, other: &Frame) -> bool {
        self == other
    }

    /// Component-wise comparison within `tolerance.comparison_epsilon`.
    pub fn approx_eq(&self, other: &Frame, tolerance: &Tolerance) -> bool {
        let epsilon = tolerance.comparison_epsilon;
        let close = |a: &Vector3f, b: &Vector3f| {
            (0..3).all(|i| close_enough(a[i], b[i], epsilon))
        };
        close(&self.origin, &other.origin)
            && close(&self.forward, &other.forward)
            && close(&self.up, &other.up)
            && close_enough(self.look_at_distance, other.look_at_distance, epsilon)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o=({}) f=({}) u=({})", self.origin, self.forward, self.up)
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
