/// Camera: a frame and a frustum that travel together.
///
/// The frame is the pose, the frustum the view volume. Moving the frame
/// does not touch the frustum; call [`Camera::update`] once the pose is
/// final for the frame so the frustum planes follow.

use crate::math::Matrix44f;
use super::frame::Frame;
use super::frustum::Frustum;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    frame: Frame,
    frustum: Frustum,
}

impl Camera {
    /// Create a camera and place its frustum at `frame`.
    pub fn new(frame: Frame, frustum: Frustum) -> Self {
        let mut camera = Self { frame, frustum };
        camera.update();
        camera
    }

    // ===== GETTERS =====

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Mutable pose. The frustum is stale until `update()`.
    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Mutable frustum, for reconfiguring the projection.
    pub fn frustum_mut(&mut self) -> &mut Frustum {
        &mut self.frustum
    }

    /// View matrix (world to camera).
    pub fn view_matrix(&self) -> Matrix44f {
        self.frame.camera_matrix(false)
    }

    pub fn projection_matrix(&self) -> Matrix44f {
        *self.frustum.projection_matrix()
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Matrix44f {
        self.projection_matrix() * self.view_matrix()
    }

    // ===== SETTERS =====

    pub fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
    }

    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
    }

    /// Re-transform the frustum by the current frame.
    pub fn update(&mut self) {
        self.frustum.transform(&self.frame);
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
