/// VisibleSet: result of culling.
///
/// Holds a snapshot of the frustum at culling time and the indices of the
/// spheres that passed. Ephemeral: lives for one frame.

use crate::camera::Frustum;

#[derive(Debug, Clone, PartialEq)]
pub struct VisibleSet {
    frustum: Frustum,
    visible: Vec<usize>,
}

impl VisibleSet {
    /// Only cullers create these.
    pub(crate) fn new(frustum: Frustum, visible: Vec<usize>) -> Self {
        Self { frustum, visible }
    }

    /// Frustum snapshot at the time of culling.
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Indices into the culled slice, in ascending order.
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.visible.binary_search(&index).is_ok()
    }
}

#[cfg(test)]
#[path = "visible_set_tests.rs"]
mod tests;
