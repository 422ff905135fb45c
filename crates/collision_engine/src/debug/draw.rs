//! Debug drawing primitives and the render sink contract
//!
//! Based on Game Engine Architecture 3rd Edition, Section 10.2:
//! "Debug drawing facilities allow programmers to render simple shapes like
//! lines, points, spheres and boxes for debugging and visualization purposes."
//!
//! The collision code never talks to a renderer directly. It submits
//! primitives to a [`RenderSink`] passed in by the caller.

use crate::foundation::math::{Mat4, Vec4};

/// Receiver of debug primitives for the current frame
///
/// Every primitive is a unit shape placed by a world transform: a unit cube
/// centered at the origin, a unit sphere, or a unit quad in the XY plane
/// facing +Z. Submission is fire-and-forget.
pub trait RenderSink {
    /// Schedule a wireframe unit cube
    fn add_wire_box(&mut self, transform: Mat4, color: Vec4);

    /// Schedule a wireframe unit sphere
    fn add_wire_sphere(&mut self, transform: Mat4, color: Vec4);

    /// Schedule a solid single-sided unit quad
    fn add_plane(&mut self, transform: Mat4, color: Vec4);
}

/// Debug shape primitives that can be rendered for visualization
#[derive(Clone, Debug, PartialEq)]
pub enum DebugShape {
    /// Wireframe cube
    WireBox {
        /// World transform of the unit cube
        transform: Mat4,
        /// RGBA color
        color: Vec4,
    },

    /// Wireframe sphere
    WireSphere {
        /// World transform of the unit sphere
        transform: Mat4,
        /// RGBA color
        color: Vec4,
    },

    /// Single-sided quad
    Plane {
        /// World transform of the unit quad
        transform: Mat4,
        /// RGBA color
        color: Vec4,
    },
}

impl DebugShape {
    /// World transform of the primitive
    pub fn transform(&self) -> &Mat4 {
        match self {
            DebugShape::WireBox { transform, .. }
            | DebugShape::WireSphere { transform, .. }
            | DebugShape::Plane { transform, .. } => transform,
        }
    }

    /// Color of the primitive
    pub fn color(&self) -> Vec4 {
        match self {
            DebugShape::WireBox { color, .. }
            | DebugShape::WireSphere { color, .. }
            | DebugShape::Plane { color, .. } => *color,
        }
    }
}

/// Debug drawing system collecting one frame of debug shapes
///
/// GEA 10.2: debug shapes are queued during the update and drained by the
/// renderer. Call [`DebugDrawSystem::clear`] once per frame after drawing.
pub struct DebugDrawSystem {
    shapes: Vec<DebugShape>,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            shapes: Vec::new(),
            enabled: true,
        }
    }

    fn push(&mut self, shape: DebugShape) {
        if !self.enabled {
            return;
        }

        self.shapes.push(shape);
    }

    /// Get all shapes queued this frame
    pub fn shapes(&self) -> &[DebugShape] {
        &self.shapes
    }

    /// Get the number of queued shapes
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Remove and return every queued shape
    pub fn drain(&mut self) -> Vec<DebugShape> {
        std::mem::take(&mut self.shapes)
    }

    /// Clear all shapes
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for DebugDrawSystem {
    fn add_wire_box(&mut self, transform: Mat4, color: Vec4) {
        self.push(DebugShape::WireBox { transform, color });
    }

    fn add_wire_sphere(&mut self, transform: Mat4, color: Vec4) {
        self.push(DebugShape::WireSphere { transform, color });
    }

    fn add_plane(&mut self, transform: Mat4, color: Vec4) {
        self.push(DebugShape::Plane { transform, color });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shapes_are_queued_in_order() {
        let mut system = DebugDrawSystem::new();
        let red = Vec4::new(1.0, 0.0, 0.0, 1.0);

        system.add_wire_box(Mat4::identity(), red);
        system.add_plane(Mat4::new_scaling(2.0), red);
        system.add_wire_sphere(Mat4::identity(), red);

        assert_eq!(system.shape_count(), 3);
        assert!(matches!(system.shapes()[0], DebugShape::WireBox { .. }));
        assert!(matches!(system.shapes()[1], DebugShape::Plane { .. }));
        assert!(matches!(system.shapes()[2], DebugShape::WireSphere { .. }));
        assert_eq!(*system.shapes()[1].transform(), Mat4::new_scaling(2.0));
    }

    #[test]
    fn test_disabled_system_ignores_shapes() {
        let mut system = DebugDrawSystem::new();
        system.enabled = false;

        system.add_wire_box(Mat4::identity(), Vec4::new(1.0, 1.0, 1.0, 1.0));

        assert_eq!(system.shape_count(), 0);
    }

    #[test]
    fn test_drain_empties_frame() {
        let mut system = DebugDrawSystem::new();
        system.add_wire_sphere(Mat4::identity(), Vec4::new(0.0, 0.0, 1.0, 1.0));

        let frame = system.drain();

        assert_eq!(frame.len(), 1);
        assert_eq!(system.shape_count(), 0);
    }
}
