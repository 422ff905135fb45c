//! Collision-specific debug colors
//!
//! Based on Game Engine Architecture 3rd Edition, Section 10.2:
//! "Debug drawing for collision detection typically includes visualizations
//! of bounding volumes, collision shapes, and query results."

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec4;

/// Named opaque RGBA colors
pub mod palette {
    use crate::foundation::math::Vec4;

    /// Builds an opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Vec4 {
        Vec4::new(r, g, b, 1.0)
    }

    /// White
    pub const WHITE: Vec4 = rgb(1.0, 1.0, 1.0);
    /// Black
    pub const BLACK: Vec4 = rgb(0.0, 0.0, 0.0);
    /// Red
    pub const RED: Vec4 = rgb(1.0, 0.0, 0.0);
    /// Green
    pub const GREEN: Vec4 = rgb(0.0, 1.0, 0.0);
    /// Blue
    pub const BLUE: Vec4 = rgb(0.0, 0.0, 1.0);
    /// Yellow
    pub const YELLOW: Vec4 = rgb(1.0, 1.0, 0.0);
    /// Cyan
    pub const CYAN: Vec4 = rgb(0.0, 1.0, 1.0);
    /// Magenta
    pub const MAGENTA: Vec4 = rgb(1.0, 0.0, 1.0);
    /// Orange
    pub const ORANGE: Vec4 = rgb(1.0, 0.5, 0.0);
    /// Brown
    pub const BROWN: Vec4 = rgb(0.6, 0.3, 0.0);
    /// Purple
    pub const PURPLE: Vec4 = rgb(0.63, 0.13, 0.94);
    /// Violet
    pub const VIOLET: Vec4 = rgb(0.54, 0.17, 0.89);
    /// Gray
    pub const GRAY: Vec4 = rgb(0.5, 0.5, 0.5);
    /// Cornflower blue
    pub const CORNFLOWER_BLUE: Vec4 = rgb(0.39, 0.58, 0.93);

    /// RGB complement of `color`, alpha kept opaque
    pub fn inverted(color: Vec4) -> Vec4 {
        rgb(1.0 - color.x, 1.0 - color.y, 1.0 - color.z)
    }
}

/// Color scheme for bounding volume visualization
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionDebugColors {
    /// Oriented box color while the volume collides with anything
    pub colliding: Vec4,

    /// Oriented box color while the volume collides with nothing
    pub not_colliding: Vec4,

    /// Bounding sphere color
    pub sphere: Vec4,

    /// World axis-aligned box color
    pub arbb: Vec4,
}

impl Default for CollisionDebugColors {
    fn default() -> Self {
        Self {
            colliding: palette::RED,
            not_colliding: palette::WHITE,
            sphere: palette::CORNFLOWER_BLUE,
            arbb: palette::YELLOW,
        }
    }
}
