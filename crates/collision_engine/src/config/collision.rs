//! Collision world settings

use serde::{Deserialize, Serialize};

use super::Config;
use crate::debug::CollisionDebugColors;
use crate::physics::VolumeVisibility;

/// Which debug primitives newly inserted volumes submit by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Draw the enclosing bounding sphere
    pub sphere: bool,
    /// Draw the oriented box
    pub obb: bool,
    /// Draw the world axis-aligned box around the oriented box
    pub arbb: bool,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            sphere: false,
            obb: true,
            arbb: false,
        }
    }
}

impl VisibilityConfig {
    /// Convert to the flag set stored on each volume
    pub fn to_flags(self) -> VolumeVisibility {
        let mut flags = VolumeVisibility::empty();
        flags.set(VolumeVisibility::SPHERE, self.sphere);
        flags.set(VolumeVisibility::OBB, self.obb);
        flags.set(VolumeVisibility::ARBB, self.arbb);
        flags
    }
}

/// Settings for [`crate::physics::CollisionWorld`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Reject pairs whose bounding spheres are disjoint before running SAT
    pub sphere_pretest: bool,

    /// Submit the separating plane when a visualized pair is separated
    pub draw_separating_planes: bool,

    /// Uniform scale of the separating plane quad
    pub plane_scale: f32,

    /// Radius of the marker sphere drawn at the plane center
    pub marker_scale: f32,

    /// Default visibility for volumes inserted from points
    pub visibility: VisibilityConfig,

    /// Debug colors
    pub colors: CollisionDebugColors,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            sphere_pretest: false,
            draw_separating_planes: true,
            plane_scale: 5.0,
            marker_scale: 0.1,
            visibility: VisibilityConfig::default(),
            colors: CollisionDebugColors::default(),
        }
    }
}

impl Config for CollisionConfig {}
