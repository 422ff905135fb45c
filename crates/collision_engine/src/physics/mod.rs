//! Physics module for oriented bounding box collision detection
//!
//! Provides exact narrow-phase overlap tests between oriented boxes using the
//! separating axis theorem, and keeps a symmetric "currently colliding with"
//! relation between the boxes a caller tests.
//!
//! # Module Organization
//!
//! - [`bounding_volume`] - Model-space box, world transform and contact set
//! - [`bounding_sphere`] - Enclosing sphere used as an optional pre-test
//! - [`sat`] - The 15-axis separating axis test
//! - [`separating_plane`] - Axis-to-plane mapping for debug visualization
//! - [`collision_world`] - Handle-based owner of every volume
//!
//! There is no broad phase: callers decide which pairs to test.

pub mod bounding_sphere;
pub mod bounding_volume;
pub mod collision_world;
pub mod sat;
pub mod separating_plane;

#[cfg(test)]
mod tests;

pub use bounding_sphere::BoundingSphere;
pub use bounding_volume::{BoundingVolume, VolumeVisibility};
pub use collision_world::{CollisionError, CollisionWorld, PairOutcome};
pub use sat::{separating_axis, AxisKind, SeparatingAxis, SAT_EPSILON};
pub use separating_plane::SeparatingPlane;
