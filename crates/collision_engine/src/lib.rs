//! # Collision Engine
//!
//! Narrow-phase collision detection between oriented bounding boxes using the
//! separating axis theorem.
//!
//! ## Features
//!
//! - **Bounding Volumes**: Boxes fitted to model-space points, placed by a
//!   rigid world transform, with derived world axis-aligned bounds
//! - **Exact SAT**: All fifteen candidate axes, reporting which one separates
//! - **Contact Tracking**: Symmetric "colliding with" sets kept on both sides
//! - **Debug Drawing**: Boxes, spheres and separating planes submitted to an
//!   injected [`debug::RenderSink`]
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! let mut world = CollisionWorld::new(CollisionConfig::default());
//! let cube = BoundingVolume::from_min_max(Vec3::repeat(-0.5), Vec3::repeat(0.5));
//!
//! let a = world.insert(cube.clone());
//! let b = world.insert(cube);
//! world.set_model_matrix(b, Mat4::new_translation(&Vec3::new(0.75, 0.0, 0.0)))?;
//!
//! let mut frame = DebugDrawSystem::new();
//! let outcome = world.test_and_update_visualized(a, b, &mut frame)?;
//!
//! assert!(outcome.is_colliding());
//! assert!(world.get(a).unwrap().is_colliding_with(b));
//! # Ok::<(), CollisionError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod foundation;
pub mod physics;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError, VisibilityConfig},
        debug::{palette, DebugDrawSystem, DebugShape, RenderSink},
        foundation::{
            collections::VolumeHandle,
            math::{Mat4, Mat4Ext, Quat, Transform, Vec3, Vec4},
        },
        physics::{
            BoundingVolume, CollisionError, CollisionWorld, PairOutcome, SeparatingAxis, SeparatingPlane,
            VolumeVisibility,
        },
    };
}
