//! Owner of every bounding volume and keeper of the contact relation
//!
//! Volumes live in a slot map and refer to each other by [`VolumeHandle`].
//! A handle whose volume was removed is reported as
//! [`CollisionError::StaleHandle`] rather than dereferenced.

use log::{debug, trace, warn};

use crate::config::CollisionConfig;
use crate::debug::RenderSink;
use crate::foundation::collections::{HandleMap, VolumeHandle};
use crate::foundation::math::{Mat4, Vec3};
use crate::physics::{separating_axis, BoundingVolume, SeparatingAxis, SeparatingPlane};

/// Collision world errors
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionError {
    /// The handle refers to a volume that was removed or never existed
    #[error("bounding volume {0:?} does not exist")]
    StaleHandle(VolumeHandle),
}

/// Result of testing one pair of volumes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairOutcome {
    /// No separating axis exists
    Colliding,

    /// The SAT found a separating axis
    Separated {
        /// First separating axis in test order
        axis: SeparatingAxis,
        /// Plane for visualization; `None` when the axis is degenerate
        plane: Option<SeparatingPlane>,
    },

    /// Rejected early because the bounding spheres are disjoint
    Distant,
}

impl PairOutcome {
    /// Whether the pair overlaps
    pub fn is_colliding(&self) -> bool {
        matches!(self, PairOutcome::Colliding)
    }

    /// The separating axis, if the SAT produced one
    pub fn separating_axis(&self) -> Option<SeparatingAxis> {
        match self {
            PairOutcome::Separated { axis, .. } => Some(*axis),
            _ => None,
        }
    }
}

/// Handle-based store of bounding volumes
///
/// The world never discovers pairs on its own. Call
/// [`CollisionWorld::test_and_update`] for every pair that should be tracked,
/// after updating the model matrices for the step.
pub struct CollisionWorld {
    volumes: HandleMap<BoundingVolume>,
    config: CollisionConfig,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new(config: CollisionConfig) -> Self {
        Self {
            volumes: HandleMap::with_key(),
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Replace the configuration; existing volumes keep their presentation
    pub fn set_config(&mut self, config: CollisionConfig) {
        self.config = config;
    }

    /// Take ownership of a volume
    ///
    /// The volume starts with no contacts; any it carried are dropped.
    pub fn insert(&mut self, mut volume: BoundingVolume) -> VolumeHandle {
        volume.clear_colliding_list();
        self.volumes.insert(volume)
    }

    /// Fit a volume around model-space points, styled from the config
    pub fn insert_points(&mut self, points: &[Vec3]) -> VolumeHandle {
        let mut volume = BoundingVolume::new(points);
        volume.set_visibility(self.config.visibility.to_flags());
        volume.set_colors(self.config.colors.clone());
        self.insert(volume)
    }

    /// Remove a volume and unlink it from every partner's contact set
    pub fn remove(&mut self, handle: VolumeHandle) -> Option<BoundingVolume> {
        let mut volume = self.volumes.remove(handle)?;
        debug!("Removing volume {:?} with {} contacts", handle, volume.colliding_count());

        for partner in volume.colliding_with() {
            if let Some(other) = self.volumes.get_mut(partner) {
                other.remove_collision_with(handle);
            }
        }
        volume.clear_colliding_list();

        Some(volume)
    }

    /// Look up a volume
    pub fn get(&self, handle: VolumeHandle) -> Option<&BoundingVolume> {
        self.volumes.get(handle)
    }

    /// Look up a volume mutably
    ///
    /// Contact sets edited through this reference are not mirrored on the
    /// partner; prefer [`Self::test_and_update`].
    pub fn get_mut(&mut self, handle: VolumeHandle) -> Option<&mut BoundingVolume> {
        self.volumes.get_mut(handle)
    }

    /// Whether the handle refers to a live volume
    pub fn contains(&self, handle: VolumeHandle) -> bool {
        self.volumes.contains_key(handle)
    }

    /// Number of live volumes
    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    /// Whether the world holds no volumes
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Iterate over every live volume
    pub fn iter(&self) -> impl Iterator<Item = (VolumeHandle, &BoundingVolume)> {
        self.volumes.iter()
    }

    /// Handles of every live volume
    pub fn handles(&self) -> impl Iterator<Item = VolumeHandle> + '_ {
        self.volumes.keys()
    }

    fn volume(&self, handle: VolumeHandle) -> Result<&BoundingVolume, CollisionError> {
        self.volumes.get(handle).ok_or(CollisionError::StaleHandle(handle))
    }

    /// Set a volume's model-to-world transform
    pub fn set_model_matrix(&mut self, handle: VolumeHandle, model_matrix: Mat4) -> Result<(), CollisionError> {
        self.volumes
            .get_mut(handle)
            .ok_or(CollisionError::StaleHandle(handle))?
            .set_model_matrix(model_matrix);
        Ok(())
    }

    /// Run the SAT on two live volumes without touching their contacts
    pub fn separating_axis(&self, a: VolumeHandle, b: VolumeHandle) -> Result<Option<SeparatingAxis>, CollisionError> {
        Ok(separating_axis(self.volume(a)?, self.volume(b)?))
    }

    /// Classify a pair without touching their contacts
    pub fn check_pair(&self, a: VolumeHandle, b: VolumeHandle) -> Result<PairOutcome, CollisionError> {
        let volume_a = self.volume(a)?;
        let volume_b = self.volume(b)?;

        if a == b {
            return Ok(PairOutcome::Colliding);
        }

        if self.config.sphere_pretest && !volume_a.bounding_sphere().intersects(&volume_b.bounding_sphere()) {
            return Ok(PairOutcome::Distant);
        }

        Ok(match separating_axis(volume_a, volume_b) {
            None => PairOutcome::Colliding,
            Some(axis) => PairOutcome::Separated {
                axis,
                plane: SeparatingPlane::between(volume_a, volume_b, axis),
            },
        })
    }

    /// Test a pair and record the result on both volumes
    ///
    /// Colliding pairs are added to each other's contact set, anything else
    /// is removed from it. Both operations are idempotent. A volume tested
    /// against itself collides but never lists itself as a contact.
    pub fn test_and_update(&mut self, a: VolumeHandle, b: VolumeHandle) -> Result<PairOutcome, CollisionError> {
        let outcome = self.check_pair(a, b)?;
        trace!("Pair {:?}/{:?}: {:?}", a, b, outcome);

        if a != b {
            if outcome.is_colliding() {
                self.link(a, b);
            } else {
                self.unlink(a, b);
            }
        }

        Ok(outcome)
    }

    /// [`Self::test_and_update`], then draw the separating plane if any
    pub fn test_and_update_visualized(
        &mut self,
        a: VolumeHandle,
        b: VolumeHandle,
        sink: &mut dyn RenderSink,
    ) -> Result<PairOutcome, CollisionError> {
        let outcome = self.test_and_update(a, b)?;

        if self.config.draw_separating_planes {
            if let PairOutcome::Separated { axis, plane } = outcome {
                match plane {
                    Some(plane) => plane.submit(sink, self.config.plane_scale, self.config.marker_scale),
                    None => warn!("Separating axis {} between {:?} and {:?} is degenerate, skipping plane", axis, a, b),
                }
            }
        }

        Ok(outcome)
    }

    /// Submit the debug primitives of every volume
    pub fn add_to_render_list(&self, sink: &mut dyn RenderSink) {
        for volume in self.volumes.values() {
            volume.add_to_render_list(sink);
        }
    }

    fn link(&mut self, a: VolumeHandle, b: VolumeHandle) {
        let began = self.volumes.get_mut(a).is_some_and(|volume| volume.add_collision_with(b));
        if let Some(volume) = self.volumes.get_mut(b) {
            volume.add_collision_with(a);
        }

        if began {
            debug!("Contact began: {:?} <-> {:?}", a, b);
        }
    }

    fn unlink(&mut self, a: VolumeHandle, b: VolumeHandle) {
        let ended = self.volumes.get_mut(a).is_some_and(|volume| volume.remove_collision_with(b));
        if let Some(volume) = self.volumes.get_mut(b) {
            volume.remove_collision_with(a);
        }

        if ended {
            debug!("Contact ended: {:?} <-> {:?}", a, b);
        }
    }
}

impl Default for CollisionWorld {
    fn default() -> Self {
        Self::new(CollisionConfig::default())
    }
}
