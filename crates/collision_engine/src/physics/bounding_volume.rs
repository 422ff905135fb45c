//! Oriented bounding box with derived world-space bounds
//!
//! Geometry is stored in model space (GEA 13.3.4). The world transform only
//! rotates and translates it; the world axis-aligned box ("ARBB") around the
//! eight transformed corners is recomputed whenever the transform changes.

use std::collections::HashSet;

use crate::debug::{CollisionDebugColors, RenderSink};
use crate::foundation::collections::VolumeHandle;
use crate::foundation::math::{Mat4, Mat4Ext, Point3, Vec3, Vec4};
use crate::physics::BoundingSphere;

bitflags::bitflags! {
    /// Debug primitives a volume submits from [`BoundingVolume::add_to_render_list`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct VolumeVisibility: u8 {
        /// Enclosing bounding sphere
        const SPHERE = 1 << 0;
        /// Oriented bounding box
        const OBB = 1 << 1;
        /// World axis-aligned box around the oriented box
        const ARBB = 1 << 2;
    }
}

impl Default for VolumeVisibility {
    fn default() -> Self {
        Self::OBB
    }
}

/// Oriented bounding box of one object plus its current contacts
///
/// `colliding` holds handles of the volumes this one currently overlaps. The
/// relation is kept symmetric by [`crate::physics::CollisionWorld`], which
/// owns every volume; the handles never keep a partner alive.
#[derive(Debug, Clone)]
pub struct BoundingVolume {
    visibility: VolumeVisibility,
    colors: CollisionDebugColors,

    radius: f32,
    center: Vec3,
    min_local: Vec3,
    max_local: Vec3,
    half_width: Vec3,

    min_global: Vec3,
    max_global: Vec3,
    arbb_size: Vec3,

    to_world: Mat4,

    colliding: HashSet<VolumeHandle>,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self {
            visibility: VolumeVisibility::default(),
            colors: CollisionDebugColors::default(),
            radius: 0.0,
            center: Vec3::zeros(),
            min_local: Vec3::zeros(),
            max_local: Vec3::zeros(),
            half_width: Vec3::zeros(),
            min_global: Vec3::zeros(),
            max_global: Vec3::zeros(),
            arbb_size: Vec3::zeros(),
            to_world: Mat4::identity(),
            colliding: HashSet::new(),
        }
    }
}

impl BoundingVolume {
    /// Fit a volume around model-space points
    ///
    /// An empty slice yields a degenerate volume at the origin.
    pub fn new(points: &[Vec3]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };

        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), point| (min.inf(point), max.sup(point)));

        Self::from_min_max(min, max)
    }

    /// Build a volume from two opposite model-space corners
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        let min_local = min.inf(&max);
        let max_local = min.sup(&max);
        let center = (max_local + min_local) / 2.0;

        Self {
            radius: (center - min_local).norm(),
            center,
            min_local,
            max_local,
            half_width: (max_local - min_local) / 2.0,
            // Identity transform: global bounds equal local ones
            min_global: min_local,
            max_global: max_local,
            arbb_size: max_local - min_local,
            ..Self::default()
        }
    }

    // --- Presentation -----------------------------------------------------

    /// Debug primitives submitted by [`Self::add_to_render_list`]
    pub fn visibility(&self) -> VolumeVisibility {
        self.visibility
    }

    /// Replace all visibility flags
    pub fn set_visibility(&mut self, visibility: VolumeVisibility) {
        self.visibility = visibility;
    }

    /// Toggle individual visibility flags
    pub fn set_visible(&mut self, flags: VolumeVisibility, visible: bool) {
        self.visibility.set(flags, visible);
    }

    /// Debug colors
    pub fn colors(&self) -> &CollisionDebugColors {
        &self.colors
    }

    /// Replace the debug colors
    pub fn set_colors(&mut self, colors: CollisionDebugColors) {
        self.colors = colors;
    }

    /// Oriented box color while colliding
    pub fn color_colliding(&self) -> Vec4 {
        self.colors.colliding
    }

    /// Set the oriented box color used while colliding
    pub fn set_color_colliding(&mut self, color: Vec4) {
        self.colors.colliding = color;
    }

    /// Oriented box color while not colliding
    pub fn color_not_colliding(&self) -> Vec4 {
        self.colors.not_colliding
    }

    /// Set the oriented box color used while not colliding
    pub fn set_color_not_colliding(&mut self, color: Vec4) {
        self.colors.not_colliding = color;
    }

    // --- Geometry ---------------------------------------------------------

    /// Radius of the sphere around the local center enclosing the box
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Box center in model space
    pub fn local_center(&self) -> Vec3 {
        self.center
    }

    /// Minimum model-space corner
    pub fn local_min(&self) -> Vec3 {
        self.min_local
    }

    /// Maximum model-space corner
    pub fn local_max(&self) -> Vec3 {
        self.max_local
    }

    /// Box center in world space
    pub fn world_center(&self) -> Vec3 {
        self.to_world.transform_point(&Point3::from(self.center)).coords
    }

    /// Minimum corner of the world axis-aligned box
    pub fn world_min(&self) -> Vec3 {
        self.min_global
    }

    /// Maximum corner of the world axis-aligned box
    pub fn world_max(&self) -> Vec3 {
        self.max_global
    }

    /// Per-axis half extents in model space
    pub fn half_width(&self) -> Vec3 {
        self.half_width
    }

    /// Size of the world axis-aligned box
    pub fn arbb_size(&self) -> Vec3 {
        self.arbb_size
    }

    /// Current model-to-world transform
    pub fn model_matrix(&self) -> &Mat4 {
        &self.to_world
    }

    /// World-space direction of local axis `index` (0 = X, 1 = Y, 2 = Z)
    pub fn world_axis(&self, index: usize) -> Vec3 {
        self.to_world.axis(index)
    }

    /// World bounding sphere; valid because the transform carries no scale
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::new(self.world_center(), self.radius)
    }

    /// The eight model-space corners, back face (min z) first
    pub fn local_corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min_local, self.max_local);
        [
            min,
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            max,
        ]
    }

    /// The eight corners placed in world space
    pub fn world_corners(&self) -> [Vec3; 8] {
        self.local_corners()
            .map(|corner| self.to_world.transform_point(&Point3::from(corner)).coords)
    }

    /// Set the model-to-world transform and refresh the world bounds
    ///
    /// `model_matrix` must be rigid (rotation and translation only). Setting
    /// the current matrix again skips the recomputation.
    pub fn set_model_matrix(&mut self, model_matrix: Mat4) {
        if model_matrix == self.to_world {
            return;
        }

        self.to_world = model_matrix;

        let corners = self.world_corners();
        let (min, max) = corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(min, max), corner| (min.inf(corner), max.sup(corner)));

        self.min_global = min;
        self.max_global = max;
        self.arbb_size = max - min;
    }

    // --- Contacts ---------------------------------------------------------

    /// Record `other` as colliding; returns `false` if it already was
    pub fn add_collision_with(&mut self, other: VolumeHandle) -> bool {
        self.colliding.insert(other)
    }

    /// Forget `other`; returns `false` if it was not colliding
    pub fn remove_collision_with(&mut self, other: VolumeHandle) -> bool {
        self.colliding.remove(&other)
    }

    /// Forget every contact of this volume
    ///
    /// Partners still list this volume; use
    /// [`crate::physics::CollisionWorld::remove`] to unlink both sides.
    pub fn clear_colliding_list(&mut self) {
        self.colliding.clear();
    }

    /// Whether `other` is currently recorded as colliding
    pub fn is_colliding_with(&self, other: VolumeHandle) -> bool {
        self.colliding.contains(&other)
    }

    /// Whether this volume collides with anything
    pub fn is_colliding(&self) -> bool {
        !self.colliding.is_empty()
    }

    /// Number of recorded contacts
    pub fn colliding_count(&self) -> usize {
        self.colliding.len()
    }

    /// Handles of every recorded contact, in no particular order
    pub fn colliding_with(&self) -> impl Iterator<Item = VolumeHandle> + '_ {
        self.colliding.iter().copied()
    }

    // --- Rendering --------------------------------------------------------

    /// Submit this volume's visible debug primitives
    pub fn add_to_render_list(&self, sink: &mut dyn RenderSink) {
        let local_center = self.to_world * Mat4::new_translation(&self.center);

        if self.visibility.contains(VolumeVisibility::SPHERE) {
            sink.add_wire_sphere(local_center * Mat4::new_scaling(self.radius), self.colors.sphere);
        }

        if self.visibility.contains(VolumeVisibility::OBB) {
            let color = if self.is_colliding() {
                self.colors.colliding
            } else {
                self.colors.not_colliding
            };
            sink.add_wire_box(
                local_center * Mat4::new_nonuniform_scaling(&(self.half_width * 2.0)),
                color,
            );
        }

        if self.visibility.contains(VolumeVisibility::ARBB) {
            sink.add_wire_box(
                Mat4::new_translation(&self.world_center()) * Mat4::new_nonuniform_scaling(&self.arbb_size),
                self.colors.arbb,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::{palette, DebugDrawSystem, DebugShape};
    use crate::foundation::collections::HandleMap;
    use crate::foundation::math::constants::QUARTER_PI;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn cube_corners(min: Vec3, max: Vec3) -> Vec<Vec3> {
        BoundingVolume::from_min_max(min, max).local_corners().to_vec()
    }

    fn handles(count: usize) -> Vec<VolumeHandle> {
        let mut map = HandleMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    #[test]
    fn test_construction_from_corners() {
        let min = Vec3::new(-1.0, 0.0, 2.0);
        let max = Vec3::new(3.0, 4.0, 5.0);
        let volume = BoundingVolume::new(&cube_corners(min, max));

        assert_eq!(volume.local_min(), min);
        assert_eq!(volume.local_max(), max);
        assert_relative_eq!(volume.half_width(), (max - min) / 2.0, epsilon = EPSILON);
        assert_relative_eq!(volume.local_center(), (max + min) / 2.0, epsilon = EPSILON);
        assert_relative_eq!(volume.radius(), (volume.local_center() - min).norm(), epsilon = EPSILON);
        assert_eq!(volume.world_min(), min);
        assert_eq!(volume.world_max(), max);
    }

    #[test]
    fn test_construction_from_scattered_points() {
        let points = [
            Vec3::new(0.5, -2.0, 0.0),
            Vec3::new(-1.0, 1.0, 3.0),
            Vec3::new(2.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let volume = BoundingVolume::new(&points);

        assert_eq!(volume.local_min(), Vec3::new(-1.0, -2.0, -1.0));
        assert_eq!(volume.local_max(), Vec3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_empty_point_list() {
        let volume = BoundingVolume::new(&[]);

        assert_eq!(volume.half_width(), Vec3::zeros());
        assert_eq!(volume.radius(), 0.0);
        assert_eq!(*volume.model_matrix(), Mat4::identity());
    }

    #[test]
    fn test_translation_moves_world_bounds() {
        let mut volume = BoundingVolume::from_min_max(Vec3::repeat(-0.5), Vec3::repeat(0.5));
        volume.set_model_matrix(Mat4::new_translation(&Vec3::new(2.0, -1.0, 0.0)));

        assert_relative_eq!(volume.world_min(), Vec3::new(1.5, -1.5, -0.5), epsilon = EPSILON);
        assert_relative_eq!(volume.world_max(), Vec3::new(2.5, -0.5, 0.5), epsilon = EPSILON);
        assert_relative_eq!(volume.world_center(), Vec3::new(2.0, -1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(volume.arbb_size(), Vec3::repeat(1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_grows_world_bounds() {
        let mut volume = BoundingVolume::from_min_max(Vec3::repeat(-0.5), Vec3::repeat(0.5));
        volume.set_model_matrix(Mat4::rotation_z(QUARTER_PI));

        let reach = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(volume.world_max(), Vec3::new(reach, reach, 0.5), epsilon = EPSILON);
        assert_relative_eq!(volume.world_min(), Vec3::new(-reach, -reach, -0.5), epsilon = EPSILON);
        assert_relative_eq!(volume.arbb_size(), Vec3::new(2.0 * reach, 2.0 * reach, 1.0), epsilon = EPSILON);
        // Half-widths live in model space and do not change
        assert_eq!(volume.half_width(), Vec3::repeat(0.5));
    }

    #[test]
    fn test_world_center_of_offset_box() {
        let mut volume = BoundingVolume::from_min_max(Vec3::new(1.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 2.0));
        volume.set_model_matrix(Mat4::new_translation(&Vec3::new(0.0, 0.0, 10.0)) * Mat4::rotation_z(std::f32::consts::FRAC_PI_2));

        // Local center (2, 1, 1) rotated a quarter turn about Z, then lifted
        assert_relative_eq!(volume.world_center(), Vec3::new(-1.0, 2.0, 11.0), epsilon = 1e-5);
    }

    #[test]
    fn test_collision_set_is_idempotent() {
        let ids = handles(2);
        let mut volume = BoundingVolume::default();

        assert!(volume.add_collision_with(ids[0]));
        assert!(!volume.add_collision_with(ids[0]));
        assert_eq!(volume.colliding_count(), 1);
        assert!(volume.is_colliding_with(ids[0]));
        assert!(!volume.is_colliding_with(ids[1]));

        assert!(!volume.remove_collision_with(ids[1]));
        assert!(volume.remove_collision_with(ids[0]));
        assert!(!volume.remove_collision_with(ids[0]));
        assert!(!volume.is_colliding());
    }

    #[test]
    fn test_clear_colliding_list() {
        let ids = handles(3);
        let mut volume = BoundingVolume::default();
        for id in &ids {
            volume.add_collision_with(*id);
        }

        volume.clear_colliding_list();

        assert_eq!(volume.colliding_with().count(), 0);
    }

    #[test]
    fn test_render_list_uses_contact_color() {
        let ids = handles(1);
        let mut volume = BoundingVolume::from_min_max(Vec3::repeat(-1.0), Vec3::repeat(1.0));
        let mut sink = DebugDrawSystem::new();

        volume.add_to_render_list(&mut sink);
        volume.add_collision_with(ids[0]);
        volume.add_to_render_list(&mut sink);

        let shapes = sink.shapes();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].color(), palette::WHITE);
        assert_eq!(shapes[1].color(), palette::RED);
        assert_relative_eq!(*shapes[0].transform(), Mat4::new_scaling(2.0), epsilon = EPSILON);
    }

    #[test]
    fn test_render_list_honors_every_flag() {
        let mut volume = BoundingVolume::from_min_max(Vec3::repeat(-0.5), Vec3::repeat(0.5));
        volume.set_visibility(VolumeVisibility::all());
        volume.set_model_matrix(Mat4::new_translation(&Vec3::new(0.0, 3.0, 0.0)));
        let mut sink = DebugDrawSystem::new();

        volume.add_to_render_list(&mut sink);

        let shapes = sink.shapes();
        assert_eq!(shapes.len(), 3);
        assert!(matches!(shapes[0], DebugShape::WireSphere { .. }));
        assert_eq!(shapes[0].color(), palette::CORNFLOWER_BLUE);
        assert!(matches!(shapes[2], DebugShape::WireBox { .. }));
        assert_eq!(shapes[2].color(), palette::YELLOW);

        volume.set_visible(VolumeVisibility::SPHERE | VolumeVisibility::ARBB, false);
        sink.clear();
        volume.add_to_render_list(&mut sink);
        assert_eq!(sink.shape_count(), 1);
    }
}
