//! Visualization of the plane that separates two boxes
//!
//! Each [`SeparatingAxis`] maps to one entry of a lookup table holding the
//! function that derives the axis direction from the two volumes and the
//! color used to draw it.

use crate::debug::{palette, RenderSink};
use crate::foundation::math::{constants::PI, Mat4, Mat4Ext, Unit, Vec3, Vec4};
use crate::physics::{BoundingVolume, SeparatingAxis};

/// Shortest normal accepted before a cross-product axis counts as degenerate
pub const DEGENERATE_NORMAL_EPSILON: f32 = 1e-6;

type NormalFn = fn(&BoundingVolume, &BoundingVolume) -> Vec3;

struct AxisVisual {
    normal: NormalFn,
    color: Vec4,
}

fn a_axis<const I: usize>(a: &BoundingVolume, _b: &BoundingVolume) -> Vec3 {
    a.world_axis(I)
}

fn b_axis<const J: usize>(_a: &BoundingVolume, b: &BoundingVolume) -> Vec3 {
    b.world_axis(J)
}

fn cross_axis<const I: usize, const J: usize>(a: &BoundingVolume, b: &BoundingVolume) -> Vec3 {
    a.world_axis(I).cross(&b.world_axis(J))
}

/// Indexed by [`SeparatingAxis::index`]
const AXIS_VISUALS: [AxisVisual; 15] = [
    AxisVisual { normal: a_axis::<0>, color: palette::RED },
    AxisVisual { normal: a_axis::<1>, color: palette::GREEN },
    AxisVisual { normal: a_axis::<2>, color: palette::BLUE },
    AxisVisual { normal: b_axis::<0>, color: palette::RED },
    AxisVisual { normal: b_axis::<1>, color: palette::GREEN },
    AxisVisual { normal: b_axis::<2>, color: palette::BLUE },
    AxisVisual { normal: cross_axis::<0, 0>, color: palette::BLACK },
    AxisVisual { normal: cross_axis::<0, 1>, color: palette::BROWN },
    AxisVisual { normal: cross_axis::<0, 2>, color: palette::CYAN },
    AxisVisual { normal: cross_axis::<1, 0>, color: palette::MAGENTA },
    AxisVisual { normal: cross_axis::<1, 1>, color: palette::ORANGE },
    AxisVisual { normal: cross_axis::<1, 2>, color: palette::PURPLE },
    AxisVisual { normal: cross_axis::<2, 0>, color: palette::GRAY },
    AxisVisual { normal: cross_axis::<2, 1>, color: palette::VIOLET },
    AxisVisual { normal: cross_axis::<2, 2>, color: palette::WHITE },
];

impl SeparatingAxis {
    /// World direction of this axis for the pair `(a, b)`, not normalized
    ///
    /// Edge-edge axes are zero when the two source axes are parallel.
    pub fn direction(self, a: &BoundingVolume, b: &BoundingVolume) -> Vec3 {
        (AXIS_VISUALS[self.index()].normal)(a, b)
    }

    /// Debug color of this axis
    pub fn color(self) -> Vec4 {
        AXIS_VISUALS[self.index()].color
    }
}

/// Plane through the midpoint of two separated boxes, normal to the axis
/// that separates them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatingPlane {
    /// The axis the SAT reported
    pub axis: SeparatingAxis,
    /// Midpoint of the two world centers
    pub center: Vec3,
    /// Unit normal along `axis`
    pub normal: Vec3,
    /// Debug color of `axis`
    pub color: Vec4,
}

impl SeparatingPlane {
    /// Build the plane for a pair separated along `axis`
    ///
    /// Returns `None` when the axis direction is degenerate.
    pub fn between(a: &BoundingVolume, b: &BoundingVolume, axis: SeparatingAxis) -> Option<Self> {
        let normal = Unit::try_new(axis.direction(a, b), DEGENERATE_NORMAL_EPSILON)?;

        Some(Self {
            axis,
            center: (a.world_center() + b.world_center()) / 2.0,
            normal: normal.into_inner(),
            color: axis.color(),
        })
    }

    /// Transform placing a unit quad (facing +Z) on the plane
    pub fn transform(&self, scale: f32) -> Mat4 {
        Mat4::new_translation(&self.center)
            * Mat4::rotation_between(&Vec3::z(), &self.normal)
            * Mat4::new_scaling(scale)
    }

    /// Same quad turned around so its back side is drawn too
    pub fn back_transform(&self, scale: f32) -> Mat4 {
        self.transform(scale) * Mat4::rotation_y(PI)
    }

    /// Transform of the marker sphere at the plane center
    pub fn marker_transform(&self, scale: f32) -> Mat4 {
        Mat4::new_translation(&self.center) * Mat4::new_scaling(scale)
    }

    /// Marker color, the complement of the plane color
    pub fn marker_color(&self) -> Vec4 {
        palette::inverted(self.color)
    }

    /// Submit both plane faces and the center marker
    pub fn submit(&self, sink: &mut dyn RenderSink, plane_scale: f32, marker_scale: f32) {
        sink.add_plane(self.transform(plane_scale), self.color);
        sink.add_plane(self.back_transform(plane_scale), self.color);
        sink.add_wire_sphere(self.marker_transform(marker_scale), self.marker_color());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::{DebugDrawSystem, DebugShape};
    use crate::foundation::math::constants::QUARTER_PI;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_box(model_matrix: Mat4) -> BoundingVolume {
        let mut volume = BoundingVolume::from_min_max(Vec3::repeat(-0.5), Vec3::repeat(0.5));
        volume.set_model_matrix(model_matrix);
        volume
    }

    fn rotated_pair() -> (BoundingVolume, BoundingVolume) {
        (
            unit_box(Mat4::rotation_z(QUARTER_PI)),
            unit_box(Mat4::new_translation(&Vec3::new(1.6, 0.0, 0.0)) * Mat4::rotation_y(QUARTER_PI)),
        )
    }

    #[test]
    fn test_face_axes_read_model_columns() {
        let (a, b) = rotated_pair();

        for i in 0..3 {
            assert_relative_eq!(SeparatingAxis::ALL[i].direction(&a, &b), a.world_axis(i), epsilon = EPSILON);
            assert_relative_eq!(SeparatingAxis::ALL[3 + i].direction(&a, &b), b.world_axis(i), epsilon = EPSILON);
        }
    }

    #[test]
    fn test_edge_axes_are_cross_products() {
        let (a, b) = rotated_pair();

        for i in 0..3 {
            for j in 0..3 {
                let expected = a.world_axis(i).cross(&b.world_axis(j));
                assert_relative_eq!(SeparatingAxis::edge(i, j).direction(&a, &b), expected, epsilon = EPSILON);
            }
        }
    }

    #[test]
    fn test_axis_colors() {
        assert_eq!(SeparatingAxis::AX.color(), palette::RED);
        assert_eq!(SeparatingAxis::BY.color(), palette::GREEN);
        assert_eq!(SeparatingAxis::BZ.color(), palette::BLUE);
        assert_eq!(SeparatingAxis::AXxBX.color(), palette::BLACK);
        assert_eq!(SeparatingAxis::AYxBZ.color(), palette::PURPLE);
        assert_eq!(SeparatingAxis::AZxBZ.color(), palette::WHITE);
    }

    #[test]
    fn test_plane_normal_is_normalized() {
        let (a, b) = rotated_pair();
        let plane = SeparatingPlane::between(&a, &b, SeparatingAxis::AZxBY).expect("non-degenerate axis");

        assert_relative_eq!(plane.normal.norm(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(plane.normal.cross(&Vec3::x()).norm(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(plane.center, Vec3::new(0.8, 0.0, 0.0), epsilon = EPSILON);
        assert_eq!(plane.color, palette::VIOLET);
    }

    #[test]
    fn test_parallel_edge_axis_is_degenerate() {
        let a = unit_box(Mat4::identity());
        let b = unit_box(Mat4::new_translation(&Vec3::new(3.0, 0.0, 0.0)));

        assert!(SeparatingPlane::between(&a, &b, SeparatingAxis::AXxBX).is_none());
        assert!(SeparatingPlane::between(&a, &b, SeparatingAxis::AX).is_some());
    }

    #[test]
    fn test_plane_transform_faces_normal() {
        let a = unit_box(Mat4::identity());
        let b = unit_box(Mat4::new_translation(&Vec3::new(0.0, 4.0, 0.0)));
        let plane = SeparatingPlane::between(&a, &b, SeparatingAxis::AY).expect("face axis");

        let front = plane.transform(5.0);
        let back = plane.back_transform(5.0);

        assert_relative_eq!(front.transform_vector(&Vec3::z()), Vec3::new(0.0, 5.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(back.transform_vector(&Vec3::z()), Vec3::new(0.0, -5.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(front.translation_part(), Vec3::new(0.0, 2.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_submit_emits_planes_and_marker() {
        let a = unit_box(Mat4::identity());
        let b = unit_box(Mat4::new_translation(&Vec3::new(0.0, 0.0, 3.0)));
        let plane = SeparatingPlane::between(&a, &b, SeparatingAxis::AZ).expect("face axis");
        let mut sink = DebugDrawSystem::new();

        plane.submit(&mut sink, 5.0, 0.1);

        let shapes = sink.shapes();
        assert_eq!(shapes.len(), 3);
        assert!(matches!(shapes[0], DebugShape::Plane { .. }));
        assert!(matches!(shapes[1], DebugShape::Plane { .. }));
        assert!(matches!(shapes[2], DebugShape::WireSphere { .. }));
        assert_eq!(shapes[0].color(), palette::BLUE);
        assert_eq!(shapes[2].color(), palette::YELLOW);
        assert_relative_eq!(*shapes[2].transform(), plane.marker_transform(0.1), epsilon = EPSILON);
    }
}
