//! Separating axis test for two oriented bounding boxes
//!
//! Follows the OBB-OBB test from Ericson, *Real-Time Collision Detection*,
//! section 4.4.1. Fifteen candidate axes are tried in a fixed order: the three
//! face normals of A, the three face normals of B, then the nine edge-edge
//! cross products `A[i] x B[j]` with `i` outer and `j` inner. The first axis
//! on which the projected boxes do not overlap is reported.
//!
//! Everything is computed in A's local frame:
//! - `r[(i, j)] = A[i] . B[j]` expresses B's axes in A's frame
//! - `t[i] = (center_b - center_a) . A[i]` is the center offset in A's frame
//!
//! For an edge-edge axis `A[i] x B[j]`, with `(u, v)` the indices following
//! `i` and `(p, q)` the indices following `j` cyclically:
//!
//! ```text
//! ra = a[u] * |r[v][j]| + a[v] * |r[u][j]|
//! rb = b[p] * |r[i][q]| + b[q] * |r[i][p]|
//! d  = t[v] * r[u][j] - t[u] * r[v][j]
//! ```
//!
//! A projection distance equal to the sum of the radii counts as touching,
//! so touching boxes collide.

use std::fmt;

use crate::foundation::math::{Mat3, Mat4Ext, Vec3};
use crate::physics::BoundingVolume;

/// Added to every `|r[(i, j)]|` so nearly parallel edges, whose cross product
/// is close to zero, cannot report a false separation through rounding.
pub const SAT_EPSILON: f32 = f32::EPSILON;

/// A candidate separating axis, in test order
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatingAxis {
    /// A's local X axis
    AX,
    /// A's local Y axis
    AY,
    /// A's local Z axis
    AZ,
    /// B's local X axis
    BX,
    /// B's local Y axis
    BY,
    /// B's local Z axis
    BZ,
    /// A.x cross B.x
    AXxBX,
    /// A.x cross B.y
    AXxBY,
    /// A.x cross B.z
    AXxBZ,
    /// A.y cross B.x
    AYxBX,
    /// A.y cross B.y
    AYxBY,
    /// A.y cross B.z
    AYxBZ,
    /// A.z cross B.x
    AZxBX,
    /// A.z cross B.y
    AZxBY,
    /// A.z cross B.z
    AZxBZ,
}

impl SeparatingAxis {
    /// Every axis in the order [`separating_axis`] tests them
    pub const ALL: [SeparatingAxis; 15] = [
        SeparatingAxis::AX,
        SeparatingAxis::AY,
        SeparatingAxis::AZ,
        SeparatingAxis::BX,
        SeparatingAxis::BY,
        SeparatingAxis::BZ,
        SeparatingAxis::AXxBX,
        SeparatingAxis::AXxBY,
        SeparatingAxis::AXxBZ,
        SeparatingAxis::AYxBX,
        SeparatingAxis::AYxBY,
        SeparatingAxis::AYxBZ,
        SeparatingAxis::AZxBX,
        SeparatingAxis::AZxBY,
        SeparatingAxis::AZxBZ,
    ];

    const A_FACES: [SeparatingAxis; 3] = [SeparatingAxis::AX, SeparatingAxis::AY, SeparatingAxis::AZ];
    const B_FACES: [SeparatingAxis; 3] = [SeparatingAxis::BX, SeparatingAxis::BY, SeparatingAxis::BZ];

    /// Position in [`SeparatingAxis::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Edge-edge axis built from A's axis `i` and B's axis `j`
    pub fn edge(i: usize, j: usize) -> SeparatingAxis {
        Self::ALL[6 + i * 3 + j]
    }

    /// The source axes of the candidate
    pub fn kind(self) -> AxisKind {
        match self.index() {
            i @ 0..=2 => AxisKind::FaceA(i),
            i @ 3..=5 => AxisKind::FaceB(i - 3),
            i => AxisKind::Edge((i - 6) / 3, (i - 6) % 3),
        }
    }

    /// Whether this is one of the nine cross-product axes
    pub fn is_edge_edge(self) -> bool {
        matches!(self.kind(), AxisKind::Edge(..))
    }
}

impl fmt::Display for SeparatingAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [&str; 3] = ["X", "Y", "Z"];
        match self.kind() {
            AxisKind::FaceA(i) => write!(f, "A.{}", NAMES[i]),
            AxisKind::FaceB(j) => write!(f, "B.{}", NAMES[j]),
            AxisKind::Edge(i, j) => write!(f, "A.{} x B.{}", NAMES[i], NAMES[j]),
        }
    }
}

/// Where a [`SeparatingAxis`] comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Face normal `i` of A
    FaceA(usize),
    /// Face normal `j` of B
    FaceB(usize),
    /// Cross product of A's axis `i` with B's axis `j`
    Edge(usize, usize),
}

/// Find an axis separating `a` from `b`
///
/// Returns `None` when no axis separates them, meaning the boxes overlap or
/// touch. Both volumes must carry rigid model matrices.
pub fn separating_axis(a: &BoundingVolume, b: &BoundingVolume) -> Option<SeparatingAxis> {
    let ha = a.half_width();
    let hb = b.half_width();

    let rot_a = a.model_matrix().rotation_part();
    let rot_b = b.model_matrix().rotation_part();

    // B's axes expressed in A's frame
    let r: Mat3 = rot_a.transpose() * rot_b;
    let abs_r = r.abs().add_scalar(SAT_EPSILON);

    // Center offset expressed in A's frame
    let t: Vec3 = rot_a.transpose() * (b.world_center() - a.world_center());

    for (i, axis) in SeparatingAxis::A_FACES.into_iter().enumerate() {
        let ra = ha[i];
        let rb = hb.dot(&abs_r.row(i).transpose());
        if t[i].abs() > ra + rb {
            return Some(axis);
        }
    }

    for (j, axis) in SeparatingAxis::B_FACES.into_iter().enumerate() {
        let ra = ha.dot(&abs_r.column(j));
        let rb = hb[j];
        if t.dot(&r.column(j)).abs() > ra + rb {
            return Some(axis);
        }
    }

    for i in 0..3 {
        let (u, v) = ((i + 1) % 3, (i + 2) % 3);
        for j in 0..3 {
            let (p, q) = ((j + 1) % 3, (j + 2) % 3);

            let ra = ha[u] * abs_r[(v, j)] + ha[v] * abs_r[(u, j)];
            let rb = hb[p] * abs_r[(i, q)] + hb[q] * abs_r[(i, p)];
            let d = t[v] * r[(u, j)] - t[u] * r[(v, j)];
            if d.abs() > ra + rb {
                return Some(SeparatingAxis::edge(i, j));
            }
        }
    }

    None
}
