/// Stateless geometric predicates over AABB and Frustum.
///
/// Boundary semantics matter here: `contains` is strict so that a box
/// lying exactly on an octant boundary has a single owner (the parent),
/// while `overlap` counts touching faces as overlapping so that region
/// queries never miss a neighbour.

use glam::Mat4;
use super::aabb::AABB;
use super::frustum::{positive_vertex, Frustum};

/// Namespace for bounding-volume predicates.
pub struct BoundingVolume;

impl BoundingVolume {
    /// Strict containment: `subject` lies inside `container` without
    /// touching any of its faces.
    pub fn contains(container: &AABB, subject: &AABB) -> bool {
        subject.min.cmpgt(container.min).all() && subject.max.cmplt(container.max).all()
    }

    /// Separating-axis overlap test. Touching faces count as overlapping.
    pub fn overlap(a: &AABB, b: &AABB) -> bool {
        a.min.x <= b.max.x && a.max.x >= b.min.x
        && a.min.y <= b.max.y && a.max.y >= b.min.y
        && a.min.z <= b.max.z && a.max.z >= b.min.z
    }

    /// Conservative frustum visibility.
    ///
    /// For each plane, the AABB corner farthest along the plane normal is
    /// tested; if it lies behind any plane the box is fully outside.
    /// May report a box visible when only its corner region touches the
    /// frustum, never the reverse.
    pub fn frustum_visible(aabb: &AABB, frustum: &Frustum) -> bool {
        for plane in &frustum.planes {
            let normal = plane.truncate();
            if normal.dot(positive_vertex(aabb, normal)) + plane.w < 0.0 {
                return false;
            }
        }
        true
    }

    /// World-space AABB of a local-space AABB under an affine world matrix.
    ///
    /// Arvo / Akenine-Möller extent propagation: for each output axis,
    /// start from the translation and add the smaller (resp. larger) of
    /// `m[i][j] * min[j]` and `m[i][j] * max[j]` for every input axis.
    /// Nine multiply/min/max pairs instead of transforming eight corners,
    /// and tight for rotation + scale + translation.
    pub fn incremental_update(local: &AABB, world_matrix: &Mat4) -> AABB {
        let translation = world_matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for j in 0..3 {
            let axis = world_matrix.col(j).truncate();
            let a = axis * local.min[j];
            let b = axis * local.max[j];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }
}

#[cfg(test)]
#[path = "bounding_volume_tests.rs"]
mod tests;
