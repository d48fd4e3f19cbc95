/// Axis-aligned bounding box.
///
/// The canonical empty box has `min = +inf` and `max = -inf`, so merging
/// it with any box yields that box unchanged. A populated box satisfies
/// `min <= max` on every axis.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
///
/// `#[repr(C)]` and `Pod` so debug-draw code can upload
/// `Octree::get_all_regions()` straight into a vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Canonical empty box (identity element of `merge`)
    pub const EMPTY: AABB = AABB {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a box from its two corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// The canonical empty box.
    pub fn empty() -> Self {
        Self::EMPTY
    }

    /// Create a box from a center and a half-extent.
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// Fold min/max over a point set.
    ///
    /// Returns the empty box for an empty input.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Vec3>,
    {
        points.into_iter().fold(Self::EMPTY, |acc, p| AABB {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn merge(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Transform both corners by the full matrix (with homogeneous divide)
    /// and re-derive min/max.
    ///
    /// Correct for any matrix, including projections, but only two points
    /// are transformed: a rotated box is NOT tightly bounded. Use
    /// `BoundingVolume::incremental_update` for affine world matrices.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let a = matrix.project_point3(self.min);
        let b = matrix.project_point3(self.max);
        AABB {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extent on each axis.
    pub fn dimensions(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full extent on each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere centered on `center()` that encloses the box.
    pub fn radius(&self) -> f32 {
        self.dimensions().length()
    }

    /// True if `min > max` on any axis (includes the canonical empty box).
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Populated and finite: the only boxes the octree accepts.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && !self.is_empty()
    }
}

impl Default for AABB {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
