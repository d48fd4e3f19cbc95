//! Bounding-volume geometry: AABB, frustum and the predicates between them.
//!
//! Passive value types. The scene/camera collaborators own frustums and
//! world matrices; this module only answers geometric questions.

mod aabb;
mod bounding_volume;
mod frustum;

pub use aabb::AABB;
pub use bounding_volume::BoundingVolume;
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
