//! Shared helpers for octree integration tests
//!
//! Provides a scene-owned element handle and deterministic random
//! placement. Included with `mod spatial_test_utils;`.

#![allow(dead_code)]

use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use galaxy_3d_spatial::galaxy3d::bounding::AABB;
use galaxy_3d_spatial::galaxy3d::octree::OctreeElement;
use galaxy_3d_spatial::glam::Vec3;
use rand::Rng;

/// Element handle: identity by id, AABB shared with the owning scene.
#[derive(Debug, Clone)]
pub struct Proxy {
    pub id: u32,
    bounds: Rc<Cell<AABB>>,
}

impl Proxy {
    pub fn cube(id: u32, center: Vec3, half: f32) -> Self {
        Self {
            id,
            bounds: Rc::new(Cell::new(AABB::from_center_half_extent(center, Vec3::splat(half)))),
        }
    }

    pub fn with_invalid_bounds(id: u32) -> Self {
        Self { id, bounds: Rc::new(Cell::new(AABB::EMPTY)) }
    }

    pub fn set_bounds(&self, bounds: AABB) {
        self.bounds.set(bounds);
    }

    pub fn move_to(&self, center: Vec3) {
        let half = self.bounds.get().dimensions();
        self.bounds.set(AABB::from_center_half_extent(center, half));
    }
}

impl PartialEq for Proxy {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Proxy {}

impl Hash for Proxy {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl OctreeElement for Proxy {
    fn world_aabb(&self) -> AABB {
        self.bounds.get()
    }
}

/// Uniform random point in `[-extent, extent]^3`.
pub fn random_point<R: Rng>(rng: &mut R, extent: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
    )
}

/// Random non-empty box centered in `[-extent, extent]^3`.
pub fn random_region<R: Rng>(rng: &mut R, extent: f32, max_half: f32) -> AABB {
    let half = Vec3::new(
        rng.random_range(0.5..max_half),
        rng.random_range(0.5..max_half),
        rng.random_range(0.5..max_half),
    );
    AABB::from_center_half_extent(random_point(rng, extent), half)
}

/// Sorted ids, for set comparisons.
pub fn ids(elements: &[Proxy]) -> Vec<u32> {
    let mut ids: Vec<u32> = elements.iter().map(|e| e.id).collect();
    ids.sort_unstable();
    ids
}
