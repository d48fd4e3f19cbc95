/// Spatial acceleration structures for scene queries.
///
/// A SpatialIndex indexes elements by their world-space AABB for frustum
/// culling and region queries. The caller creates and owns the index and
/// follows the frame contract: mutate, `update()` once, then query.

use std::hash::Hash;
use crate::bounding::{AABB, Frustum};
use crate::error::Result;
use crate::octree::{Octree, OctreeElement, UpdateStats};

/// Trait for spatial indexing of externally owned elements.
pub trait SpatialIndex<T> {
    /// Start tracking an element at its current world AABB.
    fn insert(&mut self, element: T) -> Result<()>;

    /// Stop tracking an element. Returns `false` if it was not tracked.
    fn remove(&mut self, element: &T) -> bool;

    /// Flag an element whose AABB changed since the last `update()`.
    /// Returns `false` if it is not tracked.
    fn mark_dirty(&mut self, element: &T) -> bool;

    /// Reconcile every dirty element. Called once per frame.
    fn update(&mut self) -> UpdateStats;

    /// Query all elements whose world AABB passes the frustum test.
    /// Results are appended to `results`.
    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<T>);

    /// Query all elements whose world AABB overlaps `region`.
    /// Results are appended to `results`.
    fn query_aabb(&self, region: &AABB, results: &mut Vec<T>);

    /// Number of tracked elements
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all elements from the index.
    fn clear(&mut self);
}

impl<T> SpatialIndex<T> for Octree<T>
where
    T: OctreeElement + Clone + Eq + Hash,
{
    fn insert(&mut self, element: T) -> Result<()> {
        Octree::insert(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        Octree::remove(self, element)
    }

    fn mark_dirty(&mut self, element: &T) -> bool {
        self.add_to_update_set(element)
    }

    fn update(&mut self) -> UpdateStats {
        Octree::update(self)
    }

    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<T>) {
        self.query_frustum_into(frustum, results);
    }

    fn query_aabb(&self, region: &AABB, results: &mut Vec<T>) {
        self.query_aabb_into(region, results);
    }

    fn len(&self) -> usize {
        Octree::len(self)
    }

    fn clear(&mut self) {
        Octree::clear(self);
    }
}
