/// BruteForceIndex - linear `SpatialIndex` baseline
///
/// Tests every element on every query. Suitable for small scenes and as a
/// reference when checking the octree.

use std::hash::Hash;
use rustc_hash::FxHashSet;
use crate::bounding::{AABB, BoundingVolume, Frustum};
use crate::error::Result;
use crate::octree::{OctreeElement, UpdateStats};
use crate::{engine_bail, engine_warn};
use super::spatial_index::SpatialIndex;

const SOURCE: &str = "galaxy3d::BruteForceIndex";

/// Flat list of elements with no world extent.
pub struct BruteForceIndex<T> {
    elements: Vec<T>,
    dirty: FxHashSet<T>,
}

impl<T> BruteForceIndex<T>
where
    T: OctreeElement + Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            dirty: FxHashSet::default(),
        }
    }

    /// Every tracked element, in insertion order (modulo removals).
    pub fn elements(&self) -> &[T] {
        &self.elements
    }
}

impl<T> Default for BruteForceIndex<T>
where
    T: OctreeElement + Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SpatialIndex<T> for BruteForceIndex<T>
where
    T: OctreeElement + Clone + Eq + Hash,
{
    fn insert(&mut self, element: T) -> Result<()> {
        let bounds = element.world_aabb();
        if !bounds.is_valid() {
            engine_bail!(SOURCE, InvalidBounds,
                "Element AABB {:?} is empty or non-finite", bounds);
        }
        if self.elements.contains(&element) {
            engine_bail!(SOURCE, DuplicateElement,
                "Element with AABB {:?} is already indexed", bounds);
        }
        self.elements.push(element);
        Ok(())
    }

    fn remove(&mut self, element: &T) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(pos) => {
                self.elements.swap_remove(pos);
                self.dirty.remove(element);
                true
            }
            None => {
                engine_warn!(SOURCE, "Remove of an element that is not indexed");
                false
            }
        }
    }

    fn mark_dirty(&mut self, element: &T) -> bool {
        if !self.elements.contains(element) {
            return false;
        }
        self.dirty.insert(element.clone());
        true
    }

    fn update(&mut self) -> UpdateStats {
        let reinserted = self.dirty.len();
        self.dirty.clear();
        UpdateStats { reinserted, ..Default::default() }
    }

    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<T>) {
        results.extend(
            self.elements
                .iter()
                .filter(|e| BoundingVolume::frustum_visible(&e.world_aabb(), frustum))
                .cloned(),
        );
    }

    fn query_aabb(&self, region: &AABB, results: &mut Vec<T>) {
        results.extend(
            self.elements
                .iter()
                .filter(|e| BoundingVolume::overlap(&e.world_aabb(), region))
                .cloned(),
        );
    }

    fn len(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.dirty.clear();
    }
}

#[cfg(test)]
#[path = "brute_force_index_tests.rs"]
mod tests;
