/// Octree - adaptive spatial index with deferred, amortized updates.
///
/// Each element is stored in exactly one node: the deepest node reached
/// by the insertion walk whose bounds strictly contain it. Elements that
/// straddle an octant boundary stay in the parent. Nodes are created
/// lazily when a region first needs subdividing and pruned after staying
/// empty for a number of consecutive update passes.
///
/// Nodes live in a `SlotMap` arena. Children are owned through
/// `[Option<NodeKey>; 8]`, and each child keeps its parent's key, so the
/// upward walks of re-insertion never need raw back-pointers.
///
/// ## Frame contract
///
/// The scene owner calls `insert` / `remove` / `add_to_update_set` during
/// simulation, then `update()` exactly once, then runs queries. Queries
/// issued against moved-but-unreconciled elements may miss them.
///
/// ## World extent
///
/// The root extent never grows. `insert` rejects an element that is not
/// strictly inside it. An element that later moves outside the root is
/// kept directly at the root by `update()`; root elements are tested
/// individually by every query, so results stay correct at the cost of
/// a linear scan for those elements.

use std::collections::VecDeque;
use std::hash::Hash;
use std::mem;
use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::{new_key_type, SlotMap};
use crate::bounding::{AABB, BoundingVolume, Frustum, FrustumTest};
use crate::error::Result;
use crate::{engine_bail, engine_debug, engine_trace, engine_warn};
use super::octree_config::OctreeConfig;
use super::octree_element::OctreeElement;

const SOURCE: &str = "galaxy3d::Octree";

new_key_type! {
    /// Handle of a node in the octree arena.
    ///
    /// Becomes invalid when the node is pruned.
    pub struct NodeKey;
}

/// A single node in the octree.
struct OctreeNode<T> {
    /// World-space bounds of this node
    bounds: AABB,
    /// Parent node (None for the root)
    parent: Option<NodeKey>,
    /// Children by octant index (bit0 = X, bit1 = Y, bit2 = Z)
    children: [Option<NodeKey>; 8],
    child_count: u8,
    /// Elements stored directly at this node
    objects: Vec<T>,
    /// Elements stored here that moved since the last update pass
    update_set: FxHashSet<T>,
    /// Remaining idle passes before pruning (None while the node is active)
    idle_countdown: Option<u32>,
    /// Idle passes granted the next time the node goes idle
    lifespan: u32,
}

impl<T> OctreeNode<T> {
    fn new(bounds: AABB, parent: Option<NodeKey>, lifespan: u32) -> Self {
        Self {
            bounds,
            parent,
            children: [None; 8],
            child_count: 0,
            objects: Vec::new(),
            update_set: FxHashSet::default(),
            idle_countdown: None,
            lifespan,
        }
    }

    fn has_children(&self) -> bool {
        self.child_count > 0
    }

    fn is_idle(&self) -> bool {
        self.objects.is_empty() && !self.has_children()
    }

    fn is_prunable(&self) -> bool {
        self.idle_countdown == Some(0) && self.is_idle()
    }
}

/// Summary of one `Octree::update()` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Dirty elements removed from their node and inserted again
    pub reinserted: usize,
    /// Re-inserted elements no longer inside the world extent (kept at root)
    pub escaped: usize,
    /// Nodes freed by the idle sweep
    pub pruned_nodes: usize,
    /// Live nodes after the pass (root included)
    pub node_count: usize,
}

/// Adaptive octree over elements exposing a world-space AABB.
///
/// `T` is a cheap handle (see [`OctreeElement`]); the element itself is
/// owned by the scene.
pub struct Octree<T> {
    /// Node arena
    nodes: SlotMap<NodeKey, OctreeNode<T>>,
    /// Root node, never pruned
    root: NodeKey,
    config: OctreeConfig,
    /// Reverse lookup: element → node storing it
    locations: FxHashMap<T, NodeKey>,
}

impl<T> Octree<T>
where
    T: OctreeElement + Clone + Eq + Hash,
{
    /// Create an empty octree over `world_bounds` with default parameters.
    ///
    /// `world_bounds` must be finite and non-empty. This is only asserted
    /// in debug builds; a release build would reject every insert with
    /// `OutsideWorldBounds`. Use `with_config` to get an
    /// `Error::InvalidConfig` for bounds that are not known to be valid.
    pub fn new(world_bounds: AABB) -> Self {
        debug_assert!(world_bounds.is_valid(), "octree world bounds must be finite and non-empty");
        Self::build(OctreeConfig::new(world_bounds))
    }

    /// Create an empty octree from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if `config.validate()` fails.
    pub fn with_config(config: OctreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: OctreeConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(OctreeNode::new(config.world_bounds, None, config.initial_lifespan));
        Self {
            nodes,
            root,
            config,
            locations: FxHashMap::default(),
        }
    }

    // ===== ACCESSORS =====

    /// Configuration the tree was built with
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }

    /// Fixed world extent of the root node
    pub fn world_bounds(&self) -> AABB {
        self.config.world_bounds
    }

    /// Number of indexed elements
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Whether the element is indexed
    pub fn contains(&self, element: &T) -> bool {
        self.locations.contains_key(element)
    }

    /// Number of live nodes (root included)
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Root node handle
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Node currently storing the element
    pub fn node_of(&self, element: &T) -> Option<NodeKey> {
        self.locations.get(element).copied()
    }

    /// Bounds of a live node
    pub fn node_bounds(&self, key: NodeKey) -> Option<AABB> {
        self.nodes.get(key).map(|node| node.bounds)
    }

    /// Parent of a live node (None for the root or a pruned key)
    pub fn node_parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|node| node.parent)
    }

    /// Whether the element is waiting for the next update pass
    pub fn is_dirty(&self, element: &T) -> bool {
        self.locations
            .get(element)
            .is_some_and(|&key| self.nodes[key].update_set.contains(element))
    }

    // ===== MUTATION =====

    /// Index an element by its current world AABB.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidBounds` if the AABB is empty or non-finite
    /// - `Error::DuplicateElement` if the element is already indexed
    /// - `Error::OutsideWorldBounds` if the AABB is not strictly inside the
    ///   world extent (the root never resizes)
    pub fn insert(&mut self, element: T) -> Result<()> {
        let bounds = element.world_aabb();

        if !bounds.is_valid() {
            engine_bail!(SOURCE, InvalidBounds,
                "Element AABB {:?} is empty or non-finite", bounds);
        }
        if self.locations.contains_key(&element) {
            engine_bail!(SOURCE, DuplicateElement,
                "Element with AABB {:?} is already indexed", bounds);
        }
        if !BoundingVolume::contains(&self.config.world_bounds, &bounds) {
            engine_bail!(SOURCE, OutsideWorldBounds,
                "Element AABB {:?} is not strictly inside world bounds {:?}",
                bounds, self.config.world_bounds);
        }

        self.insert_from(self.root, element, &bounds);
        Ok(())
    }

    /// Remove an element from the index.
    ///
    /// Returns `false` if the element was not indexed, which usually means
    /// the scene unregistered it twice.
    pub fn remove(&mut self, element: &T) -> bool {
        let Some(key) = self.locations.remove(element) else {
            engine_warn!(SOURCE, "Remove of an element that is not indexed");
            return false;
        };

        let node = &mut self.nodes[key];
        node.update_set.remove(element);
        let position = node.objects.iter().position(|e| e == element);
        debug_assert!(position.is_some(), "octree location map out of sync with node storage");
        match position {
            Some(pos) => {
                node.objects.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    /// Mark an element as moved. Reconciled by the next `update()`.
    ///
    /// O(1) and idempotent within a frame. Returns `false` if the element
    /// is not indexed.
    pub fn add_to_update_set(&mut self, element: &T) -> bool {
        match self.locations.get(element) {
            Some(&key) => {
                self.nodes[key].update_set.insert(element.clone());
                true
            }
            None => false,
        }
    }

    /// Drop every element and every node except the root.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.insert(OctreeNode::new(
            self.config.world_bounds,
            None,
            self.config.initial_lifespan,
        ));
        self.locations.clear();
    }

    /// Per-frame reconciliation pass.
    ///
    /// Must be called once per frame, after all transform updates and
    /// before queries. Moves every dirty element to the node matching its
    /// new AABB (walking up only as far as needed) and prunes subtrees
    /// that stayed empty for their idle lifespan.
    pub fn update(&mut self) -> UpdateStats {
        let mut stats = UpdateStats::default();
        self.update_node(self.root, &mut stats);
        stats.node_count = self.nodes.len();

        engine_debug!(SOURCE,
            "Update: {} reinserted, {} escaped, {} pruned, {} nodes",
            stats.reinserted, stats.escaped, stats.pruned_nodes, stats.node_count);

        stats
    }

    fn update_node(&mut self, key: NodeKey, stats: &mut UpdateStats) {
        // Idle bookkeeping
        let max_lifespan = self.config.max_lifespan;
        let node = &mut self.nodes[key];
        if node.is_idle() {
            node.idle_countdown = Some(match node.idle_countdown {
                None => node.lifespan,
                Some(remaining) => remaining.saturating_sub(1),
            });
        } else if node.idle_countdown.take().is_some() {
            // Revived: the next idle period lasts longer
            node.lifespan = node.lifespan.saturating_mul(2).min(max_lifespan);
        }

        // Dirty elements stored here move to the processing queue
        let mut queue = VecDeque::new();
        if !node.update_set.is_empty() {
            for element in mem::take(&mut node.update_set) {
                debug_assert!(node.objects.contains(&element), "dirty element not stored at its node");
                queue.push_back(element);
            }
        }

        let children = node.children;
        for child in children.into_iter().flatten() {
            self.update_node(child, stats);
        }

        while let Some(element) = queue.pop_front() {
            self.reinsert(key, element, stats);
        }

        // Sweep children whose idle countdown expired
        for octant in 0..8 {
            let Some(child) = self.nodes[key].children[octant] else {
                continue;
            };
            if self.nodes[child].is_prunable() {
                self.nodes.remove(child);
                let node = &mut self.nodes[key];
                node.children[octant] = None;
                node.child_count -= 1;
                stats.pruned_nodes += 1;
                engine_trace!(SOURCE, "Pruned idle octant {} of node {:?}", octant, key);
            }
        }
    }

    /// Take `element` out of node `key` and insert it again from the
    /// closest ancestor that still strictly contains it.
    fn reinsert(&mut self, key: NodeKey, element: T, stats: &mut UpdateStats) {
        let node = &mut self.nodes[key];
        let Some(pos) = node.objects.iter().position(|e| *e == element) else {
            return;
        };
        node.objects.swap_remove(pos);

        let bounds = element.world_aabb();
        let mut target = key;
        while !BoundingVolume::contains(&self.nodes[target].bounds, &bounds) {
            match self.nodes[target].parent {
                Some(parent) => target = parent,
                None => break,
            }
        }

        if !BoundingVolume::contains(&self.nodes[target].bounds, &bounds) {
            stats.escaped += 1;
            engine_warn!(SOURCE,
                "Element AABB {:?} left the world bounds; kept at the root", bounds);
        }

        self.insert_from(target, element, &bounds);
        stats.reinserted += 1;
    }

    /// Insertion walk starting at `start`. Returns the node that stores
    /// the element.
    fn insert_from(&mut self, start: NodeKey, element: T, bounds: &AABB) -> NodeKey {
        let min_region = Vec3::splat(self.config.min_region_size);
        let mut key = start;

        'descend: loop {
            let node = &self.nodes[key];
            let (node_bounds, parent) = (node.bounds, node.parent);

            // Small populations stay flat
            if node.objects.len() < self.config.leaf_capacity && !node.has_children() {
                break;
            }
            // Subdivision floor
            if node_bounds.size().cmple(min_region).all() {
                break;
            }

            if BoundingVolume::contains(&node_bounds, bounds) {
                let octants = self.octant_bounds(key);
                for (octant, octant_bounds) in octants.iter().enumerate() {
                    if BoundingVolume::contains(octant_bounds, bounds) {
                        key = self.child_or_create(key, octant, *octant_bounds);
                        continue 'descend;
                    }
                }
                // Straddles an octant boundary
                break;
            }

            match parent {
                Some(parent) => key = parent,
                None => break,
            }
        }

        let node = &mut self.nodes[key];
        node.objects.push(element.clone());
        self.locations.insert(element, key);
        key
    }

    /// Bounds of the 8 octants of a node, reusing existing children's bounds.
    fn octant_bounds(&self, key: NodeKey) -> [AABB; 8] {
        let node = &self.nodes[key];
        let center = node.bounds.center();
        std::array::from_fn(|octant| match node.children[octant] {
            Some(child) => self.nodes[child].bounds,
            None => octant_aabb(&node.bounds, center, octant),
        })
    }

    fn child_or_create(&mut self, parent: NodeKey, octant: usize, bounds: AABB) -> NodeKey {
        if let Some(child) = self.nodes[parent].children[octant] {
            return child;
        }

        let child = self.nodes.insert(OctreeNode::new(bounds, Some(parent), self.config.initial_lifespan));
        let node = &mut self.nodes[parent];
        node.children[octant] = Some(child);
        node.child_count += 1;

        engine_trace!(SOURCE, "Created octant {} of node {:?}: {:?}", octant, parent, bounds);
        child
    }

    // ===== QUERIES =====

    /// Every indexed element, depth-first.
    pub fn get_all_objects(&self) -> Vec<T> {
        let mut results = Vec::with_capacity(self.len());
        self.collect_all(self.root, &mut results);
        results
    }

    /// Bounds of every live node, depth-first (for debug drawing).
    pub fn get_all_regions(&self) -> Vec<AABB> {
        let mut regions = Vec::with_capacity(self.nodes.len());
        self.collect_regions(self.root, &mut regions);
        regions
    }

    /// Elements whose AABB passes the frustum visibility test.
    pub fn frustum_collision(&self, frustum: &Frustum) -> Vec<T> {
        let mut results = Vec::new();
        self.query_frustum_into(frustum, &mut results);
        results
    }

    /// Elements whose AABB overlaps `region` (touching counts).
    pub fn aabb_collision(&self, region: &AABB) -> Vec<T> {
        let mut results = Vec::new();
        self.query_aabb_into(region, &mut results);
        results
    }

    /// Frustum query appending into `results`.
    ///
    /// The root's own elements are always tested individually (they may
    /// lie outside the root). Child nodes are classified: `Outside` prunes
    /// the subtree, `Inside` collects it without further tests.
    pub fn query_frustum_into(&self, frustum: &Frustum, results: &mut Vec<T>) {
        self.query_frustum_recursive(self.root, frustum, results);
    }

    /// Region query appending into `results`.
    pub fn query_aabb_into(&self, region: &AABB, results: &mut Vec<T>) {
        self.query_aabb_recursive(self.root, region, results);
    }

    fn query_frustum_recursive(&self, key: NodeKey, frustum: &Frustum, results: &mut Vec<T>) {
        let node = &self.nodes[key];

        for element in &node.objects {
            if BoundingVolume::frustum_visible(&element.world_aabb(), frustum) {
                results.push(element.clone());
            }
        }

        for &child in node.children.iter().flatten() {
            match frustum.classify_aabb(&self.nodes[child].bounds) {
                FrustumTest::Outside => {}
                FrustumTest::Inside => self.collect_all(child, results),
                FrustumTest::Partial => self.query_frustum_recursive(child, frustum, results),
            }
        }
    }

    fn query_aabb_recursive(&self, key: NodeKey, region: &AABB, results: &mut Vec<T>) {
        let node = &self.nodes[key];

        for element in &node.objects {
            if BoundingVolume::overlap(&element.world_aabb(), region) {
                results.push(element.clone());
            }
        }

        for &child in node.children.iter().flatten() {
            if BoundingVolume::overlap(&self.nodes[child].bounds, region) {
                self.query_aabb_recursive(child, region, results);
            }
        }
    }

    fn collect_all(&self, key: NodeKey, results: &mut Vec<T>) {
        let node = &self.nodes[key];
        results.extend(node.objects.iter().cloned());
        for &child in node.children.iter().flatten() {
            self.collect_all(child, results);
        }
    }

    fn collect_regions(&self, key: NodeKey, regions: &mut Vec<AABB>) {
        let node = &self.nodes[key];
        regions.push(node.bounds);
        for &child in node.children.iter().flatten() {
            self.collect_regions(child, regions);
        }
    }
}

/// AABB of octant `octant` (bit0 = X, bit1 = Y, bit2 = Z; 0 = low half).
fn octant_aabb(parent: &AABB, center: Vec3, octant: usize) -> AABB {
    AABB {
        min: Vec3::new(
            if octant & 1 == 0 { parent.min.x } else { center.x },
            if octant & 2 == 0 { parent.min.y } else { center.y },
            if octant & 4 == 0 { parent.min.z } else { center.z },
        ),
        max: Vec3::new(
            if octant & 1 == 0 { center.x } else { parent.max.x },
            if octant & 2 == 0 { center.y } else { parent.max.y },
            if octant & 4 == 0 { center.z } else { parent.max.z },
        ),
    }
}

#[cfg(test)]
#[path = "octree_tests.rs"]
mod tests;
