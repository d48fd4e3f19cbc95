/// Octree tuning parameters.

use glam::Vec3;
use crate::bounding::AABB;
use crate::error::Result;
use crate::engine_bail;

/// Configuration for an [`Octree`](super::Octree).
///
/// The root extent is fixed for the lifetime of the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeConfig {
    /// World extent covered by the root node
    pub world_bounds: AABB,
    /// A childless node stores up to this many elements before subdividing
    pub leaf_capacity: usize,
    /// Nodes whose extent is at or below this size on every axis never subdivide
    pub min_region_size: f32,
    /// Idle update passes an empty, childless node survives at first
    pub initial_lifespan: u32,
    /// Upper bound for the lifespan, which doubles each time a node is revived
    pub max_lifespan: u32,
}

impl OctreeConfig {
    pub const DEFAULT_LEAF_CAPACITY: usize = 5;
    pub const DEFAULT_MIN_REGION_SIZE: f32 = 1.0;
    pub const DEFAULT_INITIAL_LIFESPAN: u32 = 8;
    pub const DEFAULT_MAX_LIFESPAN: u32 = 64;

    /// Default parameters over the given world extent.
    pub fn new(world_bounds: AABB) -> Self {
        Self {
            world_bounds,
            ..Self::default()
        }
    }

    /// Check the configuration for values the octree cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if:
    /// - the world bounds are empty or non-finite
    /// - `leaf_capacity` is zero
    /// - `min_region_size` is not strictly positive
    /// - the lifespans are zero or `initial_lifespan > max_lifespan`
    pub fn validate(&self) -> Result<()> {
        const SOURCE: &str = "galaxy3d::OctreeConfig";

        if !self.world_bounds.is_valid() {
            engine_bail!(SOURCE, InvalidConfig,
                "world_bounds {:?} must be finite and non-empty", self.world_bounds);
        }
        if self.leaf_capacity == 0 {
            engine_bail!(SOURCE, InvalidConfig, "leaf_capacity must be >= 1");
        }
        if !(self.min_region_size > 0.0) || !self.min_region_size.is_finite() {
            engine_bail!(SOURCE, InvalidConfig,
                "min_region_size must be > 0 (got {})", self.min_region_size);
        }
        if self.initial_lifespan == 0 || self.initial_lifespan > self.max_lifespan {
            engine_bail!(SOURCE, InvalidConfig,
                "lifespans must satisfy 1 <= initial ({}) <= max ({})",
                self.initial_lifespan, self.max_lifespan);
        }
        Ok(())
    }
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            world_bounds: AABB::new(Vec3::splat(-1000.0), Vec3::splat(1000.0)),
            leaf_capacity: Self::DEFAULT_LEAF_CAPACITY,
            min_region_size: Self::DEFAULT_MIN_REGION_SIZE,
            initial_lifespan: Self::DEFAULT_INITIAL_LIFESPAN,
            max_lifespan: Self::DEFAULT_MAX_LIFESPAN,
        }
    }
}
