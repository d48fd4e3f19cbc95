//! Spatial index seam
//!
//! Provides the `SpatialIndex` trait used by culling code, implemented by
//! the octree and by a linear brute-force baseline.

mod spatial_index;
mod brute_force_index;

pub use spatial_index::SpatialIndex;
pub use brute_force_index::BruteForceIndex;
