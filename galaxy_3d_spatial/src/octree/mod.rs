//! Adaptive octree spatial index
//!
//! Elements are externally owned handles exposing a world AABB. The tree
//! is reconciled once per frame by `Octree::update()`.

mod octree;
mod octree_config;
mod octree_element;

pub use octree::{Octree, NodeKey, UpdateStats};
pub use octree_config::OctreeConfig;
pub use octree_element::OctreeElement;
