/*!
# Galaxy 3D Spatial

Adaptive octree spatial index for the Galaxy 3D engine family.

The index partitions 3D space hierarchically so that visibility (frustum)
and region queries touch only nearby elements. Elements are externally
owned handles exposing a world-space AABB; the index never owns scene data.

## Architecture

- **AABB / Frustum**: passive bounding-volume value types
- **BoundingVolume**: stateless geometric predicates (containment, overlap,
  frustum visibility, incremental AABB transform)
- **Octree**: lazily subdivided tree with deferred per-frame re-insertion
  and idle-node pruning
- **SpatialIndex**: query seam implemented by the octree and a brute-force
  baseline

## Frame contract

Mutate (`insert` / `remove` / `add_to_update_set`), call `update()` once,
then query.
*/

// Internal modules
mod error;
pub mod log;
pub mod bounding;
pub mod octree;
pub mod index;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        pub use crate::log::{set_logger, reset_logger, set_min_severity, min_severity};
    }

    // Bounding volumes and predicates
    pub mod bounding {
        pub use crate::bounding::*;
    }

    // Octree index
    pub mod octree {
        pub use crate::octree::*;
    }

    // Spatial index seam
    pub mod index {
        pub use crate::index::*;
    }
}

// Re-export math library at crate root
pub use glam;
