/// Galaxy3D spatial demo - scene owner driving the octree frame contract
///
/// Each frame: animate part of the scene, refresh world AABBs with the
/// incremental transform, flag moved objects, reconcile the octree once,
/// then cull against an orbiting camera.

use std::cell::Cell;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use glam::{Mat4, Quat, Vec3};
use galaxy_3d_spatial::galaxy3d::Result;
use galaxy_3d_spatial::galaxy3d::bounding::{AABB, BoundingVolume, Frustum};
use galaxy_3d_spatial::galaxy3d::log::{self, LogSeverity};
use galaxy_3d_spatial::galaxy3d::octree::{Octree, OctreeConfig, OctreeElement};
use galaxy_3d_spatial::engine_info;

const SOURCE: &str = "galaxy3d::Demo";
const GRID: i32 = 12;
const SPACING: f32 = 30.0;
const FRAMES: u32 = 120;

/// Octree handle of a scene object. The scene writes the world AABB,
/// the octree reads it.
#[derive(Clone)]
struct ObjectHandle {
    id: usize,
    world_aabb: Rc<Cell<AABB>>,
}

impl PartialEq for ObjectHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ObjectHandle {}

impl Hash for ObjectHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl OctreeElement for ObjectHandle {
    fn world_aabb(&self) -> AABB {
        self.world_aabb.get()
    }
}

struct SceneObject {
    handle: ObjectHandle,
    local_aabb: AABB,
    anchor: Vec3,
    /// Orbit speed in radians per frame (0 for static objects)
    speed: f32,
}

impl SceneObject {
    fn world_matrix(&self, frame: u32) -> Mat4 {
        let angle = self.speed * frame as f32;
        let offset = Vec3::new(angle.cos(), (angle * 0.5).sin() * 0.3, angle.sin()) * SPACING * 0.4;
        Mat4::from_rotation_translation(Quat::from_rotation_y(angle), self.anchor + offset)
    }
}

fn build_scene() -> Vec<SceneObject> {
    let mut objects = Vec::new();
    for x in 0..GRID {
        for z in 0..GRID {
            let id = objects.len();
            let half = Vec3::new(1.0 + (id % 3) as f32, 1.0 + (id % 5) as f32 * 0.5, 1.0);
            let local_aabb = AABB::new(-half, half);
            let anchor = Vec3::new(
                (x - GRID / 2) as f32 * SPACING,
                ((x + z) % 4) as f32 * 5.0,
                (z - GRID / 2) as f32 * SPACING,
            );
            let object = SceneObject {
                handle: ObjectHandle { id, world_aabb: Rc::new(Cell::new(AABB::EMPTY)) },
                local_aabb,
                anchor,
                speed: if id % 4 == 0 { 0.02 + (id % 7) as f32 * 0.005 } else { 0.0 },
            };
            object.handle.world_aabb.set(
                BoundingVolume::incremental_update(&object.local_aabb, &object.world_matrix(0)),
            );
            objects.push(object);
        }
    }
    objects
}

fn camera_frustum(frame: u32) -> Frustum {
    let angle = frame as f32 * 0.01;
    let eye = Vec3::new(angle.cos() * 250.0, 120.0, angle.sin() * 250.0);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    let projection = Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.5, 600.0);
    Frustum::from_view_projection(&(projection * view))
}

fn main() -> Result<()> {
    log::set_min_severity(LogSeverity::Info);

    let objects = build_scene();
    let config = OctreeConfig::new(AABB::new(Vec3::splat(-512.0), Vec3::splat(512.0)));
    let mut octree = Octree::with_config(config)?;
    for object in &objects {
        octree.insert(object.handle.clone())?;
    }
    engine_info!(SOURCE, "Indexed {} objects in {} nodes", octree.len(), octree.node_count());

    for frame in 1..=FRAMES {
        // Simulation: only moving objects touch the index
        for object in objects.iter().filter(|o| o.speed != 0.0) {
            let world = object.world_matrix(frame);
            object.handle.world_aabb.set(BoundingVolume::incremental_update(&object.local_aabb, &world));
            octree.add_to_update_set(&object.handle);
        }

        let stats = octree.update();
        let visible = octree.frustum_collision(&camera_frustum(frame));

        if frame % 20 == 0 {
            engine_info!(SOURCE,
                "Frame {}: {} visible / {}, {} reinserted, {} pruned, {} nodes",
                frame, visible.len(), octree.len(),
                stats.reinserted, stats.pruned_nodes, stats.node_count);
        }
    }

    let regions = octree.get_all_regions();
    let deepest = regions
        .iter()
        .map(|r| r.size().max_element())
        .fold(f32::INFINITY, f32::min);
    engine_info!(SOURCE, "Final tree: {} regions, smallest extent {:.1}", regions.len(), deepest);

    Ok(())
}
