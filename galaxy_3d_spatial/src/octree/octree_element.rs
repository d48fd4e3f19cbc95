/// Element capability required by the octree.
///
/// The octree stores elements by value, so `T` is expected to be a cheap
/// non-owning handle (a key, an `Rc`/`Arc`, a reference). Identity is
/// `Eq + Hash` of the handle; the world AABB is read through this trait
/// every time the tree needs it, never cached.
///
/// The impls below for `&E`, `Rc<E>` and `Arc<E>` forward `Eq + Hash` to
/// `E`, so two distinct objects that compare equal are the same element
/// (the second insert fails with `DuplicateElement`). `E`'s `Eq + Hash`
/// must not depend on state that changes while indexed, such as the
/// position. For identity by address, wrap the pointer in a handle whose
/// `Eq` is `Rc::ptr_eq` and whose `Hash` uses `Rc::as_ptr`.

use std::rc::Rc;
use std::sync::Arc;
use crate::bounding::AABB;

/// Anything with a world-space bounding box.
pub trait OctreeElement {
    /// Current world-space AABB. Must be pure: no side effects, and stable
    /// until the owner moves the element.
    fn world_aabb(&self) -> AABB;
}

impl<E: OctreeElement + ?Sized> OctreeElement for &E {
    fn world_aabb(&self) -> AABB {
        (**self).world_aabb()
    }
}

impl<E: OctreeElement + ?Sized> OctreeElement for Rc<E> {
    fn world_aabb(&self) -> AABB {
        (**self).world_aabb()
    }
}

impl<E: OctreeElement + ?Sized> OctreeElement for Arc<E> {
    fn world_aabb(&self) -> AABB {
        (**self).world_aabb()
    }
}
