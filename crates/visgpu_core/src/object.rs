//! World objects: geometry + material + transform
//!
//! A world object pairs one geometry with one material and carries a local
//! and a derived world transform. Hierarchy (children, parent) is owned by
//! the [`Scene`](crate::Scene) arena, not by the object itself.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde::{Serialize, Deserialize};
use visgpu_math::{mat4, Mat4};

use crate::{Geometry, Material};

/// Closed enumeration of renderable object kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Pure transform node, never rendered
    Group,
    Mesh,
    Points,
    Line,
    Volume,
}

static NEXT_OBJECT_ID: AtomicU32 = AtomicU32::new(1);

/// A scene node pairing one geometry and one material with a transform
pub struct WorldObject {
    /// Process-scoped unique id, also used for GPU-side picking
    id: u32,
    kind: ObjectKind,
    geometry: Option<Arc<Geometry>>,
    material: Option<Arc<Material>>,
    /// Transform relative to the parent node
    pub local_transform: Mat4,
    /// Derived transform; `parent.world_transform * local_transform`
    pub world_transform: Mat4,
    /// When false, propagation leaves `world_transform` untouched and the
    /// caller sets it directly
    pub auto_update_transform: bool,
}

impl WorldObject {
    /// Create a renderable object of the given kind
    pub fn new(kind: ObjectKind, geometry: Arc<Geometry>, material: Arc<Material>) -> Self {
        Self {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            kind,
            geometry: Some(geometry),
            material: Some(material),
            local_transform: mat4::IDENTITY,
            world_transform: mat4::IDENTITY,
            auto_update_transform: true,
        }
    }

    /// Create a pure transform node without geometry or material
    pub fn group() -> Self {
        Self {
            id: NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed),
            kind: ObjectKind::Group,
            geometry: None,
            material: None,
            local_transform: mat4::IDENTITY,
            world_transform: mat4::IDENTITY,
            auto_update_transform: true,
        }
    }

    /// Set the local transform (builder style)
    pub fn with_local_transform(mut self, transform: Mat4) -> Self {
        self.local_transform = transform;
        self
    }

    /// Process-scoped unique id
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    #[inline]
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        self.geometry.as_ref()
    }

    #[inline]
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.material.as_ref()
    }

    /// Replace the material (geometry is fixed for the object's lifetime)
    pub fn set_material(&mut self, material: Arc<Material>) {
        self.material = Some(material);
    }
}

impl std::fmt::Debug for WorldObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldObject")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("auto_update_transform", &self.auto_update_transform)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasicMaterial, Geometry};
    use visgpu_math::Vec4;

    #[test]
    fn test_object_ids_unique() {
        let a = WorldObject::group();
        let b = WorldObject::group();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_new_object() {
        let geometry = Arc::new(Geometry::new(&[Vec4::new(0.0, 0.0, 0.0, 1.0)]));
        let material = Arc::new(Material::from(BasicMaterial::default()));
        let obj = WorldObject::new(ObjectKind::Mesh, geometry, material);

        assert_eq!(obj.kind(), ObjectKind::Mesh);
        assert!(obj.geometry().is_some());
        assert!(obj.material().is_some());
        assert_eq!(obj.world_transform, mat4::IDENTITY);
        assert!(obj.auto_update_transform);
    }

    #[test]
    fn test_group_has_no_geometry() {
        let group = WorldObject::group();
        assert_eq!(group.kind(), ObjectKind::Group);
        assert!(group.geometry().is_none());
        assert!(group.material().is_none());
    }
}
