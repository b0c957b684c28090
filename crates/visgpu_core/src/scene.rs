//! Scene graph arena
//!
//! Nodes live in a slotmap addressed by stable generational keys. Each node
//! stores its child list (ownership) and an optional parent key (non-owning),
//! so the usual parent/child back-reference cycle never exists at the
//! ownership level. Reparenting that would create a cycle is rejected by
//! walking the ancestor chain.

use slotmap::{new_key_type, SlotMap};
use visgpu_math::mat4;

use crate::WorldObject;

new_key_type! {
    /// Stable key of a node in a [`Scene`]
    pub struct NodeKey;
}

/// Error mutating the scene graph
#[derive(Debug, PartialEq, Eq)]
pub enum SceneError {
    /// The given key does not name a live node
    UnknownNode,
    /// Attaching would make a node its own ancestor
    Cycle,
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::UnknownNode => write!(f, "unknown scene node"),
            SceneError::Cycle => write!(f, "attach would create a cycle"),
        }
    }
}

impl std::error::Error for SceneError {}

struct Node {
    object: WorldObject,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// Arena of world objects forming a tree
pub struct Scene {
    nodes: SlotMap<NodeKey, Node>,
    root: NodeKey,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a scene with an empty root group node
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node {
            object: WorldObject::group(),
            parent: None,
            children: Vec::new(),
        });
        Self { nodes, root }
    }

    /// Key of the root group node
    #[inline]
    pub fn root(&self) -> NodeKey {
        self.root
    }

    /// Number of nodes, including the root
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Add an object under the given parent, returning its key
    pub fn add(&mut self, parent: NodeKey, object: WorldObject) -> Result<NodeKey, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode);
        }
        let id = object.id();
        let key = self.nodes.insert(Node {
            object,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(key);
        log::debug!("scene: added object {} under {:?}", id, parent);
        Ok(key)
    }

    /// Get a node's object
    pub fn object(&self, key: NodeKey) -> Option<&WorldObject> {
        self.nodes.get(key).map(|n| &n.object)
    }

    /// Get a node's object mutably
    pub fn object_mut(&mut self, key: NodeKey) -> Option<&mut WorldObject> {
        self.nodes.get_mut(key).map(|n| &mut n.object)
    }

    /// A node's parent key, if it has one
    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key).and_then(|n| n.parent)
    }

    /// A node's children, in insertion order
    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(key)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Move a node under a new parent
    ///
    /// Fails if either key is dead, if the node is the root, or if the new
    /// parent is the node itself or one of its descendants.
    pub fn attach(&mut self, node: NodeKey, new_parent: NodeKey) -> Result<(), SceneError> {
        if !self.nodes.contains_key(node) || !self.nodes.contains_key(new_parent) {
            return Err(SceneError::UnknownNode);
        }
        if node == self.root {
            return Err(SceneError::Cycle);
        }
        // Reject if node appears in new_parent's ancestor chain
        let mut cursor = Some(new_parent);
        while let Some(k) = cursor {
            if k == node {
                return Err(SceneError::Cycle);
            }
            cursor = self.nodes[k].parent;
        }

        if let Some(old_parent) = self.nodes[node].parent {
            self.nodes[old_parent].children.retain(|&c| c != node);
        }
        self.nodes[node].parent = Some(new_parent);
        self.nodes[new_parent].children.push(node);
        Ok(())
    }

    /// Remove a node and its whole subtree
    pub fn remove(&mut self, node: NodeKey) -> Result<(), SceneError> {
        if node == self.root || !self.nodes.contains_key(node) {
            return Err(SceneError::UnknownNode);
        }
        if let Some(parent) = self.nodes[node].parent {
            self.nodes[parent].children.retain(|&c| c != node);
        }
        let mut stack = vec![node];
        let mut removed = 0usize;
        while let Some(key) = stack.pop() {
            if let Some(n) = self.nodes.remove(key) {
                stack.extend(n.children);
                removed += 1;
            }
        }
        log::debug!("scene: removed subtree of {} node(s)", removed);
        Ok(())
    }

    /// Keys of all nodes in pre-order (parents before children)
    pub fn traverse(&self) -> Vec<NodeKey> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            out.push(key);
            // Push in reverse so children come out in insertion order
            for &child in self.nodes[key].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Recompute world transforms top-down
    ///
    /// `world = parent.world * local` for every node with auto-update
    /// enabled; opted-out nodes keep their directly-set world transform but
    /// still propagate it to their children. Call once per frame before
    /// compiling any pass.
    pub fn update_world_transforms(&mut self) {
        let mut stack = vec![(self.root, mat4::IDENTITY)];
        while let Some((key, parent_world)) = stack.pop() {
            let node = &mut self.nodes[key];
            if node.object.auto_update_transform {
                node.object.world_transform = mat4::mul(parent_world, node.object.local_transform);
            }
            let world = node.object.world_transform;
            for &child in self.nodes[key].children.iter() {
                stack.push((child, world));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visgpu_math::{mat4, Vec3};

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_scene_new_has_root() {
        let scene = Scene::new();
        assert_eq!(scene.len(), 1);
        assert!(scene.is_empty());
        assert!(scene.object(scene.root()).is_some());
    }

    #[test]
    fn test_add_and_children() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, WorldObject::group()).unwrap();
        let b = scene.add(root, WorldObject::group()).unwrap();

        assert_eq!(scene.children(root), &[a, b]);
        assert_eq!(scene.parent(a), Some(root));
        assert_eq!(scene.len(), 3);
    }

    #[test]
    fn test_add_to_unknown_parent() {
        let mut scene = Scene::new();
        let a = scene.add(scene.root(), WorldObject::group()).unwrap();
        scene.remove(a).unwrap();
        assert_eq!(
            scene.add(a, WorldObject::group()).unwrap_err(),
            SceneError::UnknownNode
        );
    }

    #[test]
    fn test_attach_rejects_cycle() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, WorldObject::group()).unwrap();
        let b = scene.add(a, WorldObject::group()).unwrap();
        let c = scene.add(b, WorldObject::group()).unwrap();

        // a under its own grandchild
        assert_eq!(scene.attach(a, c).unwrap_err(), SceneError::Cycle);
        // a under itself
        assert_eq!(scene.attach(a, a).unwrap_err(), SceneError::Cycle);
        // sibling moves are fine
        assert!(scene.attach(c, root).is_ok());
        assert_eq!(scene.parent(c), Some(root));
    }

    #[test]
    fn test_remove_subtree() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, WorldObject::group()).unwrap();
        let b = scene.add(a, WorldObject::group()).unwrap();
        scene.add(b, WorldObject::group()).unwrap();

        scene.remove(a).unwrap();
        assert_eq!(scene.len(), 1);
        assert!(scene.object(b).is_none());
    }

    #[test]
    fn test_traverse_preorder() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene.add(root, WorldObject::group()).unwrap();
        let b = scene.add(root, WorldObject::group()).unwrap();
        let a1 = scene.add(a, WorldObject::group()).unwrap();

        assert_eq!(scene.traverse(), vec![root, a, a1, b]);
    }

    #[test]
    fn test_world_transform_propagation() {
        let mut scene = Scene::new();
        let root = scene.root();
        let parent = scene
            .add(
                root,
                WorldObject::group()
                    .with_local_transform(mat4::translation(Vec3::new(1.0, 0.0, 0.0))),
            )
            .unwrap();
        let child = scene
            .add(
                parent,
                WorldObject::group()
                    .with_local_transform(mat4::translation(Vec3::new(0.0, 2.0, 0.0))),
            )
            .unwrap();

        scene.update_world_transforms();

        let world = scene.object(child).unwrap().world_transform;
        let p = mat4::project_point(world, Vec3::ZERO);
        assert!((p.x - 1.0).abs() < EPSILON);
        assert!((p.y - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_auto_update_opt_out() {
        let mut scene = Scene::new();
        let root = scene.root();
        let key = scene
            .add(
                root,
                WorldObject::group()
                    .with_local_transform(mat4::translation(Vec3::new(5.0, 0.0, 0.0))),
            )
            .unwrap();

        let fixed = mat4::translation(Vec3::new(0.0, 0.0, 9.0));
        {
            let obj = scene.object_mut(key).unwrap();
            obj.auto_update_transform = false;
            obj.world_transform = fixed;
        }

        scene.update_world_transforms();
        assert_eq!(scene.object(key).unwrap().world_transform, fixed);
    }
}
