//! Dispatch from (object kind, material kind) to a render function
//!
//! A render function compiles one world object into an ordered list of pass
//! descriptors. The registry owns the mapping; unknown combinations fail
//! loudly instead of silently drawing nothing.

use std::collections::HashMap;

use visgpu_core::{MaterialKind, ObjectKind, Scene, WorldObject};

use crate::error::CompileError;
use crate::frame::FrameState;
use crate::pipeline::types::PassDescriptor;

/// Compiles one object into pass descriptors for the current frame
pub type RenderFunction =
    fn(&WorldObject, &FrameState) -> Result<Vec<PassDescriptor>, CompileError>;

/// Registry of render functions keyed by object and material kind
pub struct RenderRegistry {
    functions: HashMap<(ObjectKind, MaterialKind), RenderFunction>,
}

impl Default for RenderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl RenderRegistry {
    /// An empty registry, for callers that register everything themselves
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// A registry with all built-in pipelines registered
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(ObjectKind::Mesh, MaterialKind::Basic, super::mesh::compile_mesh);
        registry.register(ObjectKind::Points, MaterialKind::Points, super::points::compile_points);
        registry.register(
            ObjectKind::Points,
            MaterialKind::GaussianPoints,
            super::points::compile_gaussian_points,
        );
        registry.register(ObjectKind::Line, MaterialKind::LineStrip, super::line::compile_line);
        registry.register(
            ObjectKind::Volume,
            MaterialKind::VolumeSlice,
            super::volume::compile_volume_slice,
        );
        registry
    }

    /// Register (or replace) the function for a combination
    pub fn register(
        &mut self,
        object: ObjectKind,
        material: MaterialKind,
        function: RenderFunction,
    ) {
        self.functions.insert((object, material), function);
    }

    /// Look up the function for a combination
    pub fn get(&self, object: ObjectKind, material: MaterialKind) -> Option<RenderFunction> {
        self.functions.get(&(object, material)).copied()
    }

    /// Compile one object into its pass descriptors
    ///
    /// Group objects compile to an empty list. Renderable objects without
    /// geometry or material, and combinations with no registered function,
    /// are errors.
    pub fn compile(
        &self,
        object: &WorldObject,
        frame: &FrameState,
    ) -> Result<Vec<PassDescriptor>, CompileError> {
        if object.kind() == ObjectKind::Group {
            return Ok(Vec::new());
        }
        let material = object
            .material()
            .ok_or(CompileError::NotRenderable { object: object.kind() })?;
        if object.geometry().is_none() {
            return Err(CompileError::NotRenderable { object: object.kind() });
        }

        let function = self
            .get(object.kind(), material.kind())
            .ok_or(CompileError::NoRenderFunction {
                object: object.kind(),
                material: material.kind(),
            })?;

        let passes = function(object, frame)?;
        log::trace!(
            "compiled object {} ({:?}/{:?}) into {} pass(es)",
            object.id(),
            object.kind(),
            material.kind(),
            passes.len()
        );
        Ok(passes)
    }

    /// Compile every object of a scene, in pre-order traversal order
    ///
    /// The traversal order is deterministic, so an unchanged scene compiles
    /// to an equivalent descriptor list every frame. Fails on the first
    /// object that cannot be compiled.
    pub fn compile_scene(
        &self,
        scene: &Scene,
        frame: &FrameState,
    ) -> Result<Vec<PassDescriptor>, CompileError> {
        let mut passes = Vec::new();
        for key in scene.traverse() {
            if let Some(object) = scene.object(key) {
                passes.extend(self.compile(object, frame)?);
            }
        }
        Ok(passes)
    }
}
