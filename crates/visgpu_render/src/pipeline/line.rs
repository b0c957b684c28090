//! Line pipeline: compute-expanded triangle strip
//!
//! Thick lines cannot be drawn directly, so compilation emits two passes.
//! A compute pass reads the N line vertices and writes 2N strip vertices,
//! offsetting each original vertex by half the thickness to either side.
//! The draw pass then renders the 2N vertices as a triangle strip. The strip
//! buffer is a scratch allocation keyed by the object id, so the GPU
//! collaborator reuses it across frames and the two passes agree on it
//! without the compiler owning any storage.

use visgpu_core::{Material, WorldObject};

use crate::error::CompileError;
use crate::frame::FrameState;
use crate::pipeline::types::{
    standard_bindings0, storage_binding, BindingResource, ComputePass, DrawPass, LineUniforms,
    PassDescriptor, PrimitiveTopology, ShaderId, UniformData,
};

/// Bytes per expanded strip vertex (one vec4 position)
const STRIP_VERTEX_BYTES: u64 = 16;

/// Compile a line object into an expansion pass plus a strip draw
pub fn compile_line(
    object: &WorldObject,
    frame: &FrameState,
) -> Result<Vec<PassDescriptor>, CompileError> {
    let kind = object.kind();
    let geometry = object
        .geometry()
        .ok_or(CompileError::NotRenderable { object: kind })?;
    let material = match object.material().map(|m| m.as_ref()) {
        Some(Material::LineStrip(m)) => m,
        _ => return Err(CompileError::NotRenderable { object: kind }),
    };

    let n = geometry.vertex_count() as u32;
    let uniforms = LineUniforms {
        color: material.color,
        thickness: material.thickness,
        _padding: [0.0; 3],
    };

    let scratch_key = object.id() as u64;
    let scratch_size = 2 * n as u64 * STRIP_VERTEX_BYTES;

    let compute = ComputePass {
        shader: ShaderId::LineExpandCompute,
        bind_groups: vec![
            standard_bindings0(frame, object, UniformData::from_pod(&uniforms)),
            vec![
                (0, storage_binding(&geometry.positions, true)?),
                (
                    1,
                    BindingResource::Scratch {
                        key: scratch_key,
                        size: scratch_size,
                        read_only: false,
                    },
                ),
            ],
        ],
        // One invocation per input vertex
        workgroups: [n, 1, 1],
    };

    let draw = DrawPass {
        vertex_shader: ShaderId::LineVertex,
        fragment_shader: ShaderId::LineFragment,
        topology: PrimitiveTopology::TriangleStrip,
        vertex_count: 2 * n,
        instance_count: 1,
        // Strip vertices come from the scratch buffer, not vertex attributes
        vertex_buffers: Vec::new(),
        index_buffer: None,
        bind_groups: vec![
            standard_bindings0(frame, object, UniformData::from_pod(&uniforms)),
            vec![(
                0,
                BindingResource::Scratch {
                    key: scratch_key,
                    size: scratch_size,
                    read_only: true,
                },
            )],
        ],
    };

    Ok(vec![PassDescriptor::Compute(compute), PassDescriptor::Draw(draw)])
}
