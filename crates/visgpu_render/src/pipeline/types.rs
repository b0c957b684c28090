//! Pass descriptors and GPU-layout uniform blocks
//!
//! A [`PassDescriptor`] is the compiled output of a render function: a
//! backend-agnostic description of one compute or draw operation. Descriptors
//! are immutable once produced and reference resources by handle; uniform
//! state is snapshotted into the descriptor so repeated compilation of
//! unchanged inputs yields interchangeable descriptors.
//!
//! Uniform structs match the shader layouts exactly and derive Pod/Zeroable,
//! so they can be byte-cast for upload.

use bytemuck::{Pod, Zeroable};

use visgpu_core::{
    Buffer, BufferHandle, BufferUsages, ResourceError, TextureViewHandle, WorldObject,
};
use visgpu_math::Mat4;

use crate::frame::FrameState;

/// Draw-pass primitive topology
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveTopology {
    PointList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

/// Opaque shader-stage reference, resolved by the GPU collaborator
///
/// Variant selection is a total function of material kind, map presence, and
/// map pixel-format family; compilers never leave it ambiguous.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderId {
    MeshVertex,
    /// Flat material color, no map
    MeshFragmentFlat,
    /// Samples a grayscale map and applies contrast limits
    MeshFragmentGray,
    /// Samples an rgba map directly
    MeshFragmentRgba,
    PointsVertex,
    /// Circular antialiased disc markers
    PointsFragmentDisc,
    /// Gaussian falloff markers
    PointsFragmentGaussian,
    /// Expands N line vertices into 2N strip vertices
    LineExpandCompute,
    LineVertex,
    LineFragment,
    /// Runs the box-plane contour walk per vertex invocation
    VolumeSliceVertex,
    /// Samples an integer 3D texture
    VolumeSliceFragmentInt,
    /// Samples a float 3D texture
    VolumeSliceFragmentFloat,
}

/// A uniform block snapshot, byte-cast from a Pod struct
#[derive(Clone, Debug, PartialEq)]
pub struct UniformData(Vec<u8>);

impl UniformData {
    /// Snapshot a Pod uniform struct
    pub fn from_pod<T: Pod>(value: &T) -> Self {
        Self(bytemuck::bytes_of(value).to_vec())
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One resource bound at a (group, binding) slot
#[derive(Clone, Debug)]
pub enum BindingResource {
    /// An immutable uniform snapshot owned by the descriptor
    Uniform(UniformData),
    /// A storage binding over a driver-owned buffer
    Storage {
        buffer: BufferHandle,
        read_only: bool,
    },
    /// A transient storage buffer the GPU collaborator allocates
    ///
    /// Used for compute-pass outputs consumed by a later pass in the same
    /// descriptor list. The key is stable per object, so the collaborator
    /// can reuse the allocation across frames.
    Scratch {
        key: u64,
        size: u64,
        read_only: bool,
    },
    /// The sampler of a texture view
    Sampler(TextureViewHandle),
    /// The sampled texture of a texture view
    SampledTexture(TextureViewHandle),
}

/// An ordered set of bindings, indexed within one bind group
pub type BindGroup = Vec<(u32, BindingResource)>;

/// A compiled compute pass
#[derive(Clone, Debug)]
pub struct ComputePass {
    pub shader: ShaderId,
    /// Bind groups in group-index order
    pub bind_groups: Vec<BindGroup>,
    /// Workgroup dispatch dimensions
    pub workgroups: [u32; 3],
}

/// A compiled draw pass
#[derive(Clone, Debug)]
pub struct DrawPass {
    pub vertex_shader: ShaderId,
    pub fragment_shader: ShaderId,
    pub topology: PrimitiveTopology,
    pub vertex_count: u32,
    pub instance_count: u32,
    /// Vertex attribute buffers in shader-location order
    pub vertex_buffers: Vec<BufferHandle>,
    pub index_buffer: Option<BufferHandle>,
    /// Bind groups in group-index order
    pub bind_groups: Vec<BindGroup>,
}

/// Kind tag of a pass descriptor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassKind {
    Compute,
    Draw,
}

/// The compiled output of a render function
///
/// Ordering within a returned list is significant: a compute pass listed
/// before a draw pass produces data that draw pass consumes, and the GPU
/// collaborator must execute them in order.
#[derive(Clone, Debug)]
pub enum PassDescriptor {
    Compute(ComputePass),
    Draw(DrawPass),
}

impl PassDescriptor {
    #[inline]
    pub fn kind(&self) -> PassKind {
        match self {
            PassDescriptor::Compute(_) => PassKind::Compute,
            PassDescriptor::Draw(_) => PassKind::Draw,
        }
    }

    /// The pass's bind groups, regardless of kind
    pub fn bind_groups(&self) -> &[BindGroup] {
        match self {
            PassDescriptor::Compute(p) => &p.bind_groups,
            PassDescriptor::Draw(p) => &p.bind_groups,
        }
    }
}

// --- Uniform block layouts ---

/// Per-object uniforms: world transform plus the pick id
///
/// Fragment shaders emit a pick output of (object id, 0, vertex index, 0)
/// for GPU-side object picking.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub world_transform: Mat4,
    pub id: u32,
    pub _padding: [u32; 3],
}

impl ObjectUniforms {
    pub fn new(object: &WorldObject) -> Self {
        Self {
            world_transform: object.world_transform,
            id: object.id(),
            _padding: [0; 3],
        }
    }
}

/// Uniforms of the basic mesh material
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MeshUniforms {
    pub color: [f32; 4],
    pub clim: [f32; 2],
    pub _padding: [f32; 2],
}

/// Uniforms of both point materials
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointsUniforms {
    pub color: [f32; 4],
    pub size: f32,
    pub _padding: [f32; 3],
}

/// Uniforms of the line-strip material
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineUniforms {
    pub color: [f32; 4],
    pub thickness: f32,
    pub _padding: [f32; 3],
}

/// Uniforms of the volume-slice material
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct VolumeSliceUniforms {
    /// Slicing plane coefficients (a, b, c, d)
    pub plane: [f32; 4],
    pub clim: [f32; 2],
    pub _padding: [f32; 2],
}

// --- Binding helpers shared by the compilers ---

/// Bind group 0: frame state, object transform, material uniform block
///
/// Every pipeline uses this convention, so shaders can share the layout.
pub fn standard_bindings0(
    frame: &FrameState,
    object: &WorldObject,
    material_uniforms: UniformData,
) -> BindGroup {
    vec![
        (0, BindingResource::Uniform(UniformData::from_pod(&frame.uniforms()))),
        (1, BindingResource::Uniform(UniformData::from_pod(&ObjectUniforms::new(object)))),
        (2, BindingResource::Uniform(material_uniforms)),
    ]
}

/// A read-only or read-write storage binding, validated against buffer usage
pub fn storage_binding(buffer: &Buffer, read_only: bool) -> Result<BindingResource, ResourceError> {
    if !buffer.usage().contains(BufferUsages::STORAGE) {
        return Err(ResourceError::UsageMismatch { expected: "storage" });
    }
    Ok(BindingResource::Storage {
        buffer: buffer.handle(),
        read_only,
    })
}

/// A vertex-buffer handle, validated against buffer usage
pub fn vertex_buffer(buffer: &Buffer) -> Result<BufferHandle, ResourceError> {
    if !buffer.usage().contains(BufferUsages::VERTEX) {
        return Err(ResourceError::UsageMismatch { expected: "vertex" });
    }
    Ok(buffer.handle())
}

/// An index-buffer handle, validated against buffer usage
pub fn index_buffer(buffer: &Buffer) -> Result<BufferHandle, ResourceError> {
    if !buffer.usage().contains(BufferUsages::INDEX) {
        return Err(ResourceError::UsageMismatch { expected: "index" });
    }
    Ok(buffer.handle())
}
