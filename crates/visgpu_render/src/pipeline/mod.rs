//! Pass compilation pipelines
//!
//! One submodule per object/material family, a registry dispatching between
//! them, and the shared descriptor types they produce.

pub mod contour;
pub mod line;
pub mod mesh;
pub mod points;
pub mod registry;
pub mod types;
pub mod volume;

pub use contour::{extract_contour, BOX_EDGES, EDGE_FACES, FAN_INDICES};
pub use registry::{RenderFunction, RenderRegistry};
pub use types::{
    BindGroup, BindingResource, ComputePass, DrawPass, LineUniforms, MeshUniforms, ObjectUniforms,
    PassDescriptor, PassKind, PointsUniforms, PrimitiveTopology, ShaderId, UniformData,
    VolumeSliceUniforms,
};
