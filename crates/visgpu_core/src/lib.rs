//! Core types for the visgpu render compiler
//!
//! This crate provides the data the pipeline compilers read:
//!
//! - [`Buffer`] - GPU-bound element data with dirty-range tracking
//! - [`Texture`] / [`TextureView`] - texture descriptors and sampling views
//! - [`Geometry`] - vertex attributes of a drawable object
//! - [`Material`] - kind tag plus kind-specific uniform fields
//! - [`WorldObject`] - a scene node pairing geometry, material, and transform
//! - [`Scene`] - arena of world objects with parent/child links
//!
//! Compilation never mutates any of these; the driver updates them between
//! frames and uploads dirty ranges before submitting compiled passes.

mod buffer;
mod texture;
mod geometry;
mod material;
mod object;
mod scene;
mod error;

pub use buffer::{Buffer, BufferHandle, BufferUsages};
pub use texture::{
    FilterMode, FormatFamily, PixelFormat, SampleKind, Texture, TextureDimension,
    TextureHandle, TextureUsages, TextureView, TextureViewHandle,
};
pub use geometry::{Geometry, BOX_CORNERS};
pub use material::{
    BasicMaterial, GaussianPointsMaterial, LineStripMaterial, Material, MaterialKind,
    PointsMaterial, VolumeSliceMaterial,
};
pub use object::{ObjectKind, WorldObject};
pub use scene::{NodeKey, Scene, SceneError};
pub use error::ResourceError;

// Re-export commonly used math types for convenience
pub use visgpu_math::{Mat4, Plane, Vec3, Vec4};
