//! GPU backend collaborator contract
//!
//! Pass compilation never touches a device. An external backend implements
//! [`GpuDevice`] to realize descriptors: it resolves buffer and texture
//! handles to device allocations (uploading their dirty ranges), builds
//! pipeline state objects, and executes descriptor lists in order. The trait
//! is object-safe so the driver can hold a `Box<dyn GpuDevice>`.

use visgpu_core::{Buffer, Texture};

use crate::pipeline::PassDescriptor;

/// Backend identifier of a created pipeline state object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipelineHandle(pub u64);

/// Result of a backend operation; error types are the backend's own
pub type DeviceResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Capability surface the render layer requires of a GPU backend
pub trait GpuDevice {
    /// Ensure a device-side allocation exists for the buffer and upload its
    /// dirty range, clearing it
    fn create_buffer(&mut self, buffer: &mut Buffer) -> DeviceResult<()>;

    /// Ensure a device-side texture exists and upload its dirty region,
    /// clearing it
    fn create_texture(&mut self, texture: &mut Texture) -> DeviceResult<()>;

    /// Build (or fetch a cached) pipeline state object for a descriptor
    fn create_pipeline(&mut self, pass: &PassDescriptor) -> DeviceResult<PipelineHandle>;

    /// Execute a descriptor list in order
    ///
    /// Order is part of the contract: compute passes listed before a draw
    /// feed that draw within the same submission.
    fn submit(&mut self, passes: &[PassDescriptor]) -> DeviceResult<()>;
}
