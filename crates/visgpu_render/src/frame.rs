//! Per-frame shared state
//!
//! The driver builds one [`FrameState`] per frame and passes it, read-only,
//! to every pass compiler. There is no process-wide frame global.

use bytemuck::{Pod, Zeroable};
use visgpu_math::{mat4, Mat4};

use crate::camera::Camera;
use crate::error::ConfigurationError;

/// Uniform bundle shared by every pass in a frame
#[derive(Clone, Copy, Debug)]
pub struct FrameState {
    /// Camera projection matrix, depth-remapped
    pub projection_transform: Mat4,
    /// World-to-view matrix: the inverse of the camera's world transform
    pub cam_transform: Mat4,
    /// Framebuffer size in physical pixels
    pub physical_size: [f32; 2],
    /// Window size in logical pixels
    pub logical_size: [f32; 2],
}

impl FrameState {
    /// Build a frame state from already-computed matrices
    pub fn new(
        projection_transform: Mat4,
        cam_transform: Mat4,
        physical_size: [f32; 2],
        logical_size: [f32; 2],
    ) -> Self {
        Self {
            projection_transform,
            cam_transform,
            physical_size,
            logical_size,
        }
    }

    /// Build a frame state from a camera and its world transform
    ///
    /// The view matrix is the inverse of the camera's world transform; a
    /// singular transform is a driver configuration error.
    pub fn from_camera<C: Camera + ?Sized>(
        camera: &C,
        camera_world_transform: Mat4,
        physical_size: [f32; 2],
        logical_size: [f32; 2],
    ) -> Result<Self, ConfigurationError> {
        let cam_transform = mat4::inverse(camera_world_transform)
            .ok_or(ConfigurationError::SingularCameraTransform)?;
        Ok(Self::new(
            camera.projection_matrix(),
            cam_transform,
            physical_size,
            logical_size,
        ))
    }

    /// The shader-layout uniform block for bind group 0, binding 0
    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            cam_transform: self.cam_transform,
            projection_transform: self.projection_transform,
            physical_size: self.physical_size,
            logical_size: self.logical_size,
        }
    }
}

/// GPU layout of the per-frame uniform block ("stdinfo")
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub cam_transform: Mat4,
    pub projection_transform: Mat4,
    pub physical_size: [f32; 2],
    pub logical_size: [f32; 2],
}
