//! Scene-to-GPU pass compilation for visgpu
//!
//! This crate turns a scene of world objects into ordered lists of
//! backend-agnostic pass descriptors:
//!
//! - [`camera`] - orthographic and perspective projection with the 0..1
//!   depth remap
//! - [`frame`] - the per-frame state shared by every pass
//! - [`pipeline`] - descriptor types, the render-function registry, and the
//!   per-kind compilers (mesh, points, line, volume slice)
//! - [`device`] - the contract an external GPU backend implements
//!
//! Compilation is pure: it reads the scene and frame state, allocates
//! nothing on any device, and produces descriptors that reference resources
//! by handle. The driver owns the frame loop; a typical frame updates the
//! scene, recomputes world transforms, builds a [`FrameState`], compiles
//! with a [`RenderRegistry`], and hands the descriptor list to a
//! [`GpuDevice`].

pub mod camera;
pub mod device;
pub mod error;
pub mod frame;
pub mod pipeline;

pub use camera::{Camera, OrthographicCamera, PerspectiveCamera};
pub use device::{DeviceResult, GpuDevice, PipelineHandle};
pub use error::{CompileError, ConfigurationError};
pub use frame::{FrameState, FrameUniforms};
pub use pipeline::{PassDescriptor, PassKind, RenderRegistry};
