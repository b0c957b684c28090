//! Math types for the visgpu render compiler
//!
//! This crate provides the small linear-algebra layer used by the scene
//! graph, the cameras, and the pipeline compilers.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Vec4`] - 4D homogeneous vector
//! - [`Mat4`] - 4x4 column-major matrix with projection builders
//! - [`Plane`] - A plane `ax + by + cz + d = 0` used for volume slicing

mod vec3;
mod vec4;
pub mod mat4;
mod plane;

pub use vec3::Vec3;
pub use vec4::Vec4;
pub use mat4::Mat4;
pub use plane::Plane;
