//! Errors raised while compiling pass descriptors

use visgpu_core::{MaterialKind, ObjectKind, ResourceError};

/// Camera parameters that can never produce a valid projection
///
/// Fatal at construction; a camera with `near >= far` is never usable.
#[derive(Debug)]
pub enum ConfigurationError {
    /// `near` must be strictly less than `far`
    InvalidDepthRange { near: f32, far: f32 },
    /// The camera world transform could not be inverted
    SingularCameraTransform,
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::InvalidDepthRange { near, far } => {
                write!(f, "invalid depth range: near ({}) must be < far ({})", near, far)
            }
            ConfigurationError::SingularCameraTransform => {
                write!(f, "camera world transform is not invertible")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// Error compiling an object/material combination into pass descriptors
///
/// Fatal at dispatch time: no partial descriptor is ever returned.
#[derive(Debug)]
pub enum CompileError {
    /// No render function registered for this combination
    NoRenderFunction {
        object: ObjectKind,
        material: MaterialKind,
    },
    /// The object has no geometry or no material to render with
    NotRenderable { object: ObjectKind },
    /// The material has a map but the geometry exposes no texcoords
    MissingTexcoords,
    /// The material map has the wrong dimensionality for this pipeline
    MapDimensionMismatch { expected: &'static str },
    /// A bound resource does not support the required usage
    Resource(ResourceError),
}

impl From<ResourceError> for CompileError {
    fn from(e: ResourceError) -> Self {
        CompileError::Resource(e)
    }
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::NoRenderFunction { object, material } => {
                write!(f, "no render function for {:?} with {:?} material", object, material)
            }
            CompileError::NotRenderable { object } => {
                write!(f, "{:?} object has no geometry/material to render", object)
            }
            CompileError::MissingTexcoords => {
                write!(f, "material map is present, but geometry has no texcoords")
            }
            CompileError::MapDimensionMismatch { expected } => {
                write!(f, "material map must be a {} texture view", expected)
            }
            CompileError::Resource(e) => write!(f, "resource error: {}", e),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Resource(e) => Some(e),
            _ => None,
        }
    }
}
