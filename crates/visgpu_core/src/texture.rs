//! Texture descriptors and sampling views
//!
//! A [`Texture`] describes GPU-resident pixel data: dimensionality, format,
//! and size. The raw texels come from the asset collaborator and are uploaded
//! by the GPU collaborator; the core only tracks what needs uploading.
//!
//! A [`TextureView`] is a non-owning view that adds sampling configuration.
//! Materials always reference views, never bare textures, so sampling
//! parameters are known wherever a texture is bound.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use bitflags::bitflags;
use serde::{Serialize, Deserialize};

use crate::ResourceError;

/// Texture dimensionality
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureDimension {
    D1,
    D2,
    D3,
}

/// Pixel formats supported by the pipeline compilers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    R8Uint,
    R16Uint,
    R32Float,
    Rgba8Unorm,
    Rgba32Float,
}

/// Channel layout family of a pixel format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatFamily {
    /// Single-channel; shaders replicate the value across rgb
    Gray,
    /// Four-channel color
    Rgba,
}

/// How a shader reads samples of a format
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleKind {
    /// Sampled as integers (uint/sint texel types)
    Int,
    /// Sampled as floats (float and normalized texel types)
    Float,
}

impl PixelFormat {
    /// The channel family, used for fragment-shader variant selection
    pub fn family(&self) -> FormatFamily {
        match self {
            PixelFormat::R8Uint | PixelFormat::R16Uint | PixelFormat::R32Float => {
                FormatFamily::Gray
            }
            PixelFormat::Rgba8Unorm | PixelFormat::Rgba32Float => FormatFamily::Rgba,
        }
    }

    /// Whether samples arrive in the shader as integers or floats
    pub fn sample_kind(&self) -> SampleKind {
        match self {
            PixelFormat::R8Uint | PixelFormat::R16Uint => SampleKind::Int,
            // Normalized formats are read as floats, like the float formats
            PixelFormat::R32Float | PixelFormat::Rgba8Unorm | PixelFormat::Rgba32Float => {
                SampleKind::Float
            }
        }
    }
}

/// Sampler filter mode of a texture view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    #[default]
    Nearest,
    Linear,
}

bitflags! {
    /// How a texture may be used
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TextureUsages: u8 {
        /// Bindable as a sampled texture
        const SAMPLED = 1 << 0;
        /// Target of upload copies
        const COPY_DST = 1 << 1;
        /// Usable as a render attachment
        const RENDER_ATTACHMENT = 1 << 2;
    }
}

/// Process-unique identifier of a texture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Process-unique identifier of a texture view
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureViewHandle(pub u64);

static NEXT_TEXTURE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Descriptor of GPU-resident pixel data
#[derive(Debug)]
pub struct Texture {
    handle: TextureHandle,
    dim: TextureDimension,
    format: PixelFormat,
    size: [u32; 3],
    usage: TextureUsages,
    /// Dirty texel region as (origin, size); cleared by whoever uploads
    dirty: Option<([u32; 3], [u32; 3])>,
}

impl Texture {
    /// Create a texture descriptor
    ///
    /// The size must match the dimensionality: a 1D texture has height and
    /// depth 1, a 2D texture has depth 1, and no extent may be zero.
    pub fn new(
        dim: TextureDimension,
        format: PixelFormat,
        size: [u32; 3],
        usage: TextureUsages,
    ) -> Result<Self, ResourceError> {
        let valid = match dim {
            TextureDimension::D1 => size[1] == 1 && size[2] == 1,
            TextureDimension::D2 => size[2] == 1,
            TextureDimension::D3 => true,
        };
        if !valid || size.contains(&0) {
            return Err(ResourceError::SizeMismatch {
                detail: format!("{:?} texture cannot have size {:?}", dim, size),
            });
        }
        Ok(Self {
            handle: TextureHandle(NEXT_TEXTURE_ID.fetch_add(1, Ordering::Relaxed)),
            dim,
            format,
            size,
            usage,
            // Everything needs uploading initially
            dirty: Some(([0, 0, 0], size)),
        })
    }

    #[inline]
    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    #[inline]
    pub fn dimension(&self) -> TextureDimension {
        self.dim
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn size(&self) -> [u32; 3] {
        self.size
    }

    #[inline]
    pub fn usage(&self) -> TextureUsages {
        self.usage
    }

    /// Mark a texel region as needing upload, merging with any pending region
    pub fn update_range(&mut self, origin: [u32; 3], size: [u32; 3]) {
        self.dirty = match self.dirty {
            None => Some((origin, size)),
            Some((o, s)) => {
                let mut merged_origin = [0u32; 3];
                let mut merged_size = [0u32; 3];
                for i in 0..3 {
                    let start = o[i].min(origin[i]);
                    let end = (o[i] + s[i]).max(origin[i] + size[i]);
                    merged_origin[i] = start;
                    merged_size[i] = end - start;
                }
                Some((merged_origin, merged_size))
            }
        };
    }

    /// The pending dirty region, if any
    #[inline]
    pub fn dirty_region(&self) -> Option<([u32; 3], [u32; 3])> {
        self.dirty
    }

    /// Take and clear the dirty region; called by the upload step
    pub fn take_dirty_region(&mut self) -> Option<([u32; 3], [u32; 3])> {
        self.dirty.take()
    }
}

/// A non-owning view of a texture with its own sampling configuration
///
/// A texture may have multiple views (e.g. nearest and linear filtered).
#[derive(Clone, Debug)]
pub struct TextureView {
    handle: TextureViewHandle,
    texture: Arc<Texture>,
    filter: FilterMode,
}

impl TextureView {
    /// Create a view over a shared texture
    pub fn new(texture: Arc<Texture>, filter: FilterMode) -> Self {
        Self {
            handle: TextureViewHandle(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed)),
            texture,
            filter,
        }
    }

    #[inline]
    pub fn handle(&self) -> TextureViewHandle {
        self.handle
    }

    #[inline]
    pub fn texture(&self) -> &Arc<Texture> {
        &self.texture
    }

    #[inline]
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Dimensionality of the underlying texture
    #[inline]
    pub fn dimension(&self) -> TextureDimension {
        self.texture.dimension()
    }

    /// Format of the underlying texture
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.texture.format()
    }
}
