//! Materials: a kind tag plus kind-specific uniform fields
//!
//! Each material kind corresponds to one entry per object kind in the
//! render-function registry. The `map`, when present, is always a
//! [`TextureView`]: a bare texture carries no sampling parameters, so the
//! type system rules it out at the binding site.

use serde::{Serialize, Deserialize};
use visgpu_math::{Plane, Vec3};

use crate::TextureView;

/// Closed enumeration of material kinds, one per registered pipeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialKind {
    Basic,
    Points,
    GaussianPoints,
    LineStrip,
    VolumeSlice,
}

/// Flat color or textured surface material
#[derive(Clone, Debug)]
pub struct BasicMaterial {
    /// RGBA color used when no map is set
    pub color: [f32; 4],
    /// Contrast limits applied to sampled values
    pub clim: [f32; 2],
    /// Optional texture to sample; requires texcoords on the geometry
    pub map: Option<TextureView>,
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            clim: [0.0, 1.0],
            map: None,
        }
    }
}

/// Round antialiased point markers
#[derive(Clone, Debug)]
pub struct PointsMaterial {
    pub color: [f32; 4],
    /// Marker size in logical pixels
    pub size: f32,
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            size: 4.0,
        }
    }
}

/// Point markers with a Gaussian intensity falloff
#[derive(Clone, Debug)]
pub struct GaussianPointsMaterial {
    pub color: [f32; 4],
    /// Marker size in logical pixels
    pub size: f32,
}

impl Default for GaussianPointsMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            size: 4.0,
        }
    }
}

/// Line rendered as a strip of screen-facing triangles
#[derive(Clone, Debug)]
pub struct LineStripMaterial {
    pub color: [f32; 4],
    /// Strip thickness; the expansion pass offsets each vertex by half of it
    pub thickness: f32,
}

impl Default for LineStripMaterial {
    fn default() -> Self {
        Self {
            color: [1.0, 0.0, 0.0, 1.0],
            thickness: 10.0,
        }
    }
}

/// A 2D slice through a 3D volume
#[derive(Clone, Debug)]
pub struct VolumeSliceMaterial {
    /// Contrast limits applied to sampled values
    pub clim: [f32; 2],
    /// Slicing plane `ax + by + cz + d = 0` in object space
    pub plane: Plane,
    /// 3D texture view holding the volume data
    pub map: Option<TextureView>,
}

impl Default for VolumeSliceMaterial {
    fn default() -> Self {
        Self {
            clim: [0.0, 1.0],
            plane: Plane::from_normal_and_distance(Vec3::Z, 0.0),
            map: None,
        }
    }
}

/// A material of any kind
#[derive(Clone, Debug)]
pub enum Material {
    Basic(BasicMaterial),
    Points(PointsMaterial),
    GaussianPoints(GaussianPointsMaterial),
    LineStrip(LineStripMaterial),
    VolumeSlice(VolumeSliceMaterial),
}

impl Material {
    /// The kind tag used for registry lookup
    pub fn kind(&self) -> MaterialKind {
        match self {
            Material::Basic(_) => MaterialKind::Basic,
            Material::Points(_) => MaterialKind::Points,
            Material::GaussianPoints(_) => MaterialKind::GaussianPoints,
            Material::LineStrip(_) => MaterialKind::LineStrip,
            Material::VolumeSlice(_) => MaterialKind::VolumeSlice,
        }
    }

    /// The texture view bound by this material, if any
    pub fn map(&self) -> Option<&TextureView> {
        match self {
            Material::Basic(m) => m.map.as_ref(),
            Material::VolumeSlice(m) => m.map.as_ref(),
            _ => None,
        }
    }
}

impl From<BasicMaterial> for Material {
    fn from(m: BasicMaterial) -> Self {
        Material::Basic(m)
    }
}

impl From<PointsMaterial> for Material {
    fn from(m: PointsMaterial) -> Self {
        Material::Points(m)
    }
}

impl From<GaussianPointsMaterial> for Material {
    fn from(m: GaussianPointsMaterial) -> Self {
        Material::GaussianPoints(m)
    }
}

impl From<LineStripMaterial> for Material {
    fn from(m: LineStripMaterial) -> Self {
        Material::LineStrip(m)
    }
}

impl From<VolumeSliceMaterial> for Material {
    fn from(m: VolumeSliceMaterial) -> Self {
        Material::VolumeSlice(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_kind() {
        let m: Material = BasicMaterial::default().into();
        assert_eq!(m.kind(), MaterialKind::Basic);

        let m: Material = GaussianPointsMaterial::default().into();
        assert_eq!(m.kind(), MaterialKind::GaussianPoints);
    }

    #[test]
    fn test_material_map_accessor() {
        let m: Material = PointsMaterial::default().into();
        assert!(m.map().is_none());

        let m: Material = BasicMaterial::default().into();
        assert!(m.map().is_none());
    }

    #[test]
    fn test_default_clim() {
        let m = BasicMaterial::default();
        assert_eq!(m.clim, [0.0, 1.0]);
    }

    #[test]
    fn test_default_slice_plane() {
        // z = 0 through the volume center
        let m = VolumeSliceMaterial::default();
        assert_eq!(m.plane, Plane::new(0.0, 0.0, 1.0, 0.0));
    }
}
