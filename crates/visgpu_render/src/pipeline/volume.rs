//! Volume-slice pipeline: a plane cut through a 3D texture
//!
//! The draw is always 12 vertex invocations forming a triangle fan over the
//! box-plane contour (see [`contour`](super::contour)). The vertex shader
//! reads the box corners and texcoords as storage, runs the contour walk,
//! and indexes the result through the fan table; the fragment stage samples
//! the 3D map at the interpolated volume coordinate and applies the
//! contrast limits.

use visgpu_core::{Material, SampleKind, TextureDimension, WorldObject};

use crate::error::CompileError;
use crate::frame::FrameState;
use crate::pipeline::contour::FAN_INDICES;
use crate::pipeline::types::{
    standard_bindings0, storage_binding, BindingResource, DrawPass, PassDescriptor,
    PrimitiveTopology, ShaderId, UniformData, VolumeSliceUniforms,
};

/// Compile a volume object with a slice material into one draw pass
pub fn compile_volume_slice(
    object: &WorldObject,
    frame: &FrameState,
) -> Result<Vec<PassDescriptor>, CompileError> {
    let kind = object.kind();
    let geometry = object
        .geometry()
        .ok_or(CompileError::NotRenderable { object: kind })?;
    let material = match object.material().map(|m| m.as_ref()) {
        Some(Material::VolumeSlice(m)) => m,
        _ => return Err(CompileError::NotRenderable { object: kind }),
    };

    // A slice without volume data has nothing to show
    let map = material
        .map
        .as_ref()
        .ok_or(CompileError::NotRenderable { object: kind })?;
    if map.dimension() != TextureDimension::D3 {
        return Err(CompileError::MapDimensionMismatch { expected: "3D" });
    }
    let texcoords = geometry
        .texcoords
        .as_ref()
        .ok_or(CompileError::MissingTexcoords)?;

    let fragment_shader = match map.format().sample_kind() {
        SampleKind::Int => ShaderId::VolumeSliceFragmentInt,
        SampleKind::Float => ShaderId::VolumeSliceFragmentFloat,
    };

    // Unit-length normal, so shader-side plane distances are in object units
    let uniforms = VolumeSliceUniforms {
        plane: material.plane.normalized().to_array(),
        clim: material.clim,
        _padding: [0.0; 2],
    };

    Ok(vec![PassDescriptor::Draw(DrawPass {
        vertex_shader: ShaderId::VolumeSliceVertex,
        fragment_shader,
        topology: PrimitiveTopology::TriangleList,
        vertex_count: FAN_INDICES.len() as u32,
        instance_count: 1,
        // Corners and texcoords are read as storage inside the vertex stage
        vertex_buffers: Vec::new(),
        index_buffer: None,
        bind_groups: vec![
            standard_bindings0(frame, object, UniformData::from_pod(&uniforms)),
            vec![
                (0, storage_binding(&geometry.positions, true)?),
                (1, storage_binding(texcoords, true)?),
                (2, BindingResource::Sampler(map.handle())),
                (3, BindingResource::SampledTexture(map.handle())),
            ],
        ],
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, OrthographicCamera};
    use std::sync::Arc;
    use visgpu_core::{
        FilterMode, Geometry, ObjectKind, PixelFormat, Texture, TextureUsages, TextureView,
        VolumeSliceMaterial,
    };
    use visgpu_math::{mat4, Plane};

    fn frame() -> FrameState {
        let camera = OrthographicCamera::new(2.0, 2.0, -10.0, 10.0).unwrap();
        FrameState::new(camera.projection_matrix(), mat4::IDENTITY, [100.0, 100.0], [100.0, 100.0])
    }

    fn volume_map(format: PixelFormat) -> TextureView {
        let tex = Texture::new(
            TextureDimension::D3,
            format,
            [32, 32, 16],
            TextureUsages::SAMPLED,
        )
        .unwrap();
        TextureView::new(Arc::new(tex), FilterMode::Linear)
    }

    fn volume(material: VolumeSliceMaterial) -> WorldObject {
        WorldObject::new(
            ObjectKind::Volume,
            Arc::new(Geometry::box_shape()),
            Arc::new(Material::from(material)),
        )
    }

    #[test]
    fn test_slice_draws_twelve_vertices() {
        let material = VolumeSliceMaterial {
            map: Some(volume_map(PixelFormat::R32Float)),
            ..VolumeSliceMaterial::default()
        };
        let passes = compile_volume_slice(&volume(material), &frame()).unwrap();
        assert_eq!(passes.len(), 1);
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.vertex_count, 12);
        assert_eq!(pass.topology, PrimitiveTopology::TriangleList);
        assert!(pass.vertex_buffers.is_empty());
        assert!(pass.index_buffer.is_none());
        // Corners, texcoords, sampler, texture
        assert_eq!(pass.bind_groups[1].len(), 4);
    }

    #[test]
    fn test_sample_kind_selects_fragment() {
        let material = VolumeSliceMaterial {
            map: Some(volume_map(PixelFormat::R16Uint)),
            ..VolumeSliceMaterial::default()
        };
        let passes = compile_volume_slice(&volume(material), &frame()).unwrap();
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.fragment_shader, ShaderId::VolumeSliceFragmentInt);

        let material = VolumeSliceMaterial {
            map: Some(volume_map(PixelFormat::R32Float)),
            ..VolumeSliceMaterial::default()
        };
        let passes = compile_volume_slice(&volume(material), &frame()).unwrap();
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.fragment_shader, ShaderId::VolumeSliceFragmentFloat);
    }

    #[test]
    fn test_2d_map_fails() {
        let tex = Texture::new(
            TextureDimension::D2,
            PixelFormat::R32Float,
            [32, 32, 1],
            TextureUsages::SAMPLED,
        )
        .unwrap();
        let material = VolumeSliceMaterial {
            map: Some(TextureView::new(Arc::new(tex), FilterMode::Nearest)),
            ..VolumeSliceMaterial::default()
        };
        assert!(matches!(
            compile_volume_slice(&volume(material), &frame()),
            Err(CompileError::MapDimensionMismatch { expected: "3D" })
        ));
    }

    #[test]
    fn test_missing_map_fails() {
        let material = VolumeSliceMaterial::default();
        assert!(matches!(
            compile_volume_slice(&volume(material), &frame()),
            Err(CompileError::NotRenderable { object: ObjectKind::Volume })
        ));
    }

    #[test]
    fn test_plane_lands_in_uniforms() {
        let material = VolumeSliceMaterial {
            plane: Plane::new(0.0, 1.0, 0.0, -0.25),
            map: Some(volume_map(PixelFormat::R8Uint)),
            ..VolumeSliceMaterial::default()
        };
        let passes = compile_volume_slice(&volume(material), &frame()).unwrap();
        let (_, BindingResource::Uniform(data)) = &passes[0].bind_groups()[0][2] else {
            panic!("expected the material uniform binding");
        };
        let uniforms: &VolumeSliceUniforms = bytemuck::from_bytes(data.bytes());
        assert_eq!(uniforms.plane, [0.0, 1.0, 0.0, -0.25]);
    }

    #[test]
    fn test_plane_normal_is_unit_length_in_uniforms() {
        let material = VolumeSliceMaterial {
            plane: Plane::new(0.0, 2.0, 0.0, -0.5),
            map: Some(volume_map(PixelFormat::R8Uint)),
            ..VolumeSliceMaterial::default()
        };
        let passes = compile_volume_slice(&volume(material), &frame()).unwrap();
        let (_, BindingResource::Uniform(data)) = &passes[0].bind_groups()[0][2] else {
            panic!("expected the material uniform binding");
        };
        let uniforms: &VolumeSliceUniforms = bytemuck::from_bytes(data.bytes());
        // Coefficients scale down together; the plane itself is unchanged
        assert_eq!(uniforms.plane, [0.0, 1.0, 0.0, -0.25]);
    }
}
