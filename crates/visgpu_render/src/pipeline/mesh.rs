//! Mesh pipeline: indexed triangles with a flat or textured basic material

use visgpu_core::{FormatFamily, Material, TextureDimension, WorldObject};

use crate::error::CompileError;
use crate::frame::FrameState;
use crate::pipeline::types::{
    index_buffer, standard_bindings0, vertex_buffer, BindingResource, DrawPass, PassDescriptor,
    PrimitiveTopology, ShaderId, MeshUniforms, UniformData,
};

/// Compile a mesh object with a basic material into one draw pass
///
/// Without a map the fragment stage paints the material color. With a map
/// the geometry must carry texcoords, the map must be a 2D view, and the
/// fragment variant follows the map's channel family: single-channel maps
/// go through the contrast limits, rgba maps are sampled directly.
pub fn compile_mesh(
    object: &WorldObject,
    frame: &FrameState,
) -> Result<Vec<PassDescriptor>, CompileError> {
    let kind = object.kind();
    let geometry = object
        .geometry()
        .ok_or(CompileError::NotRenderable { object: kind })?;
    let material = match object.material().map(|m| m.as_ref()) {
        Some(Material::Basic(m)) => m,
        _ => return Err(CompileError::NotRenderable { object: kind }),
    };

    let uniforms = MeshUniforms {
        color: material.color,
        clim: material.clim,
        _padding: [0.0; 2],
    };

    let mut vertex_buffers = vec![vertex_buffer(&geometry.positions)?];
    let mut bind_groups = vec![standard_bindings0(
        frame,
        object,
        UniformData::from_pod(&uniforms),
    )];

    let fragment_shader = match &material.map {
        None => ShaderId::MeshFragmentFlat,
        Some(view) => {
            let texcoords = geometry
                .texcoords
                .as_ref()
                .ok_or(CompileError::MissingTexcoords)?;
            if view.dimension() != TextureDimension::D2 {
                return Err(CompileError::MapDimensionMismatch { expected: "2D" });
            }
            vertex_buffers.push(vertex_buffer(texcoords)?);
            bind_groups.push(vec![
                (0, BindingResource::Sampler(view.handle())),
                (1, BindingResource::SampledTexture(view.handle())),
            ]);
            match view.format().family() {
                FormatFamily::Gray => ShaderId::MeshFragmentGray,
                FormatFamily::Rgba => ShaderId::MeshFragmentRgba,
            }
        }
    };

    // Indexed geometry draws one vertex per index entry
    let (index, vertex_count) = match &geometry.index {
        Some(index) => (Some(index_buffer(index)?), index.nitems() as u32),
        None => (None, geometry.vertex_count() as u32),
    };

    Ok(vec![PassDescriptor::Draw(DrawPass {
        vertex_shader: ShaderId::MeshVertex,
        fragment_shader,
        topology: PrimitiveTopology::TriangleList,
        vertex_count,
        instance_count: 1,
        vertex_buffers,
        index_buffer: index,
        bind_groups,
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, OrthographicCamera};
    use std::sync::Arc;
    use visgpu_core::{
        BasicMaterial, FilterMode, Geometry, ObjectKind, PixelFormat, Texture, TextureUsages,
        TextureView,
    };
    use visgpu_math::mat4;

    fn frame() -> FrameState {
        let camera = OrthographicCamera::new(2.0, 2.0, -10.0, 10.0).unwrap();
        FrameState::new(camera.projection_matrix(), mat4::IDENTITY, [100.0, 100.0], [100.0, 100.0])
    }

    fn map_2d(format: PixelFormat) -> TextureView {
        let tex = Texture::new(
            visgpu_core::TextureDimension::D2,
            format,
            [16, 16, 1],
            TextureUsages::SAMPLED,
        )
        .unwrap();
        TextureView::new(Arc::new(tex), FilterMode::Linear)
    }

    fn mesh(material: BasicMaterial) -> WorldObject {
        WorldObject::new(
            ObjectKind::Mesh,
            Arc::new(Geometry::plane(2.0, 2.0)),
            Arc::new(Material::from(material)),
        )
    }

    #[test]
    fn test_flat_mesh() {
        let passes = compile_mesh(&mesh(BasicMaterial::default()), &frame()).unwrap();
        assert_eq!(passes.len(), 1);
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.fragment_shader, ShaderId::MeshFragmentFlat);
        assert_eq!(pass.topology, PrimitiveTopology::TriangleList);
        // Two triangles from the plane's index buffer
        assert_eq!(pass.vertex_count, 6);
        assert!(pass.index_buffer.is_some());
        assert_eq!(pass.vertex_buffers.len(), 1);
        assert_eq!(pass.bind_groups.len(), 1);
    }

    #[test]
    fn test_gray_map_selects_gray_fragment() {
        let material = BasicMaterial {
            map: Some(map_2d(PixelFormat::R32Float)),
            ..BasicMaterial::default()
        };
        let passes = compile_mesh(&mesh(material), &frame()).unwrap();
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.fragment_shader, ShaderId::MeshFragmentGray);
        // Texcoords join the vertex buffers, sampler and texture get bound
        assert_eq!(pass.vertex_buffers.len(), 2);
        assert_eq!(pass.bind_groups.len(), 2);
        assert_eq!(pass.bind_groups[1].len(), 2);
    }

    #[test]
    fn test_rgba_map_selects_rgba_fragment() {
        let material = BasicMaterial {
            map: Some(map_2d(PixelFormat::Rgba8Unorm)),
            ..BasicMaterial::default()
        };
        let passes = compile_mesh(&mesh(material), &frame()).unwrap();
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.fragment_shader, ShaderId::MeshFragmentRgba);
    }

    #[test]
    fn test_map_without_texcoords_fails() {
        let geometry = Arc::new(Geometry::new(&[visgpu_math::Vec4::new(0.0, 0.0, 0.0, 1.0); 3]));
        let material = BasicMaterial {
            map: Some(map_2d(PixelFormat::R8Uint)),
            ..BasicMaterial::default()
        };
        let object =
            WorldObject::new(ObjectKind::Mesh, geometry, Arc::new(Material::from(material)));
        assert!(matches!(
            compile_mesh(&object, &frame()),
            Err(CompileError::MissingTexcoords)
        ));
    }

    #[test]
    fn test_3d_map_fails() {
        let tex = Texture::new(
            visgpu_core::TextureDimension::D3,
            PixelFormat::R32Float,
            [8, 8, 8],
            TextureUsages::SAMPLED,
        )
        .unwrap();
        let material = BasicMaterial {
            map: Some(TextureView::new(Arc::new(tex), FilterMode::Nearest)),
            ..BasicMaterial::default()
        };
        assert!(matches!(
            compile_mesh(&mesh(material), &frame()),
            Err(CompileError::MapDimensionMismatch { expected: "2D" })
        ));
    }

    #[test]
    fn test_unindexed_mesh_draws_all_vertices() {
        let geometry = Arc::new(Geometry::new(&[visgpu_math::Vec4::new(0.0, 0.0, 0.0, 1.0); 9]));
        let object = WorldObject::new(
            ObjectKind::Mesh,
            geometry,
            Arc::new(Material::from(BasicMaterial::default())),
        );
        let passes = compile_mesh(&object, &frame()).unwrap();
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.vertex_count, 9);
        assert!(pass.index_buffer.is_none());
    }

    #[test]
    fn test_frame_uniforms_snapshotted() {
        let mut camera = OrthographicCamera::new(2.0, 2.0, -10.0, 10.0).unwrap();
        let frame_a =
            FrameState::new(camera.projection_matrix(), mat4::IDENTITY, [1.0, 1.0], [1.0, 1.0]);
        let passes = compile_mesh(&mesh(BasicMaterial::default()), &frame_a).unwrap();

        // Later camera changes do not affect the captured descriptor
        camera.zoom = 3.0;
        camera.update_projection_matrix();

        let (_, BindingResource::Uniform(data)) = &passes[0].bind_groups()[0][0] else {
            panic!("expected a uniform binding");
        };
        let captured: &crate::frame::FrameUniforms = bytemuck::from_bytes(data.bytes());
        assert_eq!(captured.projection_transform, frame_a.projection_transform);
    }
}
