//! Points pipeline: screen-space markers drawn as a point list
//!
//! The vertex stage scales the material's logical-pixel size by the frame's
//! physical/logical ratio and pads it by 1.5 physical pixels so antialiased
//! edges never clip against the point sprite. The two material kinds share
//! the vertex stage and differ only in the fragment falloff.

use visgpu_core::{Material, WorldObject};

use crate::error::CompileError;
use crate::frame::FrameState;
use crate::pipeline::types::{
    standard_bindings0, vertex_buffer, DrawPass, PassDescriptor, PointsUniforms,
    PrimitiveTopology, ShaderId, UniformData,
};

/// Compile a points object with the disc material
pub fn compile_points(
    object: &WorldObject,
    frame: &FrameState,
) -> Result<Vec<PassDescriptor>, CompileError> {
    let (color, size) = match object.material().map(|m| m.as_ref()) {
        Some(Material::Points(m)) => (m.color, m.size),
        _ => return Err(CompileError::NotRenderable { object: object.kind() }),
    };
    compile_markers(object, frame, color, size, ShaderId::PointsFragmentDisc)
}

/// Compile a points object with the Gaussian material
pub fn compile_gaussian_points(
    object: &WorldObject,
    frame: &FrameState,
) -> Result<Vec<PassDescriptor>, CompileError> {
    let (color, size) = match object.material().map(|m| m.as_ref()) {
        Some(Material::GaussianPoints(m)) => (m.color, m.size),
        _ => return Err(CompileError::NotRenderable { object: object.kind() }),
    };
    compile_markers(object, frame, color, size, ShaderId::PointsFragmentGaussian)
}

fn compile_markers(
    object: &WorldObject,
    frame: &FrameState,
    color: [f32; 4],
    size: f32,
    fragment_shader: ShaderId,
) -> Result<Vec<PassDescriptor>, CompileError> {
    let geometry = object
        .geometry()
        .ok_or(CompileError::NotRenderable { object: object.kind() })?;

    let uniforms = PointsUniforms {
        color,
        size,
        _padding: [0.0; 3],
    };

    Ok(vec![PassDescriptor::Draw(DrawPass {
        vertex_shader: ShaderId::PointsVertex,
        fragment_shader,
        topology: PrimitiveTopology::PointList,
        vertex_count: geometry.vertex_count() as u32,
        instance_count: 1,
        vertex_buffers: vec![vertex_buffer(&geometry.positions)?],
        index_buffer: None,
        bind_groups: vec![standard_bindings0(frame, object, UniformData::from_pod(&uniforms))],
    })])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, OrthographicCamera};
    use crate::pipeline::types::BindingResource;
    use std::sync::Arc;
    use visgpu_core::{GaussianPointsMaterial, Geometry, ObjectKind, PointsMaterial};
    use visgpu_math::{mat4, Vec4};

    fn frame() -> FrameState {
        let camera = OrthographicCamera::new(2.0, 2.0, -10.0, 10.0).unwrap();
        FrameState::new(camera.projection_matrix(), mat4::IDENTITY, [200.0, 200.0], [100.0, 100.0])
    }

    fn points_geometry(n: usize) -> Arc<Geometry> {
        Arc::new(Geometry::new(&vec![Vec4::new(0.0, 0.0, 0.0, 1.0); n]))
    }

    #[test]
    fn test_disc_points() {
        let object = WorldObject::new(
            ObjectKind::Points,
            points_geometry(5),
            Arc::new(Material::from(PointsMaterial::default())),
        );
        let passes = compile_points(&object, &frame()).unwrap();
        assert_eq!(passes.len(), 1);
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.topology, PrimitiveTopology::PointList);
        assert_eq!(pass.vertex_count, 5);
        assert_eq!(pass.fragment_shader, ShaderId::PointsFragmentDisc);
        assert_eq!(pass.vertex_buffers.len(), 1);
    }

    #[test]
    fn test_gaussian_points_share_vertex_stage() {
        let object = WorldObject::new(
            ObjectKind::Points,
            points_geometry(3),
            Arc::new(Material::from(GaussianPointsMaterial::default())),
        );
        let passes = compile_gaussian_points(&object, &frame()).unwrap();
        let PassDescriptor::Draw(pass) = &passes[0] else {
            panic!("expected a draw pass");
        };
        assert_eq!(pass.vertex_shader, ShaderId::PointsVertex);
        assert_eq!(pass.fragment_shader, ShaderId::PointsFragmentGaussian);
    }

    #[test]
    fn test_size_lands_in_uniforms() {
        let material = PointsMaterial {
            size: 12.0,
            ..PointsMaterial::default()
        };
        let object = WorldObject::new(
            ObjectKind::Points,
            points_geometry(1),
            Arc::new(Material::from(material)),
        );
        let passes = compile_points(&object, &frame()).unwrap();
        let (_, BindingResource::Uniform(data)) = &passes[0].bind_groups()[0][2] else {
            panic!("expected the material uniform binding");
        };
        let uniforms: &PointsUniforms = bytemuck::from_bytes(data.bytes());
        assert_eq!(uniforms.size, 12.0);
    }

    #[test]
    fn test_wrong_material_kind_fails() {
        let object = WorldObject::new(
            ObjectKind::Points,
            points_geometry(1),
            Arc::new(Material::from(PointsMaterial::default())),
        );
        // Dispatched to the Gaussian compiler by mistake
        assert!(matches!(
            compile_gaussian_points(&object, &frame()),
            Err(CompileError::NotRenderable { .. })
        ));
    }
}
