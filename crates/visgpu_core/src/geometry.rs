//! Vertex attributes of a drawable object
//!
//! A geometry owns its attribute buffers. Buffers are mutated in place via
//! dirty-range writes; changing the vertex count requires a new geometry.

use visgpu_math::{Vec3, Vec4};

use crate::{Buffer, BufferUsages};

/// The 8 corner positions of the unit box, centered at the origin
///
/// The vertex order is fixed: the contour-extraction edge tables index into
/// this layout. Corners 0-3 are on the +x face, 4-7 on the -x face.
pub const BOX_CORNERS: [Vec3; 8] = [
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

/// Vertex attributes: positions plus optional texcoords, index, and colors
#[derive(Debug)]
pub struct Geometry {
    /// Vertex positions, N x Vec4 (required)
    pub positions: Buffer,
    /// Texture coordinates, 2D or 3D per vertex
    pub texcoords: Option<Buffer>,
    /// Triangle indices
    pub index: Option<Buffer>,
    /// Per-vertex RGBA colors
    pub colors: Option<Buffer>,
}

impl Geometry {
    /// Create a geometry from vertex positions
    ///
    /// Positions get both vertex and storage usage: mesh and points pipelines
    /// bind them as vertex attributes, the line and volume-slice pipelines as
    /// storage buffers.
    pub fn new(positions: &[Vec4]) -> Self {
        Self {
            positions: Buffer::from_slice(positions, BufferUsages::VERTEX | BufferUsages::STORAGE),
            texcoords: None,
            index: None,
            colors: None,
        }
    }

    /// Attach 2D texture coordinates
    pub fn with_texcoords2(mut self, texcoords: &[[f32; 2]]) -> Self {
        self.texcoords = Some(Buffer::from_slice(
            texcoords,
            BufferUsages::VERTEX | BufferUsages::STORAGE,
        ));
        self
    }

    /// Attach 3D texture coordinates
    pub fn with_texcoords3(mut self, texcoords: &[[f32; 3]]) -> Self {
        self.texcoords = Some(Buffer::from_slice(
            texcoords,
            BufferUsages::VERTEX | BufferUsages::STORAGE,
        ));
        self
    }

    /// Attach a triangle index buffer
    pub fn with_index(mut self, indices: &[u32]) -> Self {
        self.index = Some(Buffer::from_slice(indices, BufferUsages::INDEX));
        self
    }

    /// Attach per-vertex colors
    pub fn with_colors(mut self, colors: &[[f32; 4]]) -> Self {
        self.colors = Some(Buffer::from_slice(colors, BufferUsages::VERTEX));
        self
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.nitems()
    }

    /// An xy plane of the given extent, centered at the origin
    ///
    /// Two triangles with 2D texcoords, the usual quad for image display.
    pub fn plane(width: f32, height: f32) -> Self {
        let hw = 0.5 * width;
        let hh = 0.5 * height;
        let positions = [
            Vec4::new(-hw, -hh, 0.0, 1.0),
            Vec4::new(hw, -hh, 0.0, 1.0),
            Vec4::new(hw, hh, 0.0, 1.0),
            Vec4::new(-hw, hh, 0.0, 1.0),
        ];
        let texcoords = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let index = [0u32, 1, 2, 0, 2, 3];
        Self::new(&positions)
            .with_texcoords2(&texcoords)
            .with_index(&index)
    }

    /// The unit box used for volume slicing
    ///
    /// Eight corner vertices in the [`BOX_CORNERS`] order with 3D texcoords
    /// mapping each corner into 0..1 volume coordinates. No index buffer: the
    /// slice pipeline reads corners as storage, not as triangles.
    pub fn box_shape() -> Self {
        let positions: Vec<Vec4> = BOX_CORNERS.iter().map(|c| c.extend(1.0)).collect();
        let texcoords: Vec<[f32; 3]> = BOX_CORNERS
            .iter()
            .map(|c| [c.x + 0.5, c.y + 0.5, c.z + 0.5])
            .collect();
        Self::new(&positions).with_texcoords3(&texcoords)
    }
}
