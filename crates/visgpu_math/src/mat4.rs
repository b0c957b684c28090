//! 4x4 matrix utilities
//!
//! Matrices are column-major: `m[col][row]`, matching the layout expected by
//! GPU uniform buffers. This module provides the projection builders used by
//! the cameras and the general inverse needed for the inverse projection
//! matrix and the per-frame view matrix.

use crate::{Vec3, Vec4};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Depth remap from conventional clip space to the GPU depth convention.
///
/// Projection builders produce `z_ndc` in -1..1; the target GPU API expects
/// depth in 0..1. Composing as `mul(DEPTH_REMAP, projection)` applies
/// `z' = 0.5 * z + 0.5` after the projection while leaving x, y, w untouched.
pub const DEPTH_REMAP: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.5, 0.0],
    [0.0, 0.0, 0.5, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a Vec4 by a 4x4 matrix (column-major)
///
/// result = M * v
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
        m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
    )
}

/// Transform a 3D point (w = 1) and apply the perspective divide
///
/// Returns the point in normalized device coordinates.
pub fn project_point(m: Mat4, p: Vec3) -> Vec3 {
    let clip = transform(m, p.extend(1.0));
    let inv_w = if clip.w != 0.0 { 1.0 / clip.w } else { 1.0 };
    Vec3::new(clip.x * inv_w, clip.y * inv_w, clip.z * inv_w)
}

/// Translation matrix
pub fn translation(t: Vec3) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = t.x;
    m[3][1] = t.y;
    m[3][2] = t.z;
    m
}

/// Uniform scaling matrix
pub fn scaling(s: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = s;
    m[1][1] = s;
    m[2][2] = s;
    m
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Orthographic projection matrix
///
/// Maps the view volume to -1..1 on all axes, with the camera looking down
/// the negative z axis. Depth remains in the -1..1 convention; callers apply
/// [`DEPTH_REMAP`] for the GPU depth range.
pub fn orthographic(left: f32, right: f32, top: f32, bottom: f32, near: f32, far: f32) -> Mat4 {
    let w = 1.0 / (right - left);
    let h = 1.0 / (top - bottom);
    let d = 1.0 / (far - near);

    let mut m = IDENTITY;
    m[0][0] = 2.0 * w;
    m[1][1] = 2.0 * h;
    m[2][2] = -2.0 * d;
    m[3][0] = -(right + left) * w;
    m[3][1] = -(top + bottom) * h;
    m[3][2] = -(far + near) * d;
    m
}

/// Perspective projection matrix from a vertical field of view in degrees
pub fn perspective(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let top = near * (fov_y_deg.to_radians() * 0.5).tan();
    let height = 2.0 * top;
    let width = aspect * height;
    let left = -0.5 * width;
    let right = left + width;
    let bottom = top - height;

    let x = 2.0 * near / (right - left);
    let y = 2.0 * near / (top - bottom);
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -2.0 * far * near / (far - near);

    [
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [a, b, c, -1.0],
        [0.0, 0.0, d, 0.0],
    ]
}

/// General 4x4 matrix inverse
///
/// Returns `None` when the matrix is singular.
pub fn inverse(m: Mat4) -> Option<Mat4> {
    // Cofactor expansion over a flat array; indices are column-major
    // (element c*4+r is column c, row r).
    let a: [f32; 16] = [
        m[0][0], m[0][1], m[0][2], m[0][3],
        m[1][0], m[1][1], m[1][2], m[1][3],
        m[2][0], m[2][1], m[2][2], m[2][3],
        m[3][0], m[3][1], m[3][2], m[3][3],
    ];

    let b00 = a[0] * a[5] - a[1] * a[4];
    let b01 = a[0] * a[6] - a[2] * a[4];
    let b02 = a[0] * a[7] - a[3] * a[4];
    let b03 = a[1] * a[6] - a[2] * a[5];
    let b04 = a[1] * a[7] - a[3] * a[5];
    let b05 = a[2] * a[7] - a[3] * a[6];
    let b06 = a[8] * a[13] - a[9] * a[12];
    let b07 = a[8] * a[14] - a[10] * a[12];
    let b08 = a[8] * a[15] - a[11] * a[12];
    let b09 = a[9] * a[14] - a[10] * a[13];
    let b10 = a[9] * a[15] - a[11] * a[13];
    let b11 = a[10] * a[15] - a[11] * a[14];

    let det = b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06;
    if det.abs() < 1e-12 {
        return None;
    }
    let inv_det = 1.0 / det;

    let out: [f32; 16] = [
        (a[5] * b11 - a[6] * b10 + a[7] * b09) * inv_det,
        (a[2] * b10 - a[1] * b11 - a[3] * b09) * inv_det,
        (a[13] * b05 - a[14] * b04 + a[15] * b03) * inv_det,
        (a[10] * b04 - a[9] * b05 - a[11] * b03) * inv_det,
        (a[6] * b08 - a[4] * b11 - a[7] * b07) * inv_det,
        (a[0] * b11 - a[2] * b08 + a[3] * b07) * inv_det,
        (a[14] * b02 - a[12] * b05 - a[15] * b01) * inv_det,
        (a[8] * b05 - a[10] * b02 + a[11] * b01) * inv_det,
        (a[4] * b10 - a[5] * b08 + a[7] * b06) * inv_det,
        (a[1] * b08 - a[0] * b10 - a[3] * b06) * inv_det,
        (a[12] * b04 - a[13] * b02 + a[15] * b00) * inv_det,
        (a[9] * b02 - a[8] * b04 - a[11] * b00) * inv_det,
        (a[5] * b07 - a[4] * b09 - a[6] * b06) * inv_det,
        (a[0] * b09 - a[1] * b07 + a[2] * b06) * inv_det,
        (a[13] * b01 - a[12] * b03 - a[14] * b00) * inv_det,
        (a[8] * b03 - a[9] * b01 + a[10] * b00) * inv_det,
    ];

    Some([
        [out[0], out[1], out[2], out[3]],
        [out[4], out[5], out[6], out[7]],
        [out[8], out[9], out[10], out[11]],
        [out[12], out[13], out[14], out[15]],
    ])
}
