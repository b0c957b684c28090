//! Cutting plane for volume slicing

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};

use crate::Vec3;

/// A plane `ax + by + cz + d = 0`
///
/// Used as the slicing plane of the volume-slice material. The coefficients
/// are stored in the order they are uploaded to shader uniforms.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Plane {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl Plane {
    /// Create a plane from its four coefficients
    #[inline]
    pub const fn new(a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { a, b, c, d }
    }

    /// Create a plane from a normal vector and a signed distance offset
    pub fn from_normal_and_distance(normal: Vec3, d: f32) -> Self {
        Self::new(normal.x, normal.y, normal.z, d)
    }

    /// The plane normal (not necessarily unit length)
    #[inline]
    pub fn normal(&self) -> Vec3 {
        Vec3::new(self.a, self.b, self.c)
    }

    /// Signed distance from a point to the plane, scaled by the normal length
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.a * p.x + self.b * p.y + self.c * p.z + self.d
    }

    /// Return an equivalent plane with a unit-length normal
    pub fn normalized(&self) -> Self {
        let len = self.normal().length();
        if len > 0.0 {
            let inv = 1.0 / len;
            Self::new(self.a * inv, self.b * inv, self.c * inv, self.d * inv)
        } else {
            *self
        }
    }

    /// Coefficients as an array, in uniform-upload order
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.a, self.b, self.c, self.d]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance() {
        // z = 2 plane
        let plane = Plane::new(0.0, 0.0, 1.0, -2.0);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, 0.0, 5.0)), 3.0);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, 0.0, 2.0)), 0.0);
        assert_eq!(plane.signed_distance(Vec3::new(0.0, 0.0, 0.0)), -2.0);
    }

    #[test]
    fn test_normalized() {
        let plane = Plane::new(0.0, 3.0, 4.0, 10.0).normalized();
        assert!((plane.normal().length() - 1.0).abs() < 1e-6);
        assert!((plane.d - 2.0).abs() < 1e-6);
    }
}
