//! Camera projection subsystem
//!
//! Cameras produce a projection matrix and its inverse from view parameters.
//! Both variants compose the fixed depth remap onto their projection so
//! clip-space depth lands in the 0..1 range the GPU expects, and the inverse
//! is taken of the remapped matrix.
//!
//! Matrices are recomputed only by [`Camera::update_projection_matrix`]:
//! parameter setters are cheap writes, and reads return the last computed
//! matrices. Call update after changing zoom, the depth range, or the
//! viewport size.

use visgpu_math::{mat4, Mat4};

use crate::error::ConfigurationError;

/// Shared contract of all camera variants
pub trait Camera {
    /// Recompute the projection matrix and its inverse from current parameters
    fn update_projection_matrix(&mut self);

    /// Inform the camera of the viewport size in pixels
    fn set_viewport_size(&mut self, width: f32, height: f32);

    /// The last computed projection matrix (includes the depth remap)
    fn projection_matrix(&self) -> Mat4;

    /// The last computed inverse projection matrix
    fn projection_matrix_inverse(&self) -> Mat4;
}

/// An orthographic camera, useful for non-perspective views and 2D content
///
/// Maintains a reference `width x height` view volume scaled by `zoom`. With
/// `maintain_aspect` enabled (the default), the reference dimension that is
/// proportionally smaller than the viewport is enlarged, so the visible
/// volume always covers at least the requested extent, centered.
pub struct OrthographicCamera {
    /// Reference width of the view volume
    pub width: f32,
    /// Reference height of the view volume
    pub height: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
    pub maintain_aspect: bool,
    viewport_aspect: f32,
    effective_width: f32,
    effective_height: f32,
    projection_matrix: Mat4,
    projection_matrix_inverse: Mat4,
}

impl OrthographicCamera {
    /// Create an orthographic camera
    ///
    /// Fails if `near >= far`; a zero or negative depth range can never
    /// produce a valid projection.
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Result<Self, ConfigurationError> {
        if near >= far {
            return Err(ConfigurationError::InvalidDepthRange { near, far });
        }
        let mut camera = Self {
            width,
            height,
            near,
            far,
            zoom: 1.0,
            maintain_aspect: true,
            viewport_aspect: width / height,
            effective_width: width,
            effective_height: height,
            projection_matrix: mat4::IDENTITY,
            projection_matrix_inverse: mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        Ok(camera)
    }

    /// The view-volume width after aspect correction and zoom
    #[inline]
    pub fn effective_width(&self) -> f32 {
        self.effective_width
    }

    /// The view-volume height after aspect correction and zoom
    #[inline]
    pub fn effective_height(&self) -> f32 {
        self.effective_height
    }
}

impl Camera for OrthographicCamera {
    fn update_projection_matrix(&mut self) {
        let mut width = self.width / self.zoom;
        let mut height = self.height / self.zoom;

        if self.maintain_aspect && self.viewport_aspect > 0.0 {
            // Enlarge whichever reference dimension is proportionally
            // smaller than the viewport, keeping the view centered.
            let reference_aspect = width / height;
            if reference_aspect < self.viewport_aspect {
                width = height * self.viewport_aspect;
            } else if reference_aspect > self.viewport_aspect {
                height = width / self.viewport_aspect;
            }
        }

        self.effective_width = width;
        self.effective_height = height;

        let top = 0.5 * height;
        let bottom = -0.5 * height;
        let left = -0.5 * width;
        let right = 0.5 * width;

        let projection = mat4::orthographic(left, right, top, bottom, self.near, self.far);
        self.projection_matrix = mat4::mul(mat4::DEPTH_REMAP, projection);
        // Invertible whenever the bounds and depth range are non-degenerate
        self.projection_matrix_inverse =
            mat4::inverse(self.projection_matrix).unwrap_or(mat4::IDENTITY);
    }

    fn set_viewport_size(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.viewport_aspect = width / height;
        }
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    fn projection_matrix_inverse(&self) -> Mat4 {
        self.projection_matrix_inverse
    }
}

/// A standard perspective camera
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Viewport aspect ratio (width / height)
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub zoom: f32,
    projection_matrix: Mat4,
    projection_matrix_inverse: Mat4,
}

impl PerspectiveCamera {
    /// Create a perspective camera
    ///
    /// Fails if `near >= far`.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Result<Self, ConfigurationError> {
        if near >= far {
            return Err(ConfigurationError::InvalidDepthRange { near, far });
        }
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            zoom: 1.0,
            projection_matrix: mat4::IDENTITY,
            projection_matrix_inverse: mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        Ok(camera)
    }
}

impl Camera for PerspectiveCamera {
    fn update_projection_matrix(&mut self) {
        // Zoom narrows the field of view
        let half_tan = (self.fov.to_radians() * 0.5).tan() / self.zoom;
        let fov_eff = 2.0 * half_tan.atan().to_degrees();

        let projection = mat4::perspective(fov_eff, self.aspect, self.near, self.far);
        self.projection_matrix = mat4::mul(mat4::DEPTH_REMAP, projection);
        self.projection_matrix_inverse =
            mat4::inverse(self.projection_matrix).unwrap_or(mat4::IDENTITY);
    }

    fn set_viewport_size(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    fn projection_matrix_inverse(&self) -> Mat4 {
        self.projection_matrix_inverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visgpu_math::Vec3;

    const EPSILON: f32 = 1e-5;

    fn mat_approx_identity(m: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                if (m[i][j] - expected).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_rejects_invalid_depth_range() {
        assert!(OrthographicCamera::new(2.0, 2.0, 10.0, 10.0).is_err());
        assert!(OrthographicCamera::new(2.0, 2.0, 10.0, -10.0).is_err());
        assert!(PerspectiveCamera::new(50.0, 1.0, 100.0, 1.0).is_err());
    }

    #[test]
    fn test_ortho_projection_times_inverse_is_identity() {
        let camera = OrthographicCamera::new(2.0, 2.0, -1000.0, 1000.0).unwrap();
        let product = mat4::mul(camera.projection_matrix(), camera.projection_matrix_inverse());
        assert!(mat_approx_identity(product));
    }

    #[test]
    fn test_perspective_projection_times_inverse_is_identity() {
        let camera = PerspectiveCamera::new(50.0, 16.0 / 9.0, 0.1, 1000.0).unwrap();
        let product = mat4::mul(camera.projection_matrix(), camera.projection_matrix_inverse());
        assert!(mat_approx_identity(product));
    }

    #[test]
    fn test_maintain_aspect_enlarges_narrow_dimension() {
        let mut camera = OrthographicCamera::new(2.0, 2.0, -1.0, 1.0).unwrap();
        camera.set_viewport_size(200.0, 100.0);
        camera.update_projection_matrix();

        assert!((camera.effective_width() - 4.0).abs() < EPSILON);
        assert!((camera.effective_height() - 2.0).abs() < EPSILON);

        // Tall viewport enlarges height instead
        camera.set_viewport_size(100.0, 400.0);
        camera.update_projection_matrix();
        assert!((camera.effective_width() - 2.0).abs() < EPSILON);
        assert!((camera.effective_height() - 8.0).abs() < EPSILON);
    }

    #[test]
    fn test_maintain_aspect_disabled() {
        let mut camera = OrthographicCamera::new(2.0, 2.0, -1.0, 1.0).unwrap();
        camera.maintain_aspect = false;
        camera.set_viewport_size(200.0, 100.0);
        camera.update_projection_matrix();

        assert!((camera.effective_width() - 2.0).abs() < EPSILON);
        assert!((camera.effective_height() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_depth_range_is_zero_to_one() {
        // Points just inside the near/far planes are visible, just outside
        // are clipped. The camera looks down -z.
        let near = -40.0;
        let far = 300.0;
        let camera = OrthographicCamera::new(2.0, 2.0, near, far).unwrap();
        let m = camera.projection_matrix();

        let z_of = |view_z: f32| mat4::project_point(m, Vec3::new(0.0, 0.0, view_z)).z;

        let in_front = z_of(-(near + 0.01));
        let out_front = z_of(-(near - 0.01));
        let in_back = z_of(-(far - 0.01));
        let out_back = z_of(-(far + 0.01));

        assert!((0.0..=1.0).contains(&in_front), "z = {}", in_front);
        assert!(out_front < 0.0, "z = {}", out_front);
        assert!((0.0..=1.0).contains(&in_back), "z = {}", in_back);
        assert!(out_back > 1.0, "z = {}", out_back);
    }

    #[test]
    fn test_zoom_requires_update() {
        let mut camera = OrthographicCamera::new(2.0, 2.0, -1.0, 1.0).unwrap();
        let before = camera.projection_matrix();

        camera.zoom = 2.0;
        // Dirty-on-write: nothing changes until update is called
        assert_eq!(camera.projection_matrix(), before);

        camera.update_projection_matrix();
        assert_ne!(camera.projection_matrix(), before);
        assert!((camera.effective_width() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_perspective_zoom_narrows_view() {
        let mut camera = PerspectiveCamera::new(90.0, 1.0, 0.1, 100.0).unwrap();
        let wide = camera.projection_matrix();
        camera.zoom = 2.0;
        camera.update_projection_matrix();
        let narrow = camera.projection_matrix();

        // Larger zoom means larger focal scale on x and y
        assert!(narrow[0][0] > wide[0][0]);
        assert!(narrow[1][1] > wide[1][1]);
    }
}
