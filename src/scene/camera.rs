use glam::{Mat4, Vec3};

use crate::host::Viewport;

/// Perspective camera fitted to the host viewport.
///
/// The vertical fov is derived from the viewport height and the camera
/// distance, `2 · atan((height/2) / distance)`, so that one world unit maps
/// to exactly one CSS pixel on the z = 0 plane. That identity is what lets
/// meshes mirror host elements without any further unit conversion.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Camera z position (distance to the z = 0 plane).
    pub distance: f32,

    projection_matrix: Mat4,
}

impl Camera {
    /// Creates a camera fitted to `viewport`.
    #[must_use]
    pub fn fitted(viewport: &Viewport, distance: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            fov: std::f32::consts::FRAC_PI_4,
            aspect: viewport.aspect(),
            near,
            far,
            distance,
            projection_matrix: Mat4::IDENTITY,
        };
        cam.fit_viewport(viewport);
        cam
    }

    /// Re-derives aspect and fov from a (resized) viewport.
    ///
    /// Degenerate viewports are ignored; the previous projection stays.
    pub fn fit_viewport(&mut self, viewport: &Viewport) {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return;
        }
        self.aspect = viewport.aspect();
        self.fov = 2.0 * ((viewport.height / 2.0) / self.distance).atan();
        self.update_projection_matrix();
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    #[inline]
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// World-space camera position.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.distance)
    }
}
