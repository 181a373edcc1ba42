// Perspective camera for the fixed-angle 2.5D view

use glam::{Mat3, Mat4, Vec3};

/// Perspective camera looking at the scene.
///
/// The same camera value drives both rendering and the controller's
/// movement projection, so the two can never drift apart.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
}

/// Camera-relative movement axes projected onto the ground plane.
#[derive(Debug, Clone, Copy)]
pub struct GroundBasis {
    /// Unit vector pointing away from the camera along the ground
    pub forward: Vec3,
    /// Unit vector pointing to the camera's right along the ground
    pub right: Vec3,
}

impl Camera {
    /// The fixed scene camera of this build: above and beside the origin,
    /// looking down at it.
    pub fn fixed_scene_camera(aspect: f32) -> Self {
        Self {
            position: Vec3::new(5.0, 5.0, 5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0_f32.to_radians(),
            near: 0.1,
            far: 100.0,
            aspect,
        }
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update aspect ratio after a resize
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    /// Movement axes on the ground plane.
    ///
    /// Forward is the view direction with its vertical component dropped;
    /// right is perpendicular to it. Both are unit length.
    pub fn ground_basis(&self) -> GroundBasis {
        let mut forward = self.target - self.position;
        forward.y = 0.0;
        let forward = forward.normalize();
        let right = forward.cross(self.up).normalize();
        GroundBasis { forward, right }
    }

    /// Rotation that makes a quad face the camera.
    ///
    /// The transpose of the view rotation cancels it exactly, leaving the
    /// quad parallel to the image plane wherever it sits in the world.
    pub fn billboard_rotation(&self) -> Mat4 {
        let view_rotation = Mat3::from_mat4(self.view_matrix());
        Mat4::from_mat3(view_rotation.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ground_basis_is_orthonormal() {
        let camera = Camera::fixed_scene_camera(16.0 / 9.0);
        let basis = camera.ground_basis();

        assert_relative_eq!(basis.forward.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(basis.right.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(basis.forward.dot(basis.right), 0.0, epsilon = 1e-5);
        assert_eq!(basis.forward.y, 0.0);
        assert_eq!(basis.right.y, 0.0);
    }

    #[test]
    fn test_ground_basis_matches_view_direction() {
        let camera = Camera::fixed_scene_camera(16.0 / 9.0);
        let basis = camera.ground_basis();

        // Camera at (5,5,5) looking at the origin: forward on the ground is
        // the (-1, 0, -1) diagonal
        let inv_sqrt2 = 1.0 / 2.0_f32.sqrt();
        assert_relative_eq!(basis.forward.x, -inv_sqrt2, epsilon = 1e-5);
        assert_relative_eq!(basis.forward.z, -inv_sqrt2, epsilon = 1e-5);
        assert_relative_eq!(basis.right.x, inv_sqrt2, epsilon = 1e-5);
        assert_relative_eq!(basis.right.z, -inv_sqrt2, epsilon = 1e-5);
    }

    #[test]
    fn test_billboard_cancels_view_rotation() {
        let camera = Camera::fixed_scene_camera(1.0);
        let view_rotation = Mat3::from_mat4(camera.view_matrix());
        let billboard = Mat3::from_mat4(camera.billboard_rotation());

        let product = view_rotation * billboard;
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product.col(i)[j], expected, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_set_aspect() {
        let mut camera = Camera::fixed_scene_camera(1.0);
        camera.set_aspect(1920, 1080);
        assert_relative_eq!(camera.aspect, 1920.0 / 1080.0);

        // Degenerate height must not divide by zero
        camera.set_aspect(800, 0);
        assert!(camera.aspect.is_finite());
    }
}
