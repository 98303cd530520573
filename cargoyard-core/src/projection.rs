/// Camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3};

use crate::picking::Ray;
use crate::transform::{Orbit, Transform};

/// Perspective camera configuration
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera above and in front of the scene, looking at the origin
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Point3::new(5.0, 10.0, 20.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: 60f32.to_radians(),
            aspect,
            near: 0.1,
            far: 500.0,
        }
    }

    /// Move the eye to follow `orbit`
    pub fn follow(&mut self, orbit: &Orbit) {
        self.position = orbit.eye();
        self.target = orbit.target;
    }

    /// Unit vector from the eye towards the target
    pub fn forward(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to screen space.
    ///
    /// Returns `(x, y, depth)` where depth is the distance along the view
    /// axis. Points off screen are still returned so that large triangles can
    /// be clipped by the rasterizer; only points behind the near plane give
    /// `None`.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp =
            Transform::mvp_matrix(model_matrix, &self.view_matrix(), &self.projection_matrix());
        let clip = mvp * point.to_homogeneous();

        // w is the view-space depth for a perspective projection
        if clip.w < self.near {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, clip.w))
    }

    /// Ray from the eye through a screen-space point
    pub fn screen_ray(&self, screen_x: f32, screen_y: f32, width: u32, height: u32) -> Option<Ray> {
        let ndc_x = screen_x / width as f32 * 2.0 - 1.0;
        let ndc_y = 1.0 - screen_y / height as f32 * 2.0;

        let inverse = (self.projection_matrix() * self.view_matrix()).try_inverse()?;
        let near = inverse.transform_point(&Point3::new(ndc_x, ndc_y, -1.0));
        let far = inverse.transform_point(&Point3::new(ndc_x, ndc_y, 1.0));

        Some(Ray::new(near, far - near))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800.0 / 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_projects_to_centre() {
        let camera = Camera::new(2.0);
        let (x, y, depth) = camera
            .project_to_screen(&camera.target, &Matrix4::identity(), 200, 100)
            .unwrap();
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 50.0).abs() < 1e-3);
        assert!((depth - (camera.target - camera.position).norm()).abs() < 1e-3);
    }

    #[test]
    fn test_points_behind_camera_are_rejected() {
        let camera = Camera::default();
        let behind = camera.position - camera.forward() * 5.0;
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 800, 600)
            .is_none());
    }

    #[test]
    fn test_screen_ray_inverts_projection() {
        let camera = Camera::new(1.5);
        let point = Point3::new(-3.0, 0.5, -5.0);
        let (sx, sy, _) = camera
            .project_to_screen(&point, &Matrix4::identity(), 300, 200)
            .unwrap();

        let ray = camera.screen_ray(sx, sy, 300, 200).unwrap();
        // distance from the point to the ray line
        let to_point = point - ray.origin;
        let along = to_point.dot(&ray.direction);
        let closest = ray.origin + ray.direction * along;
        assert!((closest - point).norm() < 1e-2);
        assert!(along > 0.0);
    }
}
