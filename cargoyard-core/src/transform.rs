/// Model transforms and orbit camera state
use nalgebra::{Matrix4, Point3, Vector3};

const MIN_PITCH: f32 = -1.5;
const MAX_PITCH: f32 = 1.5;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 200.0;

/// Camera orbit around a target point (angles in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub target: Point3<f32>,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Orbit {
    /// Orbit that places the eye at `eye` while looking at `target`
    pub fn looking_at(eye: Point3<f32>, target: Point3<f32>) -> Self {
        let offset = eye - target;
        let distance = offset.norm().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / offset.norm().max(f32::EPSILON)).asin();

        Self {
            target,
            yaw,
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
            distance,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw += dyaw;
        self.pitch = (self.pitch + dpitch).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Scale the distance to the target, `factor < 1` moves closer
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn eye(&self) -> Point3<f32> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vector3::new(
            cos_pitch * sin_yaw,
            sin_pitch,
            cos_pitch * cos_yaw,
        ) * self.distance;
        self.target + offset
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a translation matrix
    pub fn translation_matrix(position: &Point3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(&position.coords)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit_reproduces_eye() {
        let eye = Point3::new(5.0, 10.0, 20.0);
        let orbit = Orbit::looking_at(eye, Point3::origin());
        assert!((orbit.eye() - eye).norm() < 1e-4);
    }

    #[test]
    fn test_orbit_clamps_pitch_and_distance() {
        let mut orbit = Orbit::looking_at(Point3::new(0.0, 0.0, 10.0), Point3::origin());
        orbit.rotate(0.0, 10.0);
        assert_eq!(orbit.pitch, MAX_PITCH);
        orbit.zoom(0.0);
        assert_eq!(orbit.distance, MIN_DISTANCE);
        orbit.zoom(1e6);
        assert_eq!(orbit.distance, MAX_DISTANCE);
    }

    #[test]
    fn test_translation_moves_origin() {
        let matrix = Transform::translation_matrix(&Point3::new(1.0, 2.0, 3.0));
        let moved = matrix.transform_point(&Point3::origin());
        assert_eq!(moved, Point3::new(1.0, 2.0, 3.0));
    }
}
