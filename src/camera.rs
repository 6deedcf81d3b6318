//! Perspective camera with a look-at target.

use glam::{Mat4, Vec2, Vec3};

/// Radius of the auto-rotate orbit in the horizontal plane.
pub const ORBIT_RADIUS: f32 = 15.0;
/// Resting camera height; the orbit bobs around it.
pub const ORBIT_HEIGHT: f32 = 5.0;
/// Vertical bob amplitude of the orbit.
pub const ORBIT_BOB: f32 = 3.0;
/// How far pointer NDC moves the camera.
pub const POINTER_REACH: f32 = 5.0;

/// Perspective camera looking at a target point.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Camera {
    /// Camera at `(0, 5, 15)` looking at the origin.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, ORBIT_HEIGHT, ORBIT_RADIUS),
            target: Vec3::ZERO,
            fov_y: 75.0,
            near: 0.1,
            far: 1000.0,
            aspect,
        }
    }

    /// Aim at a world-space point.
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Place the camera on the auto-rotate orbit for the given animation time.
    pub fn orbit(&mut self, time: f32) {
        self.position = Vec3::new(
            (time * 0.2).sin() * ORBIT_RADIUS,
            ORBIT_HEIGHT + (time * 0.1).sin() * ORBIT_BOB,
            (time * 0.2).cos() * ORBIT_RADIUS,
        );
        self.look_at(Vec3::ZERO);
    }

    /// Place the camera from pointer NDC, keeping the current depth.
    pub fn follow_pointer(&mut self, ndc: Vec2) {
        self.position.x = ndc.x * POINTER_REACH;
        self.position.y = ndc.y * POINTER_REACH + ORBIT_HEIGHT;
        self.look_at(Vec3::ZERO);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_pose() {
        let camera = Camera::new(1.5);
        assert_eq!(camera.position, Vec3::new(0.0, 5.0, 15.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert_eq!(camera.fov_y, 75.0);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_orbit_stays_on_circle() {
        let mut camera = Camera::default();
        for i in 0..500 {
            let t = i as f32 * 0.37;
            camera.orbit(t);
            let p = camera.position;
            let r2 = p.x * p.x + p.z * p.z;
            assert!((r2 - ORBIT_RADIUS * ORBIT_RADIUS).abs() < 1e-2, "r2 = {r2}");
            assert!(p.y >= 2.0 - 1e-5 && p.y <= 8.0 + 1e-5, "y = {}", p.y);
            assert_eq!(camera.target, Vec3::ZERO);
        }
    }

    #[test]
    fn test_follow_pointer_center_keeps_depth() {
        let mut camera = Camera::default();
        camera.position.z = 12.5;
        camera.target = Vec3::ONE;
        camera.follow_pointer(Vec2::ZERO);
        assert_eq!(camera.position, Vec3::new(0.0, 5.0, 12.5));
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_follow_pointer_corners() {
        let mut camera = Camera::default();
        camera.follow_pointer(Vec2::new(1.0, -1.0));
        assert_eq!(camera.position.x, 5.0);
        assert_eq!(camera.position.y, 0.0);
    }

    #[test]
    fn test_view_proj_puts_target_in_front() {
        let camera = Camera::new(1.0);
        let clip = camera.view_proj() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }
}
