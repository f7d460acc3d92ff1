//! Free-fly camera
//!
//! The camera owns its movement keys. Tool shortcuts are never bound to
//! them, so flying never triggers an edit.

use crate::foundation::math::{utils, Vec3};
use crate::input::{InputState, KeyCode};
use crate::physics::collision::Ray;

/// Keys the fly camera moves on: forward, left, back, right, down, up
pub const MOVEMENT_KEYS: [KeyCode; 6] = [KeyCode::W, KeyCode::A, KeyCode::S, KeyCode::D, KeyCode::Q, KeyCode::E];

/// Yaw/pitch camera flown with the movement keys
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    /// Eye position
    pub position: Vec3,
    /// Rotation about Y in radians; zero looks down -Z
    pub yaw: f32,
    /// Rotation above the horizon in radians
    pub pitch: f32,
    /// Units per second
    pub speed: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Viewport width over height
    pub aspect: f32,
}

impl FlyCamera {
    const PITCH_LIMIT: f32 = 1.55;

    /// Camera at `position` looking down -Z
    pub fn new(position: Vec3, speed: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            speed,
            fov: utils::deg_to_rad(60.0),
            aspect: 16.0 / 9.0,
        }
    }

    /// Whether a key is one of the camera's movement keys
    pub fn owns_key(key: KeyCode) -> bool {
        MOVEMENT_KEYS.contains(&key)
    }

    /// View direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Screen-right direction, always horizontal
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Screen-up direction
    pub fn up(&self) -> Vec3 {
        self.right().cross(&self.forward())
    }

    /// Turn by yaw and pitch deltas; pitch stays short of straight up/down
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT);
    }

    /// Fly according to the held movement keys
    pub fn update(&mut self, dt: f32, input: &InputState) {
        let axis = |positive: KeyCode, negative: KeyCode| {
            (input.is_held(positive) as i32 - input.is_held(negative) as i32) as f32
        };
        let direction = self.forward() * axis(KeyCode::W, KeyCode::S)
            + self.right() * axis(KeyCode::D, KeyCode::A)
            + Vec3::y() * axis(KeyCode::E, KeyCode::Q);
        if let Some(direction) = direction.try_normalize(1e-6) {
            self.position += direction * self.speed * dt;
            log::trace!("Camera moved to {:?}", self.position);
        }
    }

    /// Ray from the eye through a point in NDC (Y down)
    pub fn ray_through(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let half_height = (self.fov * 0.5).tan();
        let direction = self.forward()
            + self.right() * (ndc_x * half_height * self.aspect)
            - self.up() * (ndc_y * half_height);
        Ray::new(self.position, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_center_ray_looks_forward() {
        let camera = FlyCamera::new(Vec3::new(0.0, 2.0, 10.0), 5.0);
        let ray = camera.ray_through(0.0, 0.0);
        assert_relative_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        // Top of the screen tilts the ray up
        assert!(camera.ray_through(0.0, -1.0).direction.y > 0.0);
    }

    #[test]
    fn test_flies_with_held_keys() {
        let mut camera = FlyCamera::new(Vec3::zeros(), 2.0);
        let mut input = InputState::new();
        input.handle_key_input(KeyCode::W, true);
        camera.update(0.5, &input);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);

        input.release_all();
        input.handle_key_input(KeyCode::E, true);
        camera.update(1.0, &input);
        assert_relative_eq!(camera.position.y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::new(Vec3::zeros(), 1.0);
        camera.look(0.0, 10.0);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);
    }
}
