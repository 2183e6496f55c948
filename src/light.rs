//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light illuminating the scene uniformly from one direction.
///
/// Used for flat shading: one diffuse factor per face, no per-pixel normal
/// interpolation.
#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    /// Normalized direction the light travels (not where it comes from).
    direction: Vec3,
}

impl DirectionalLight {
    /// Create a directional light; the direction is normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Diffuse factor for a face normal, remapped so a face at grazing angle
    /// gets 0.5 and a face looking straight into the light gets 1.0.
    pub fn diffuse(&self, face_normal: Vec3) -> f32 {
        ((1.0 + face_normal.dot(self.direction)) * 0.5).clamp(0.0, 1.0)
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self::new(Vec3::new(-8.0, -5.0, 5.0))
    }
}
