use glam::{Mat4, Vec3};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

use crate::scene::camera::look_at_matrix;
use crate::shadow::{DirectionalShadow, ShadowFrustumBounds};

/// Converts a `0xRRGGBB` colour to float RGB in `[0, 1]`.
#[must_use]
pub fn color_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(r, g, b)
}

/// Sun-like light: parallel rays from `position` towards `target`.
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub uuid: Uuid,
    pub id: u64,
    pub color: Vec3,
    pub intensity: f32,

    pub position: Vec3,
    pub target: Vec3,

    pub cast_shadows: bool,
    pub shadow: DirectionalShadow,
}

impl DirectionalLight {
    fn generate_id_from_uuid(uuid: &Uuid) -> u64 {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        uuid.hash(&mut hasher);
        hasher.finish()
    }

    #[must_use]
    pub fn new(color: Vec3, intensity: f32, bounds: &ShadowFrustumBounds) -> Self {
        let uuid = Uuid::new_v4();
        Self {
            uuid,
            id: Self::generate_id_from_uuid(&uuid),
            color,
            intensity,
            position: Vec3::new(0.0, 1.0, 0.0),
            target: Vec3::ZERO,
            cast_shadows: false,
            shadow: DirectionalShadow::new(bounds),
        }
    }

    /// The preview sun: warm yellow, intensity 5, placed at (10, 5, -10)
    /// with shadows on.
    #[must_use]
    pub fn sun(bounds: &ShadowFrustumBounds) -> Self {
        let mut light = Self::new(color_from_hex(0x00ff_c700), 5.0, bounds);
        light.position = Vec3::new(10.0, 5.0, -10.0);
        light.cast_shadows = true;
        light
    }

    /// Distance from the target, i.e. the radius the sun orbits on.
    #[must_use]
    pub fn distance(&self) -> f32 {
        (self.position - self.target).length()
    }

    /// View matrix of the shadow camera.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        look_at_matrix(self.position, self.target)
    }

    #[must_use]
    pub fn shadow_view_projection(&self) -> Mat4 {
        self.shadow.camera.projection_matrix() * self.view_matrix()
    }
}
