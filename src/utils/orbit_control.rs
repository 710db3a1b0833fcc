use glam::{Vec2, Vec3};

use crate::scene::camera::PerspectiveCamera;
use crate::utils::input::{Input, PointerButton};

/// Free-orbit camera control: drag to rotate, right-drag to pan, wheel to
/// zoom, with frame-rate independent damping.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub damping_factor: f32,
    pub enable_damping: bool,
    pub min_distance: f32,
    pub max_distance: f32,

    pub center: Vec3,
    pub radius: f32,
    /// Angle around +Y, measured from +Z
    pub theta: f32,
    /// Angle from +Y
    pub phi: f32,

    rotate_delta: Vec2,
}

impl OrbitControls {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            rotate_speed: 1.0,
            zoom_speed: 0.05,
            pan_speed: 1.0,
            damping_factor: 0.05,
            enable_damping: true,
            min_distance: 1.0,
            max_distance: 1000.0,

            center,
            radius,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,

            rotate_delta: Vec2::ZERO,
        }
    }

    /// Orbit state that reproduces a camera placed at `position` looking at
    /// `center`.
    #[must_use]
    pub fn from_position(position: Vec3, center: Vec3) -> Self {
        let offset = position - center;
        let radius = offset.length();
        let mut controls = Self::new(center, radius.max(f32::EPSILON));
        if radius > f32::EPSILON {
            controls.theta = offset.x.atan2(offset.z);
            controls.phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        }
        controls
    }

    /// Camera position implied by the current orbit state.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let sin_phi = self.phi.sin();
        self.center
            + Vec3::new(
                self.radius * sin_phi * self.theta.sin(),
                self.radius * self.phi.cos(),
                self.radius * sin_phi * self.theta.cos(),
            )
    }

    pub fn update(&mut self, camera: &mut PerspectiveCamera, input: &Input, dt: f32) {
        const EPS: f32 = 0.0001;
        let screen_height = input.screen_size.y.max(1.0);

        if input.is_button_pressed(PointerButton::Primary) {
            let rotate_per_pixel = 2.0 * std::f32::consts::PI / screen_height;
            self.rotate_delta.x -= input.cursor_delta.x * rotate_per_pixel * self.rotate_speed;
            self.rotate_delta.y -= input.cursor_delta.y * rotate_per_pixel * self.rotate_speed;
        }

        if self.enable_damping {
            let target_fps = 60.0;
            let retention = (1.0 - self.damping_factor).powf(dt * target_fps);
            let delta_apply = self.rotate_delta * (1.0 - retention);

            self.theta += delta_apply.x;
            self.phi += delta_apply.y;
            self.rotate_delta *= retention;
        } else {
            self.theta += self.rotate_delta.x;
            self.phi += self.rotate_delta.y;
            self.rotate_delta = Vec2::ZERO;
        }

        self.phi = self.phi.clamp(EPS, std::f32::consts::PI - EPS);

        if input.scroll_delta.y != 0.0 {
            let scale = (1.0 - self.zoom_speed).powf(input.scroll_delta.y.abs());
            if input.scroll_delta.y > 0.0 {
                self.radius *= scale;
            } else {
                self.radius /= scale;
            }
            self.radius = self.radius.clamp(self.min_distance, self.max_distance);
        }

        if input.is_button_pressed(PointerButton::Secondary) {
            let half_fov = camera.fov / 2.0;
            let target_world_height = 2.0 * self.radius * half_fov.tan();
            let pixels_to_world_ratio = target_world_height / screen_height;

            let forward = (self.center - self.eye()).normalize_or_zero();
            let right = forward.cross(Vec3::Y).normalize_or_zero();
            let up = right.cross(forward).normalize_or_zero();

            let pan_delta_world = (right * -input.cursor_delta.x + up * input.cursor_delta.y)
                * pixels_to_world_ratio
                * self.pan_speed;

            self.center += pan_delta_world;
        }

        camera.set_position(self.eye());
        camera.look_at(self.center);
    }
}
