use glam::{Mat4, Vec3};
use std::borrow::Cow;
use uuid::Uuid;

/// Up vector for a camera facing `forward`.
///
/// World +Y, unless the camera looks (almost) straight up or down, where
/// +Y is degenerate and -Z is used instead.
#[must_use]
pub fn up_for(forward: Vec3) -> Vec3 {
    if forward.normalize_or_zero().dot(Vec3::Y).abs() > 0.999_9 {
        Vec3::NEG_Z
    } else {
        Vec3::Y
    }
}

/// Right-handed view matrix for an eye looking at `target`.
#[must_use]
pub fn look_at_matrix(eye: Vec3, target: Vec3) -> Mat4 {
    let forward = target - eye;
    if forward.length_squared() <= f32::EPSILON {
        return Mat4::from_translation(-eye);
    }
    Mat4::look_to_rh(eye, forward.normalize(), up_for(forward))
}

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,

    // === Projection ===
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    // === Placement ===
    position: Vec3,
    forward: Vec3,

    // Cached matrices, read-only for the renderer
    pub(crate) view_matrix: Mat4,
    pub(crate) projection_matrix: Mat4,
}

impl PerspectiveCamera {
    /// `fov` is the vertical field of view in degrees.
    #[must_use]
    pub fn new_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut cam = Self {
            uuid: Uuid::new_v4(),
            name: Cow::Borrowed("Camera"),
            fov: fov.to_radians(),
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };

        cam.update_projection_matrix();
        cam
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the camera, keeping its orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Turns the camera towards `target`.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() > f32::EPSILON {
            self.forward = forward.normalize();
        }
        self.update_view_matrix();
    }

    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix = Mat4::look_to_rh(self.position, self.forward, up_for(self.forward));
    }

    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }
}
