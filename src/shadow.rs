//! Shadow Frustum Configuration
//!
//! A directional light rasterizes its depth map through an orthographic
//! camera. This module owns that camera, the square map resolution, and the
//! lazily allocated map target, and is the only place that mutates them.
//!
//! Bounds are not validated: `left > right` or `near == far` produce an
//! inverted or degenerate frustum, which is what a debug slider should show.

use glam::{Mat4, UVec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Six orthographic bounds plus the square shadow-map resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowFrustumBounds {
    pub near: f32,
    pub far: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub map_size: u32,
}

impl Default for ShadowFrustumBounds {
    fn default() -> Self {
        Self {
            near: -50.0,
            far: 50.0,
            left: -50.0,
            right: 50.0,
            top: 50.0,
            bottom: -50.0,
            map_size: 4096,
        }
    }
}

/// One of the six scalar bounds, for per-slider updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumBound {
    Near,
    Far,
    Left,
    Right,
    Top,
    Bottom,
}

// ============================================================================
// Shadow Camera
// ============================================================================

#[derive(Debug, Clone)]
pub struct OrthographicShadowCamera {
    pub near: f32,
    pub far: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,

    projection_matrix: Mat4,
    projection_dirty: bool,
}

impl OrthographicShadowCamera {
    #[must_use]
    pub fn new(bounds: &ShadowFrustumBounds) -> Self {
        let mut camera = Self {
            near: bounds.near,
            far: bounds.far,
            left: bounds.left,
            right: bounds.right,
            top: bounds.top,
            bottom: bounds.bottom,
            projection_matrix: Mat4::IDENTITY,
            projection_dirty: true,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn set_bound(&mut self, bound: FrustumBound, value: f32) {
        match bound {
            FrustumBound::Near => self.near = value,
            FrustumBound::Far => self.far = value,
            FrustumBound::Left => self.left = value,
            FrustumBound::Right => self.right = value,
            FrustumBound::Top => self.top = value,
            FrustumBound::Bottom => self.bottom = value,
        }
        self.projection_dirty = true;
    }

    #[must_use]
    pub fn bound(&self, bound: FrustumBound) -> f32 {
        match bound {
            FrustumBound::Near => self.near,
            FrustumBound::Far => self.far,
            FrustumBound::Left => self.left,
            FrustumBound::Right => self.right,
            FrustumBound::Top => self.top,
            FrustumBound::Bottom => self.bottom,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.projection_dirty = true;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.projection_dirty
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::orthographic_rh(
            self.left,
            self.right,
            self.bottom,
            self.top,
            self.near,
            self.far,
        );
        self.projection_dirty = false;
    }

    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// The 8 frustum corners in light view space (RH: -Z is forward).
    /// Near face first, counter-clockwise from bottom-left.
    #[must_use]
    pub fn corners_view(&self) -> [Vec3; 8] {
        let (l, r, b, t) = (self.left, self.right, self.bottom, self.top);
        let (n, f) = (-self.near, -self.far);
        [
            Vec3::new(l, b, n),
            Vec3::new(r, b, n),
            Vec3::new(r, t, n),
            Vec3::new(l, t, n),
            Vec3::new(l, b, f),
            Vec3::new(r, b, f),
            Vec3::new(r, t, f),
            Vec3::new(l, t, f),
        ]
    }
}

// ============================================================================
// Shadow Map Target
// ============================================================================

/// Depth target allocated for one particular resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowMapTarget {
    pub id: Uuid,
    pub size: UVec2,
}

#[derive(Debug, Clone)]
pub struct DirectionalShadow {
    pub camera: OrthographicShadowCamera,

    map_size: UVec2,
    map: Option<ShadowMapTarget>,
}

impl DirectionalShadow {
    #[must_use]
    pub fn new(bounds: &ShadowFrustumBounds) -> Self {
        Self {
            camera: OrthographicShadowCamera::new(bounds),
            map_size: UVec2::splat(bounds.map_size),
            map: None,
        }
    }

    #[must_use]
    pub fn map_size(&self) -> UVec2 {
        self.map_size
    }

    /// The currently allocated target, if a frame has been rendered since
    /// the last resolution change.
    #[must_use]
    pub fn map(&self) -> Option<&ShadowMapTarget> {
        self.map.as_ref()
    }

    /// Returns the target for the current resolution, allocating it if
    /// needed. Called by the render step before drawing the depth pass.
    pub fn prepare_map(&mut self) -> &ShadowMapTarget {
        let size = self.map_size;
        self.map.get_or_insert_with(|| {
            log::debug!("Allocating {}x{} shadow map", size.x, size.y);
            ShadowMapTarget {
                id: Uuid::new_v4(),
                size,
            }
        })
    }

    /// Releases the target; the next [`Self::prepare_map`] allocates anew.
    pub fn release_map(&mut self) -> Option<ShadowMapTarget> {
        let released = self.map.take();
        if let Some(target) = &released {
            log::debug!("Released {}x{} shadow map", target.size.x, target.size.y);
        }
        released
    }

    /// Snapshot of the current configuration.
    #[must_use]
    pub fn bounds(&self) -> ShadowFrustumBounds {
        ShadowFrustumBounds {
            near: self.camera.near,
            far: self.camera.far,
            left: self.camera.left,
            right: self.camera.right,
            top: self.camera.top,
            bottom: self.camera.bottom,
            map_size: self.map_size.x,
        }
    }
}

// ============================================================================
// Configurator
// ============================================================================

/// Applies frustum changes to a light's shadow and keeps the projection and
/// map target consistent with them.
pub struct ShadowFrustumConfigurator;

impl ShadowFrustumConfigurator {
    /// Sets all six bounds and the map resolution, then recomputes the
    /// projection. A resolution change releases the existing map target.
    pub fn apply(shadow: &mut DirectionalShadow, bounds: &ShadowFrustumBounds) {
        let camera = &mut shadow.camera;
        camera.near = bounds.near;
        camera.far = bounds.far;
        camera.left = bounds.left;
        camera.right = bounds.right;
        camera.top = bounds.top;
        camera.bottom = bounds.bottom;
        camera.mark_dirty();

        Self::set_map_size(shadow, bounds.map_size);
        shadow.camera.update_projection_matrix();
    }

    /// Sets a single bound and recomputes the projection.
    pub fn set_bound(shadow: &mut DirectionalShadow, bound: FrustumBound, value: f32) {
        shadow.camera.set_bound(bound, value);
        shadow.camera.update_projection_matrix();
    }

    /// Sets the square map resolution. The old target was sized for the old
    /// resolution, so it is released when the size actually changes.
    pub fn set_map_size(shadow: &mut DirectionalShadow, size: u32) {
        let size = UVec2::splat(size);
        if shadow.map_size != size {
            shadow.map_size = size;
            shadow.release_map();
        }
    }
}

// ============================================================================
// Camera Helper
// ============================================================================

/// Debug visualisation of the shadow frustum: its corners in world space.
#[derive(Debug, Clone)]
pub struct ShadowCameraHelper {
    corners: [Vec3; 8],
}

impl ShadowCameraHelper {
    #[must_use]
    pub fn new(light_view: Mat4, camera: &OrthographicShadowCamera) -> Self {
        let mut helper = Self {
            corners: [Vec3::ZERO; 8],
        };
        helper.update(light_view, camera);
        helper
    }

    pub fn update(&mut self, light_view: Mat4, camera: &OrthographicShadowCamera) {
        let inv_view = light_view.inverse();
        for (corner, view) in self.corners.iter_mut().zip(camera.corners_view()) {
            *corner = inv_view.transform_point3(view);
        }
    }

    #[must_use]
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Line segments (index pairs into [`Self::corners`]) of the frustum box.
    #[must_use]
    pub fn edges() -> [(usize, usize); 12] {
        [
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ]
    }
}
